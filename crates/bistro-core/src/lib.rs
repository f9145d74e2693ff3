//! # bistro-core: Pure Business Logic for Bistro POS
//!
//! Everything the order pipeline decides without touching storage lives here:
//! money arithmetic, the session cart, discount/net calculation and the
//! validation rules applied before any transaction is opened.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro POS Order Pipeline                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Application shell (menu, reports, UI)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ owns one Cart per session             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ CatalogItm│  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │   Order   │  │  (cents)  │  │ CartLine  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bistro-db (Database Layer)                   │   │
//! │  │        SQLite, repositories, order commit, restock              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Order, OrderLine, InventoryAdjustment)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Session cart with quantity merge and price snapshots
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::money::Money;
//! use bistro_core::types::OrderTotals;
//!
//! let subtotal = Money::from_cents(2900); // $29.00
//! let totals = OrderTotals::compute(subtotal, Money::from_cents(300)).unwrap();
//!
//! assert_eq!(totals.net.cents(), 2600);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
