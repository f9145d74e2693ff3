//! # bistro-db: Database Layer for Bistro POS
//!
//! SQLite storage for the order pipeline, using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro POS Data Flow                             │
//! │                                                                         │
//! │  Application shell (one Cart per session)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bistro-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌───────────────┐   │   │
//! │  │   │   Services    │   │ Repositories  │   │   Database    │   │   │
//! │  │   │               │   │               │   │   (pool.rs)   │   │   │
//! │  │   │ Checkout      │──►│ Catalog       │──►│ SqlitePool    │   │   │
//! │  │   │ Inventory     │   │ Order         │   │ AuditConfig   │   │   │
//! │  │   │ (transactions)│   │ Inventory     │   │ Migrations    │   │   │
//! │  │   └───────────────┘   └───────────────┘   └───────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - Audit trail policy
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and service error types
//! - [`repository`] - Catalog, order and inventory repositories
//! - [`service`] - Checkout (cart + order commit) and restock
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_core::{Cart, Money};
//! use bistro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bistro.db")).await?;
//!
//! let mut cart = Cart::new();
//! db.checkout().add_to_cart(&mut cart, burger_id, 2).await?;
//! let order_id = db.checkout().commit(&mut cart, Money::from_cents(300)).await?;
//!
//! db.inventory().restock(burger_id, 10).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AuditConfig, AuditPolicy};
pub use error::{DbError, DbResult, ServiceError, ServiceResult};
pub use pool::{Database, DbConfig};

pub use repository::{CatalogRepository, InventoryRepository, OrderRepository};
pub use service::{CheckoutService, InventoryService};
