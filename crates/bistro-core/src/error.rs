//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Cart / commit rule violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bistro-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ServiceError     - CoreError | DbError, returned by services      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                         DbError ────┴─► ServiceError → caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## When Each Error Is Raised
//! Validation-class errors (`ItemNotFound`, `InvalidQuantity`,
//! `InsufficientStock`, `QuantityOverflow`, `EmptyCart`, `InvalidDiscount`) are raised before a
//! transaction is opened. `StockConflict` is raised only after the commit
//! transaction has been rolled back.

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced item id does not exist in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Requested quantity is zero or negative.
    #[error("Quantity must be greater than zero (got {quantity})")]
    InvalidQuantity { quantity: i64 },

    /// Advisory failure at add-time.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Iced Tea", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 Iced Tea left"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: ItemId,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Adding would push a line quantity, the cart's unit count or its
    /// subtotal past what an `i64` can hold. The cart is left unchanged.
    #[error("Cannot add {requested} of item {item_id}: cart quantity or total out of range")]
    QuantityOverflow { item_id: ItemId, requested: i64 },

    /// Commit attempted with zero lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Authoritative failure at commit-time: the conditional decrement for
    /// this item touched zero rows, so the whole order was rolled back.
    #[error("Stock conflict for item {item_id}: {requested} no longer available, order rolled back")]
    StockConflict { item_id: ItemId, requested: i64 },

    /// Discount amount is negative.
    #[error("Discount cannot be negative (got {discount_cents} cents)")]
    InvalidDiscount { discount_cents: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for errors raised before any transaction is opened.
    pub fn is_validation(&self) -> bool {
        !matches!(self, CoreError::StockConflict { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by catalog seeding and restock before anything reaches SQL.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
