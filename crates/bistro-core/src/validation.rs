//! # Validation Module
//!
//! Input validation for catalog seeding and stock adjustments.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Cart / services (Rust)                                       │
//! │  └── THIS MODULE + Cart::add rules, before any transaction opens       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── CHECK (price_cents >= 0), CHECK (available_qty >= 0)              │
//! │  ├── UNIQUE category names                                             │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::{validate_item_name, validate_restock_quantity};
//!
//! validate_item_name("Margherita").unwrap();
//! validate_restock_quantity(0).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::NewCatalogItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted item or category name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Iced Tea").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a category name. Same rules as item names.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("category", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary items)
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an initial stock level.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "available quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the quantity added by a restock.
///
/// Zero is accepted: it leaves stock unchanged and still produces an audit
/// record with previous == new.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Back office: Restock Item                                              │
/// │                                                                         │
/// │  Manager enters quantity: 12                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_restock_quantity(12) ← THIS FUNCTION                         │
/// │       │                                                                 │
/// │       ├── qty < 0? → Error: "restock quantity must be between 0 and …" │
/// │       │                                                                 │
/// │       └── OK → InventoryService::restock                               │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_restock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "restock quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a new catalog item.
pub fn validate_new_item(item: &NewCatalogItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_price_cents(item.price_cents)?;
    validate_stock_quantity(item.available_qty)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
