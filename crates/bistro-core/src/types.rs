//! # Domain Types
//!
//! Core domain types used throughout the Bistro POS order pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │     Order       │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │   │  id (rowid)     │   │  order_id (FK)  │       │
//! │  │  category       │   │  subtotal_cents │   │  name_snapshot  │       │
//! │  │  price_cents    │   │  discount_cents │   │  unit_price     │       │
//! │  │  available_qty  │   │  net_cents      │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Category      │   │ InventoryAdjust │   │  OrderTotals    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │   │  previous_qty   │   │  subtotal       │       │
//! │  │                 │   │  new_qty        │   │  discount       │       │
//! │  │                 │   │  reason         │   │  net (≥ 0)      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Order lines copy the item name and unit price at the moment the line was
//! added to the cart. Later catalog edits never rewrite order history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

/// Catalog item identifier (SQLite rowid).
pub type ItemId = i64;

/// Order identifier, assigned by storage on insert.
pub type OrderId = i64;

/// Menu category identifier.
pub type CategoryId = i64;

// =============================================================================
// Catalog
// =============================================================================

/// A menu category ("Mains", "Drinks", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A sellable menu item with its current stock level.
///
/// `category_name` is joined in by the catalog queries so the UI shell can
/// group items without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier.
    pub id: ItemId,

    /// Category this item is listed under.
    pub category_id: CategoryId,

    /// Category display name (joined).
    pub category_name: String,

    /// Display name shown to the cashier and on the order.
    pub name: String,

    /// Optional menu description.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units currently available. Never negative.
    pub available_qty: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if `quantity` more units could be taken from current stock.
    #[inline]
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.available_qty >= quantity
    }
}

/// Input for creating a catalog item (seeding, back-office).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCatalogItem {
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub available_qty: i64,
}

// =============================================================================
// Order
// =============================================================================

/// A committed order header.
///
/// Only ever written inside the commit transaction, together with all of its
/// lines and the matching stock decrements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: OrderId,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    /// `max(0, subtotal - discount)`
    pub net_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the net amount as Money.
    #[inline]
    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }
}

/// A line of a committed order.
/// Uses snapshot pattern to freeze item data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: OrderId,
    /// Plain reference; the catalog row may later be edited or removed.
    pub item_id: ItemId,
    /// Item name at time of sale (frozen).
    pub name_snapshot: String,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// unit_price × quantity
    pub line_total_cents: i64,
}

impl OrderLine {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Subtotal, discount and net for an order about to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub net: Money,
}

impl OrderTotals {
    /// Computes order totals from a subtotal and a flat discount.
    ///
    /// ## Rules
    /// ```text
    /// discount < 0            → Err(InvalidDiscount)
    /// discount ≤ subtotal     → net = subtotal - discount
    /// discount > subtotal     → net = 0
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::{Money, OrderTotals};
    ///
    /// let totals = OrderTotals::compute(Money::from_cents(500), Money::from_cents(800)).unwrap();
    /// assert_eq!(totals.net.cents(), 0);
    /// assert_eq!(totals.discount.cents(), 800);
    /// ```
    pub fn compute(subtotal: Money, discount: Money) -> CoreResult<Self> {
        if discount.is_negative() {
            return Err(CoreError::InvalidDiscount {
                discount_cents: discount.cents(),
            });
        }

        Ok(OrderTotals {
            subtotal,
            discount,
            net: subtotal.saturating_sub_floor_zero(discount),
        })
    }
}

// =============================================================================
// Inventory Audit Trail
// =============================================================================

/// Why an item's stock level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Manual restock from the back office.
    Restock,
    /// Decrement caused by a committed order.
    Sale,
}

impl AdjustmentReason {
    /// Storage representation (matches the `inventory_logs.reason` CHECK).
    pub const fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Restock => "restock",
            AdjustmentReason::Sale => "sale",
        }
    }
}

/// One append-only audit record of a stock change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryAdjustment {
    pub id: i64,
    pub item_id: ItemId,
    pub previous_qty: i64,
    pub new_qty: i64,
    pub reason: AdjustmentReason,
    /// Set for `Sale` records only.
    pub order_id: Option<OrderId>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Before/after stock levels produced by a single atomic stock update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockChange {
    pub item_id: ItemId,
    pub previous_qty: i64,
    pub new_qty: i64,
}

impl StockChange {
    /// Signed change in units (positive for restock, negative for sale).
    #[inline]
    pub fn delta(&self) -> i64 {
        self.new_qty - self.previous_qty
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
