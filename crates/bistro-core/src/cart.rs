//! # Cart
//!
//! The per-session, in-memory list of intended order lines.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  Cashier Action           Service Call              Cart Change         │
//! │  ──────────────           ────────────              ───────────         │
//! │                                                                         │
//! │  Tap menu item ─────────► add_to_cart() ──────────► merge or push line │
//! │                                                                         │
//! │  Place order ───────────► commit() ───────────────► clear() on success │
//! │                                                                         │
//! │  Cancel ────────────────► (caller) ───────────────► clear()            │
//! │                                                                         │
//! │  NOTE: stock checks here are advisory. Nothing is reserved; the         │
//! │        authoritative check is the conditional decrement at commit.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `Cart` is a plain value owned by whoever drives the session. There is no
//! global cart; two sessions hold two independent carts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogItem, ItemId, OrderTotals};

/// A line in the cart.
///
/// ## Design Notes
/// `name` and `unit_price_cents` are frozen when the item is first added.
/// Later catalog price changes do not affect this cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item_id: ItemId,

    /// Item name at time of adding (frozen)
    pub name: String,

    /// Price in cents at time of adding (frozen)
    pub unit_price_cents: i64,

    /// Always > 0
    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_item(item: &CatalogItem, quantity: i64) -> Self {
        CartLine {
            item_id: item.id,
            name: item.name.clone(),
            unit_price_cents: item.price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// The session cart.
///
/// ## Invariants
/// - At most one line per item id (adding the same item merges quantities)
/// - Every line quantity is > 0
/// - Line order is insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds `quantity` units of an already looked-up catalog item.
    ///
    /// ## Checks (in order)
    /// 1. `quantity <= 0` → `InvalidQuantity`
    /// 2. `quantity > item.available_qty` → `InsufficientStock`
    /// 3. merged quantity, unit count or subtotal overflows → `QuantityOverflow`
    ///
    /// Only the incremental quantity is checked against stock. When a line
    /// for the item already exists its quantity grows by `quantity` without
    /// re-checking the combined amount; the commit catches any overshoot.
    ///
    /// On error the cart is unchanged.
    pub fn add(&mut self, item: &CatalogItem, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity { quantity });
        }

        if !item.has_stock_for(quantity) {
            return Err(CoreError::InsufficientStock {
                item_id: item.id,
                name: item.name.clone(),
                available: item.available_qty,
                requested: quantity,
            });
        }

        let position = self.lines.iter().position(|l| l.item_id == item.id);
        let (unit_price_cents, merged) = match position {
            Some(i) => (
                self.lines[i].unit_price_cents,
                self.lines[i].quantity.checked_add(quantity),
            ),
            None => (item.price_cents, Some(quantity)),
        };

        let merged = merged
            .filter(|&qty| self.totals_fit_with(item.id, unit_price_cents, qty))
            .ok_or(CoreError::QuantityOverflow {
                item_id: item.id,
                requested: quantity,
            })?;

        match position {
            Some(i) => self.lines[i].quantity = merged,
            None => self.lines.push(CartLine::from_item(item, quantity)),
        }
        Ok(())
    }

    /// Whether unit count and subtotal stay representable if the line for
    /// `item_id` holds `quantity` units at `unit_price_cents`.
    fn totals_fit_with(&self, item_id: ItemId, unit_price_cents: i64, quantity: i64) -> bool {
        let mut units = Some(quantity);
        let mut subtotal = Money::from_cents(unit_price_cents).checked_multiply_quantity(quantity);

        for line in self.lines.iter().filter(|l| l.item_id != item_id) {
            units = units.and_then(|u| u.checked_add(line.quantity));
            subtotal = subtotal.and_then(|s| s.checked_add(line.line_total()));
        }

        units.is_some() && subtotal.is_some()
    }

    /// Current lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of unit price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Computes totals for this cart with a flat discount.
    pub fn totals(&self, discount: Money) -> CoreResult<OrderTotals> {
        OrderTotals::compute(self.subtotal(), discount)
    }

    /// Removes all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct items.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart summary handed to the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: ItemId, name: &str, price_cents: i64, available_qty: i64) -> CatalogItem {
        CatalogItem {
            id,
            category_id: 1,
            category_name: "Mains".to_string(),
            name: name.to_string(),
            description: None,
            price_cents,
            available_qty,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let burger = test_item(1, "Burger", 1000, 5);

        cart.add(&burger, 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 2000);
        assert_eq!(cart.lines()[0].name, "Burger");
        assert_eq!(cart.lines()[0].unit_price_cents, 1000);
    }

    #[test]
    fn test_cart_add_same_item_merges_quantity() {
        let mut cart = Cart::new();
        let burger = test_item(1, "Burger", 1000, 5);

        cart.add(&burger, 2).unwrap();
        cart.add(&burger, 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_merge_checks_only_incremental_quantity() {
        let mut cart = Cart::new();
        let tea = test_item(2, "Iced Tea", 450, 3);

        cart.add(&tea, 3).unwrap();
        // 3 + 2 exceeds stock, but only the 2 is checked at add-time.
        cart.add(&tea, 2).unwrap();

        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_cart_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let burger = test_item(1, "Burger", 1000, 5);

        assert!(matches!(
            cart.add(&burger, 0),
            Err(CoreError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            cart.add(&burger, -2),
            Err(CoreError::InvalidQuantity { quantity: -2 })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_rejects_insufficient_stock() {
        let mut cart = Cart::new();
        let tea = test_item(2, "Iced Tea", 450, 2);

        let err = cart.add(&tea, 3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                item_id: 2,
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let water = test_item(3, "Sparkling Water", 0, i64::MAX);

        cart.add(&water, i64::MAX).unwrap();
        let err = cart.add(&water, 1).unwrap_err();

        assert!(matches!(
            err,
            CoreError::QuantityOverflow {
                item_id: 3,
                requested: 1
            }
        ));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, i64::MAX);
    }

    #[test]
    fn test_subtotal_overflow_rejected_at_add() {
        let mut cart = Cart::new();
        let salmon = test_item(1, "Grilled Salmon", 100_000, i64::MAX);

        let err = cart.add(&salmon, 1_000_000_000_000_000).unwrap_err();
        assert!(matches!(err, CoreError::QuantityOverflow { item_id: 1, .. }));
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_unit_count_overflow_across_lines_rejected() {
        let mut cart = Cart::new();
        cart.add(&test_item(1, "Iced Tea", 0, i64::MAX), i64::MAX)
            .unwrap();

        let err = cart
            .add(&test_item(2, "Lemonade", 0, 10), 1)
            .unwrap_err();
        assert!(matches!(err, CoreError::QuantityOverflow { item_id: 2, .. }));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), i64::MAX);
    }

    #[test]
    fn test_price_snapshot_survives_catalog_change() {
        let mut cart = Cart::new();
        let mut burger = test_item(1, "Burger", 1000, 5);

        cart.add(&burger, 1).unwrap();
        burger.price_cents = 1500;
        cart.add(&burger, 1).unwrap();

        assert_eq!(cart.lines()[0].unit_price_cents, 1000);
        assert_eq!(cart.subtotal().cents(), 2000);
    }

    #[test]
    fn test_cart_totals_and_summary() {
        let mut cart = Cart::new();
        cart.add(&test_item(1, "Burger", 1000, 5), 2).unwrap();
        cart.add(&test_item(2, "Iced Tea", 450, 2), 2).unwrap();

        let totals = cart.totals(Money::from_cents(300)).unwrap();
        assert_eq!(totals.subtotal.cents(), 2900);
        assert_eq!(totals.net.cents(), 2600);

        let summary = CartSummary::from(&cart);
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.total_quantity, 4);
        assert_eq!(summary.subtotal_cents, 2900);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add(&test_item(1, "Burger", 1000, 5), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashMap;

        /// (id, price_cents) of a small menu so adds collide often.
        const MENU: [(ItemId, i64); 4] = [(1, 1000), (2, 450), (3, 0), (4, 1850)];

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Any add sequence leaves one line per distinct item holding the
            /// sum of its adds, in first-added order.
            #[test]
            fn adds_merge_into_one_line_per_item(
                adds in prop::collection::vec((0..MENU.len(), 1i64..50), 0..40)
            ) {
                let mut cart = Cart::new();
                let mut expected: HashMap<ItemId, i64> = HashMap::new();
                let mut first_seen: Vec<ItemId> = Vec::new();

                for (index, quantity) in adds {
                    let (id, price) = MENU[index];
                    cart.add(&test_item(id, "Dish", price, 1_000), quantity).unwrap();

                    if !expected.contains_key(&id) {
                        first_seen.push(id);
                    }
                    *expected.entry(id).or_insert(0) += quantity;
                }

                let ids: Vec<ItemId> = cart.lines().iter().map(|l| l.item_id).collect();
                prop_assert_eq!(ids, first_seen);
                for line in cart.lines() {
                    prop_assert!(line.quantity > 0);
                    prop_assert_eq!(line.quantity, expected[&line.item_id]);
                }
                prop_assert_eq!(cart.total_quantity(), expected.values().sum::<i64>());
            }

            /// Subtotal is the sum of quantity times the captured price, even
            /// when the catalog price moves between adds.
            #[test]
            fn subtotal_uses_captured_prices(
                adds in prop::collection::vec((0..MENU.len(), 1i64..50, 0i64..5_000), 1..40)
            ) {
                let mut cart = Cart::new();
                let mut captured: HashMap<ItemId, i64> = HashMap::new();

                for (index, quantity, current_price) in adds {
                    let (id, _) = MENU[index];
                    cart.add(&test_item(id, "Dish", current_price, 1_000), quantity).unwrap();
                    captured.entry(id).or_insert(current_price);
                }

                let expected: i64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.quantity * captured[&l.item_id])
                    .sum();
                prop_assert_eq!(cart.subtotal().cents(), expected);
            }

            /// Adds past the advertised stock never change the cart.
            #[test]
            fn rejected_adds_leave_cart_unchanged(
                available in 0i64..20,
                quantity in -5i64..40
            ) {
                let mut cart = Cart::new();
                cart.add(&test_item(1, "Burger", 1000, 100), 2).unwrap();
                let before = cart.lines().to_vec();

                let result = cart.add(&test_item(2, "Iced Tea", 450, available), quantity);

                if quantity <= 0 || quantity > available {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(cart.lines(), before.as_slice());
                } else {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(cart.line_count(), 2);
                }
            }
        }
    }
}
