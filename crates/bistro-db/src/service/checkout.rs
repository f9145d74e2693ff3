//! # Checkout Service
//!
//! Cart additions validated against the live catalog, and the order commit
//! engine that turns a cart into durable rows.
//!
//! ## Commit Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        commit(cart, discount)                           │
//! │                                                                         │
//! │  cart empty?        ──► EmptyCart          (no transaction opened)      │
//! │  discount < 0?      ──► InvalidDiscount    (no transaction opened)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │   ├── INSERT orders (subtotal, discount, net) ─► order_id              │
//! │   ├── INSERT order_lines × n                                           │
//! │   ├── UPDATE menu_items ... WHERE available_qty >= q  × n              │
//! │   │      └── any row missing ─► ROLLBACK ─► StockConflict              │
//! │   └── INSERT inventory_logs (sale) × n     (Strict audit only)         │
//! │  COMMIT                                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  (BestEffort audit: sale records written here, failures logged)        │
//! │  cart.clear() ─► Ok(order_id)                                          │
//! │                                                                         │
//! │  Any SQL error inside the transaction ─► ROLLBACK ─► Storage error     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two sessions may both add the last unit of an item to their carts. The
//! conditional decrement lets exactly one of their commits through.

use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, error, info, warn};

use crate::config::{AuditConfig, AuditPolicy};
use crate::error::{DbError, ServiceError, ServiceResult};
use crate::repository::{CatalogRepository, InventoryRepository, OrderRepository};
use bistro_core::{
    AdjustmentReason, Cart, CartLine, CoreError, ItemId, Money, OrderId, OrderTotals,
    StockChange,
};

/// Cart and order-commit operations.
///
/// ## Usage
/// ```rust,ignore
/// let checkout = db.checkout();
/// let mut cart = Cart::new();
///
/// checkout.add_to_cart(&mut cart, burger_id, 2).await?;
/// checkout.add_to_cart(&mut cart, tea_id, 2).await?;
///
/// match checkout.commit(&mut cart, Money::from_cents(300)).await {
///     Ok(order_id) => println!("Order #{order_id} placed"),
///     Err(e) if e.is_stock_conflict() => println!("{e}"), // cart kept for retry
///     Err(e) => return Err(e.into()),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutService {
    pool: SqlitePool,
    audit: AuditConfig,
}

impl CheckoutService {
    /// Creates a new CheckoutService.
    pub fn new(pool: SqlitePool, audit: AuditConfig) -> Self {
        CheckoutService { pool, audit }
    }

    /// Looks up `item_id` and adds `quantity` units to the cart.
    ///
    /// ## Checks (in order)
    /// 1. Unknown item → `ItemNotFound`
    /// 2. `quantity <= 0` → `InvalidQuantity`
    /// 3. `quantity` above current stock → `InsufficientStock`
    ///
    /// The stock check is advisory: nothing is reserved.
    pub async fn add_to_cart(
        &self,
        cart: &mut Cart,
        item_id: ItemId,
        quantity: i64,
    ) -> ServiceResult<()> {
        let item = CatalogRepository::new(self.pool.clone())
            .find_by_id(item_id)
            .await?
            .ok_or(CoreError::ItemNotFound(item_id))?;

        cart.add(&item, quantity)?;

        debug!(item_id, quantity, lines = cart.line_count(), "Added to cart");
        Ok(())
    }

    /// Commits the cart as one order and clears it.
    ///
    /// Either every row (header, lines, decrements, and under Strict audit
    /// the sale records) becomes visible, or none does. On any error the cart
    /// is left untouched so the caller can correct it and retry.
    ///
    /// ## Errors
    /// - `EmptyCart`, `InvalidDiscount`: raised before the transaction opens
    /// - `StockConflict`: a line's quantity is no longer available
    /// - `Storage`: any database failure
    pub async fn commit(&self, cart: &mut Cart, discount: Money) -> ServiceResult<OrderId> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        let totals = cart.totals(discount)?;

        let audit_in_tx =
            self.audit.record_order_decrements && self.audit.policy == AuditPolicy::Strict;

        let mut tx = self.pool.begin().await?;

        let (order_id, changes) =
            match write_order(&mut tx, cart.lines(), &totals, audit_in_tx).await {
                Ok(written) => written,
                Err(err) => {
                    rollback(tx, &err).await;
                    return Err(err);
                }
            };

        tx.commit().await.map_err(|e| {
            error!(order_id, error = %e, "Order commit failed");
            DbError::TransactionFailed(e.to_string())
        })?;

        if self.audit.record_order_decrements && self.audit.policy == AuditPolicy::BestEffort {
            self.record_sales_best_effort(order_id, &changes).await;
        }

        info!(
            order_id,
            lines = changes.len(),
            subtotal = totals.subtotal.cents(),
            discount = totals.discount.cents(),
            net = totals.net.cents(),
            "Order committed"
        );

        cart.clear();
        Ok(order_id)
    }

    async fn record_sales_best_effort(&self, order_id: OrderId, changes: &[StockChange]) {
        let mut conn = match self.pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(order_id, error = %e, "Skipping sale audit records");
                return;
            }
        };

        for change in changes {
            if let Err(e) = InventoryRepository::insert_adjustment(
                &mut conn,
                change,
                AdjustmentReason::Sale,
                Some(order_id),
            )
            .await
            {
                warn!(
                    order_id,
                    item_id = change.item_id,
                    error = %e,
                    "Sale audit record lost"
                );
            }
        }
    }
}

/// Writes header, lines and decrements on the open transaction.
async fn write_order(
    conn: &mut SqliteConnection,
    lines: &[CartLine],
    totals: &OrderTotals,
    audit_in_tx: bool,
) -> ServiceResult<(OrderId, Vec<StockChange>)> {
    let order_id = OrderRepository::insert_header(conn, totals, Utc::now()).await?;

    for line in lines {
        OrderRepository::insert_line(conn, order_id, line).await?;
    }

    let mut changes = Vec::with_capacity(lines.len());
    for line in lines {
        match InventoryRepository::decrement_if_available(conn, line.item_id, line.quantity)
            .await?
        {
            Some(change) => changes.push(change),
            None => {
                return Err(CoreError::StockConflict {
                    item_id: line.item_id,
                    requested: line.quantity,
                }
                .into())
            }
        }
    }

    if audit_in_tx {
        for change in &changes {
            InventoryRepository::insert_adjustment(
                conn,
                change,
                AdjustmentReason::Sale,
                Some(order_id),
            )
            .await?;
        }
    }

    Ok((order_id, changes))
}

async fn rollback(tx: Transaction<'_, Sqlite>, cause: &ServiceError) {
    match tx.rollback().await {
        Ok(()) => warn!(error = %cause, "Order rolled back"),
        Err(e) => error!(error = %e, cause = %cause, "Rollback failed"),
    }
}
