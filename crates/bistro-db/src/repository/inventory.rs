//! # Inventory Repository
//!
//! Stock-level writes and the append-only `inventory_logs` audit trail.
//!
//! ## Stock Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Both writes are a single statement, so no read-modify-write race:     │
//! │                                                                         │
//! │  decrement_if_available (order commit)                                 │
//! │    UPDATE menu_items SET available_qty = available_qty - q             │
//! │    WHERE id = ? AND available_qty >= q                                 │
//! │    RETURNING available_qty        ── no row: stock conflict            │
//! │                                                                         │
//! │  increment (restock)                                                   │
//! │    UPDATE menu_items SET available_qty = available_qty + q             │
//! │    WHERE id = ?                                                        │
//! │    RETURNING available_qty        ── no row: item not found            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bistro_core::{AdjustmentReason, InventoryAdjustment, ItemId, OrderId, StockChange};

/// Repository for stock levels and the inventory audit trail.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Audit records for one item, oldest first.
    pub async fn history(&self, item_id: ItemId) -> DbResult<Vec<InventoryAdjustment>> {
        let records = sqlx::query_as::<_, InventoryAdjustment>(
            r#"
            SELECT id, item_id, previous_qty, new_qty, reason, order_id, created_at
            FROM inventory_logs
            WHERE item_id = ?1
            ORDER BY id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Total number of audit records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // ===== Stock writes =====

    /// Takes `quantity` units if at least that many are available.
    ///
    /// Returns the resulting change, or `None` when the item is missing or
    /// has fewer than `quantity` units left. Nothing is written in the `None`
    /// case.
    pub(crate) async fn decrement_if_available(
        conn: &mut SqliteConnection,
        item_id: ItemId,
        quantity: i64,
    ) -> DbResult<Option<StockChange>> {
        let new_qty: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE menu_items
            SET available_qty = available_qty - ?2,
                updated_at = ?3
            WHERE id = ?1 AND available_qty >= ?2
            RETURNING available_qty
            "#,
        )
        .bind(item_id)
        .bind(quantity)
        .bind(Utc::now())
        .fetch_optional(&mut *conn)
        .await?;

        debug!(item_id, quantity, applied = new_qty.is_some(), "Conditional stock decrement");

        Ok(new_qty.map(|new_qty| StockChange {
            item_id,
            previous_qty: new_qty + quantity,
            new_qty,
        }))
    }

    /// Adds `quantity` units. Returns `None` when the item does not exist.
    pub(crate) async fn increment(
        conn: &mut SqliteConnection,
        item_id: ItemId,
        quantity: i64,
    ) -> DbResult<Option<StockChange>> {
        let new_qty: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE menu_items
            SET available_qty = available_qty + ?2,
                updated_at = ?3
            WHERE id = ?1
            RETURNING available_qty
            "#,
        )
        .bind(item_id)
        .bind(quantity)
        .bind(Utc::now())
        .fetch_optional(&mut *conn)
        .await?;

        debug!(item_id, quantity, found = new_qty.is_some(), "Stock increment");

        Ok(new_qty.map(|new_qty| StockChange {
            item_id,
            previous_qty: new_qty - quantity,
            new_qty,
        }))
    }

    /// Appends one audit record.
    pub(crate) async fn insert_adjustment(
        conn: &mut SqliteConnection,
        change: &StockChange,
        reason: AdjustmentReason,
        order_id: Option<OrderId>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory_logs (
                item_id, previous_qty, new_qty, reason, order_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(change.item_id)
        .bind(change.previous_qty)
        .bind(change.new_qty)
        .bind(reason)
        .bind(order_id)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        debug!(
            item_id = change.item_id,
            previous_qty = change.previous_qty,
            new_qty = change.new_qty,
            reason = reason.as_str(),
            "Recorded inventory adjustment"
        );
        Ok(())
    }
}
