//! # Order Repository
//!
//! Committed orders and their lines.
//!
//! Writes happen only inside the checkout transaction, so the insert helpers
//! take the transaction's connection instead of the pool:
//! ```text
//! let mut tx = pool.begin().await?;
//! OrderRepository::insert_header(&mut tx, ..)   ── orders
//! OrderRepository::insert_line(&mut tx, ..)     ── order_lines (× n)
//! ...
//! tx.commit().await?;
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bistro_core::{CartLine, Order, OrderId, OrderLine, OrderTotals};

/// Repository for committed orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order header by id.
    pub async fn get_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, subtotal_cents, discount_cents, net_cents, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets the lines of an order in the order they were written.
    pub async fn get_lines(&self, order_id: OrderId) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT
                id, order_id, item_id, name_snapshot,
                quantity, unit_price_cents, line_total_cents
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Counts committed orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // ===== Transaction helpers =====

    /// Writes the order header and returns the storage-assigned id.
    pub(crate) async fn insert_header(
        conn: &mut SqliteConnection,
        totals: &OrderTotals,
        created_at: DateTime<Utc>,
    ) -> DbResult<OrderId> {
        let id: OrderId = sqlx::query_scalar(
            r#"
            INSERT INTO orders (subtotal_cents, discount_cents, net_cents, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(totals.subtotal.cents())
        .bind(totals.discount.cents())
        .bind(totals.net.cents())
        .bind(created_at)
        .fetch_one(&mut *conn)
        .await?;

        debug!(order_id = id, subtotal = totals.subtotal.cents(), "Inserted order header");
        Ok(id)
    }

    /// Writes one order line from its cart snapshot.
    pub(crate) async fn insert_line(
        conn: &mut SqliteConnection,
        order_id: OrderId,
        line: &CartLine,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO order_lines (
                order_id, item_id, name_snapshot,
                quantity, unit_price_cents, line_total_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(order_id)
        .bind(line.item_id)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.unit_price_cents)
        .bind(line.line_total().cents())
        .execute(&mut *conn)
        .await?;

        debug!(order_id, item_id = line.item_id, quantity = line.quantity, "Inserted order line");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bistro_core::Money;

    #[tokio::test]
    async fn test_header_and_lines_round_trip_in_transaction() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let totals =
            OrderTotals::compute(Money::from_cents(1350), Money::from_cents(100)).unwrap();
        let line = CartLine {
            item_id: 77,
            name: "Lemonade".to_string(),
            unit_price_cents: 450,
            quantity: 3,
            added_at: Utc::now(),
        };

        let mut tx = db.pool().begin().await.unwrap();
        let order_id = OrderRepository::insert_header(&mut tx, &totals, Utc::now())
            .await
            .unwrap();
        OrderRepository::insert_line(&mut tx, order_id, &line)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let order = db.orders().get_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(order.subtotal_cents, 1350);
        assert_eq!(order.discount_cents, 100);
        assert_eq!(order.net_cents, 1250);

        let lines = db.orders().get_lines(order_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item_id, 77);
        assert_eq!(lines[0].name_snapshot, "Lemonade");
        assert_eq!(lines[0].line_total_cents, 1350);
    }

    #[tokio::test]
    async fn test_rolled_back_header_is_invisible() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let totals = OrderTotals::compute(Money::from_cents(500), Money::zero()).unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        let order_id = OrderRepository::insert_header(&mut tx, &totals, Utc::now())
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert!(db.orders().get_by_id(order_id).await.unwrap().is_none());
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }
}
