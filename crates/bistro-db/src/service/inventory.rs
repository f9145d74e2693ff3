//! # Inventory Service
//!
//! Restocking: the only way stock goes up.
//!
//! The increment is one `UPDATE ... RETURNING` statement, so concurrent
//! restocks and order commits never lose each other's changes. Every restock,
//! including a zero-quantity one, appends an audit record.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{error, info, warn};

use crate::config::{AuditConfig, AuditPolicy};
use crate::error::{DbError, ServiceError, ServiceResult};
use crate::repository::InventoryRepository;
use bistro_core::validation::validate_restock_quantity;
use bistro_core::{AdjustmentReason, CoreError, ItemId, StockChange};

/// Stock replenishment.
///
/// ## Usage
/// ```rust,ignore
/// let change = db.inventory().restock(tea_id, 12).await?;
/// println!("{} → {}", change.previous_qty, change.new_qty);
/// ```
#[derive(Debug, Clone)]
pub struct InventoryService {
    pool: SqlitePool,
    audit: AuditConfig,
}

impl InventoryService {
    /// Creates a new InventoryService.
    pub fn new(pool: SqlitePool, audit: AuditConfig) -> Self {
        InventoryService { pool, audit }
    }

    /// Adds `quantity` units to an item's stock and records the change.
    ///
    /// ## Errors
    /// - Validation error if `quantity < 0`
    /// - `ItemNotFound` if the item does not exist (nothing is written)
    /// - `Storage` on database failure; under [`AuditPolicy::Strict`] this
    ///   includes a failed audit write, and the increment is rolled back too
    pub async fn restock(&self, item_id: ItemId, quantity: i64) -> ServiceResult<StockChange> {
        validate_restock_quantity(quantity)?;

        let mut tx = self.pool.begin().await?;

        let change = match InventoryRepository::increment(&mut tx, item_id, quantity).await {
            Ok(Some(change)) => change,
            Ok(None) => {
                let err = ServiceError::from(CoreError::ItemNotFound(item_id));
                rollback(tx, item_id, &err).await;
                return Err(err);
            }
            Err(e) => {
                let err = ServiceError::from(e);
                rollback(tx, item_id, &err).await;
                return Err(err);
            }
        };

        match self.audit.policy {
            AuditPolicy::Strict => {
                if let Err(e) = InventoryRepository::insert_adjustment(
                    &mut tx,
                    &change,
                    AdjustmentReason::Restock,
                    None,
                )
                .await
                {
                    warn!(item_id, error = %e, "Audit write failed");
                    let err = ServiceError::from(e);
                    rollback(tx, item_id, &err).await;
                    return Err(err);
                }
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            }
            AuditPolicy::BestEffort => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                if let Err(e) = self.record_best_effort(&change).await {
                    warn!(item_id, error = %e, "Restock audit record lost");
                }
            }
        }

        info!(
            item_id,
            quantity,
            previous_qty = change.previous_qty,
            new_qty = change.new_qty,
            "Item restocked"
        );
        Ok(change)
    }

    async fn record_best_effort(&self, change: &StockChange) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        InventoryRepository::insert_adjustment(&mut conn, change, AdjustmentReason::Restock, None)
            .await
    }
}

/// Rolls back and logs. A failed rollback is logged, never returned, so the
/// caller still sees `cause`.
async fn rollback(tx: Transaction<'_, Sqlite>, item_id: ItemId, cause: &ServiceError) {
    match tx.rollback().await {
        Ok(()) => warn!(item_id, error = %cause, "Restock rolled back"),
        Err(e) => error!(item_id, error = %e, cause = %cause, "Rollback failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bistro_core::NewCatalogItem;

    async fn setup(audit: AuditConfig) -> (Database, ItemId) {
        let db = Database::new(DbConfig::in_memory().audit(audit)).await.unwrap();
        let category = db.catalog().insert_category("Drinks").await.unwrap();
        let item = db
            .catalog()
            .insert_item(&NewCatalogItem {
                category_id: category.id,
                name: "Lemonade".to_string(),
                description: Some("Fresh squeezed".to_string()),
                price_cents: 350,
                available_qty: 3,
            })
            .await
            .unwrap();
        (db, item.id)
    }

    #[tokio::test]
    async fn test_restock_increments_and_records() {
        let (db, id) = setup(AuditConfig::default()).await;

        let change = db.inventory().restock(id, 7).await.unwrap();
        assert_eq!(change.previous_qty, 3);
        assert_eq!(change.new_qty, 10);
        assert_eq!(change.delta(), 7);

        let item = db.catalog().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.available_qty, 10);

        let history = db.inventory_log().history(id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].reason, AdjustmentReason::Restock);
        assert_eq!((history[0].previous_qty, history[0].new_qty), (3, 10));
    }

    #[tokio::test]
    async fn test_restock_zero_still_records() {
        let (db, id) = setup(AuditConfig::default()).await;

        let change = db.inventory().restock(id, 0).await.unwrap();
        assert_eq!(change.previous_qty, change.new_qty);

        let history = db.inventory_log().history(id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].previous_qty, 3);
        assert_eq!(history[0].new_qty, 3);
    }

    #[tokio::test]
    async fn test_restock_unknown_item() {
        let (db, _) = setup(AuditConfig::default()).await;

        let err = db.inventory().restock(404, 5).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::ItemNotFound(404))));
        assert_eq!(db.inventory_log().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_item_releases_connection() {
        let (db, id) = setup(AuditConfig::default().policy(AuditPolicy::BestEffort)).await;

        // In-memory pools hold a single connection, so a leaked transaction
        // would block the next restock.
        for _ in 0..3 {
            let err = db.inventory().restock(404, 1).await.unwrap_err();
            assert!(matches!(err, ServiceError::Domain(CoreError::ItemNotFound(404))));
        }

        let change = db.inventory().restock(id, 2).await.unwrap();
        assert_eq!(change.new_qty, 5);
        assert_eq!(db.inventory_log().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_restock_rejects_negative_quantity() {
        let (db, id) = setup(AuditConfig::default()).await;

        let err = db.inventory().restock(id, -2).await.unwrap_err();
        assert!(err.is_validation());

        let item = db.catalog().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.available_qty, 3);
    }

    #[tokio::test]
    async fn test_strict_audit_failure_rolls_back_increment() {
        let (db, id) = setup(AuditConfig::default()).await;
        sqlx::query("DROP TABLE inventory_logs")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.inventory().restock(id, 5).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));

        let item = db.catalog().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.available_qty, 3);
    }

    #[tokio::test]
    async fn test_best_effort_audit_failure_keeps_increment() {
        let (db, id) = setup(AuditConfig::default().policy(AuditPolicy::BestEffort)).await;
        sqlx::query("DROP TABLE inventory_logs")
            .execute(db.pool())
            .await
            .unwrap();

        let change = db.inventory().restock(id, 5).await.unwrap();
        assert_eq!(change.new_qty, 8);

        let item = db.catalog().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.available_qty, 8);
    }
}
