//! # Catalog Repository
//!
//! Read access to the menu plus the inserts used for seeding.
//!
//! Every item query joins `categories` so the returned [`CatalogItem`]
//! carries its category name:
//! ```text
//! menu_items mi ──JOIN── categories c ON mi.category_id = c.id
//!      │                       │
//!      └── id, name, price ... └── name AS category_name
//! ```
//!
//! Stock levels are never written here. See [`super::inventory`] for the
//! conditional decrement and the restock increment.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult, ServiceResult};
use bistro_core::validation::{validate_category_name, validate_new_item};
use bistro_core::{CatalogItem, Category, ItemId, NewCatalogItem};

const ITEM_SELECT: &str = r#"
    SELECT
        mi.id,
        mi.category_id,
        c.name AS category_name,
        mi.name,
        mi.description,
        mi.price_cents,
        mi.available_qty,
        mi.created_at,
        mi.updated_at
    FROM menu_items mi
    INNER JOIN categories c ON mi.category_id = c.id
"#;

/// Repository for menu catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.catalog();
///
/// let item = repo.find_by_id(7).await?;
/// let drinks = repo.list_by_category("Drinks").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets an item by id, with its current stock level.
    ///
    /// Returns `None` when no such item exists.
    pub async fn find_by_id(&self, id: ItemId) -> DbResult<Option<CatalogItem>> {
        debug!(item_id = id, "Fetching catalog item");

        let sql = format!("{ITEM_SELECT} WHERE mi.id = ?1");
        let item = sqlx::query_as::<_, CatalogItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists the items of one category, ordered by item name.
    pub async fn list_by_category(&self, category: &str) -> DbResult<Vec<CatalogItem>> {
        let sql = format!("{ITEM_SELECT} WHERE c.name = ?1 ORDER BY mi.name");
        let items = sqlx::query_as::<_, CatalogItem>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        debug!(category = %category, count = items.len(), "Listed category items");
        Ok(items)
    }

    /// Lists the whole menu, ordered by category name then item name.
    pub async fn list_all(&self) -> DbResult<Vec<CatalogItem>> {
        let sql = format!("{ITEM_SELECT} ORDER BY c.name, mi.name");
        let items = sqlx::query_as::<_, CatalogItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Lists categories ordered by name.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Inserts a category.
    ///
    /// ## Errors
    /// - Validation error for an empty or over-long name
    /// - `DbError::UniqueViolation` when the name already exists
    pub async fn insert_category(&self, name: &str) -> ServiceResult<Category> {
        validate_category_name(name)?;
        let name = name.trim();

        debug!(name = %name, "Inserting category");

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES (?1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, name),
            other => other,
        })?;

        Ok(category)
    }

    /// Inserts a menu item and returns it as stored.
    ///
    /// ## Errors
    /// - Validation error (name, price ≥ 0, quantity ≥ 0)
    /// - `DbError::ForeignKeyViolation` for an unknown category
    pub async fn insert_item(&self, item: &NewCatalogItem) -> ServiceResult<CatalogItem> {
        validate_new_item(item)?;

        debug!(name = %item.name, category_id = item.category_id, "Inserting menu item");

        let now = Utc::now();
        let id: ItemId = sqlx::query_scalar(
            r#"
            INSERT INTO menu_items (
                category_id, name, description, price_cents, available_qty,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING id
            "#,
        )
        .bind(item.category_id)
        .bind(item.name.trim())
        .bind(item.description.as_deref())
        .bind(item.price_cents)
        .bind(item.available_qty)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let stored = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("CatalogItem", id))?;

        Ok(stored)
    }

    /// Counts menu items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::pool::{Database, DbConfig};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();

        let mains = catalog.insert_category("Mains").await.unwrap();
        let drinks = catalog.insert_category("Drinks").await.unwrap();

        for (category_id, name, price, qty) in [
            (mains.id, "Burger", 1000, 5),
            (drinks.id, "Lemonade", 350, 10),
            (drinks.id, "Iced Tea", 450, 2),
            (mains.id, "Arancini", 800, 4),
        ] {
            catalog
                .insert_item(&NewCatalogItem {
                    category_id,
                    name: name.to_string(),
                    description: None,
                    price_cents: price,
                    available_qty: qty,
                })
                .await
                .unwrap();
        }

        db
    }

    #[tokio::test]
    async fn test_find_by_id_joins_category() {
        let db = seeded().await;
        let mains = db.catalog().list_by_category("Mains").await.unwrap();
        let burger_id = mains[1].id;

        let found = db.catalog().find_by_id(burger_id).await.unwrap().unwrap();
        assert_eq!(found.name, "Burger");
        assert_eq!(found.category_name, "Mains");
        assert_eq!(found.price_cents, 1000);
        assert_eq!(found.available_qty, 5);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = seeded().await;
        assert!(db.catalog().find_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orderings() {
        let db = seeded().await;

        let drinks: Vec<String> = db
            .catalog()
            .list_by_category("Drinks")
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(drinks, vec!["Iced Tea", "Lemonade"]);

        let all: Vec<String> = db
            .catalog()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(all, vec!["Iced Tea", "Lemonade", "Arancini", "Burger"]);

        let categories: Vec<String> = db
            .catalog()
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(categories, vec!["Drinks", "Mains"]);
    }

    #[tokio::test]
    async fn test_duplicate_category_rejected() {
        let db = seeded().await;

        let err = db.catalog().insert_category("Mains").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Storage(DbError::UniqueViolation { ref value, .. }) if value == "Mains"
        ));
    }

    #[tokio::test]
    async fn test_insert_item_validates() {
        let db = seeded().await;

        let err = db
            .catalog()
            .insert_item(&NewCatalogItem {
                category_id: 1,
                name: "Ghost".to_string(),
                description: None,
                price_cents: -1,
                available_qty: 1,
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(db.catalog().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_insert_item_unknown_category() {
        let db = seeded().await;

        let err = db
            .catalog()
            .insert_item(&NewCatalogItem {
                category_id: 42,
                name: "Orphan".to_string(),
                description: None,
                price_cents: 100,
                available_qty: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Storage(DbError::ForeignKeyViolation { .. })
        ));
    }
}
