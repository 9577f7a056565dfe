//! Menu item repository.

use chrono::Utc;
use ladle_core::{MenuItemId, Price};
use sqlx::SqlitePool;
use sqlx::types::Json;

use super::RepositoryError;
use crate::models::MenuItem;

/// Repository for catalog operations.
pub struct MenuItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MenuItemRepository<'a> {
    /// Create a new menu item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let items = sqlx::query_as::<_, MenuItem>(
            "SELECT menuitem_id, name, price_cents AS price, nutritional_info, extra_toppings, \
                    created_at, updated_at \
             FROM menu_items ORDER BY menuitem_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Get a menu item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let item = sqlx::query_as::<_, MenuItem>(
            "SELECT menuitem_id, name, price_cents AS price, nutritional_info, extra_toppings, \
                    created_at, updated_at \
             FROM menu_items WHERE menuitem_id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Create a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        price: Price,
        nutritional_info: &[String],
        extra_toppings: &[String],
    ) -> Result<MenuItem, RepositoryError> {
        let now = Utc::now();
        let item = sqlx::query_as::<_, MenuItem>(
            "INSERT INTO menu_items (name, price_cents, nutritional_info, extra_toppings, \
                                     created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
             RETURNING menuitem_id, name, price_cents AS price, nutritional_info, \
                       extra_toppings, created_at, updated_at",
        )
        .bind(name)
        .bind(price)
        .bind(Json(nutritional_info))
        .bind(Json(extra_toppings))
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }
}
