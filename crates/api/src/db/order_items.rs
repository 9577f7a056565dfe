//! Order item repository.

use ladle_core::{MenuItemId, OrderId};
use sqlx::SqlitePool;
use sqlx::types::Json;

use super::{RepositoryError, conflict_on_foreign_key};
use crate::models::OrderItem;

const ORDER_ITEM_COLUMNS: &str = "orderitem_id, order_id, menuitem_id, quantity, extra_toppings";

/// Repository for order line snapshots. Rows are immutable after creation.
pub struct OrderItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderItemRepository<'a> {
    /// Create a new order item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every order line across all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items ORDER BY orderitem_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// List the lines of one order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 \
             ORDER BY orderitem_id"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Append a line to an existing order.
    ///
    /// The placement workflow writes its lines inside its own transaction;
    /// this standalone insert backs the direct create-orderitem endpoint.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order or menu item does
    /// not exist. Returns `RepositoryError::Database` for other errors.
    pub async fn create(
        &self,
        order_id: OrderId,
        menuitem_id: MenuItemId,
        quantity: i64,
        extra_toppings: &[String],
    ) -> Result<OrderItem, RepositoryError> {
        let item = sqlx::query_as::<_, OrderItem>(&format!(
            "INSERT INTO order_items (order_id, menuitem_id, quantity, extra_toppings) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {ORDER_ITEM_COLUMNS}"
        ))
        .bind(order_id)
        .bind(menuitem_id)
        .bind(quantity)
        .bind(Json(extra_toppings))
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_foreign_key(e, "order or menu item does not exist"))?;

        Ok(item)
    }
}
