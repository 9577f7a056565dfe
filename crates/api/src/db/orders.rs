//! Order repository (reads).
//!
//! Order creation is a multi-statement workflow and lives in
//! [`OrderService`]; this repository only covers the read paths.
//!
//! [`OrderService`]: crate::services::orders::OrderService

use ladle_core::{OrderId, UserId};
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::Order;

pub(crate) const ORDER_COLUMNS: &str =
    "order_id, user_id, total_cents AS total_amount, order_status, created_at, updated_at";

/// Repository for order reads.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY order_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List a user's orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ?1 ORDER BY order_id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }
}
