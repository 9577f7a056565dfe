//! Cart repository.

use chrono::Utc;
use ladle_core::{CartId, UserId};
use sqlx::SqlitePool;

use super::{RepositoryError, conflict_on_foreign_key};
use crate::models::Cart;

/// Repository for cart operations.
///
/// No singleton is enforced: a user may hold any number of carts.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Cart>, RepositoryError> {
        let carts = sqlx::query_as::<_, Cart>(
            "SELECT cart_id, user_id, created_at, updated_at FROM carts ORDER BY cart_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(carts)
    }

    /// List a user's carts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Cart>, RepositoryError> {
        let carts = sqlx::query_as::<_, Cart>(
            "SELECT cart_id, user_id, created_at, updated_at \
             FROM carts WHERE user_id = ?1 ORDER BY cart_id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(carts)
    }

    /// Get a cart by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(
            "SELECT cart_id, user_id, created_at, updated_at FROM carts WHERE cart_id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(cart)
    }

    /// Create an empty cart for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let now = Utc::now();
        let cart = sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (user_id, created_at, updated_at) VALUES (?1, ?2, ?2) \
             RETURNING cart_id, user_id, created_at, updated_at",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_foreign_key(e, "user does not exist"))?;

        Ok(cart)
    }
}
