//! Cart item repository.
//!
//! Lines are unique per (cart, menu item) pair; inserting a duplicate is
//! an upsert-style no-op rather than an error. Quantity changes go through
//! the explicit update, never through repeated inserts.

use ladle_core::{CartId, MenuItemId, Price};
use sqlx::SqlitePool;
use sqlx::types::Json;

use super::{RepositoryError, conflict_on_foreign_key};
use crate::models::{CartItem, CartItemCost};

const CART_ITEM_COLUMNS: &str = "cartitem_id, cart_id, menuitem_id, quantity, extra_toppings";

/// Repository for cart line operations.
pub struct CartItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartItemRepository<'a> {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every cart line across all carts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM cart_items ORDER BY cartitem_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// List the lines of one cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_cart(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM cart_items WHERE cart_id = ?1 ORDER BY cartitem_id"
        ))
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Stage a menu item in a cart with quantity 1.
    ///
    /// Returns `None` when the (cart, menu item) pair already exists: the
    /// insert no-ops on conflict and the existing line is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the cart does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        cart_id: CartId,
        menuitem_id: MenuItemId,
        extra_toppings: &[String],
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "INSERT INTO cart_items (cart_id, menuitem_id, extra_toppings) \
             VALUES (?1, ?2, ?3) \
             ON CONFLICT (cart_id, menuitem_id) DO NOTHING \
             RETURNING {CART_ITEM_COLUMNS}"
        ))
        .bind(cart_id)
        .bind(menuitem_id)
        .bind(Json(extra_toppings))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| conflict_on_foreign_key(e, "cart does not exist"))?;

        Ok(item)
    }

    /// Look up one line by its (cart, menu item) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_pair(
        &self,
        cart_id: CartId,
        menuitem_id: MenuItemId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM cart_items \
             WHERE cart_id = ?1 AND menuitem_id = ?2"
        ))
        .bind(cart_id)
        .bind(menuitem_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Remove one line from a cart.
    ///
    /// Removing an absent pair reports zero rows; the caller still treats
    /// it as success.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        cart_id: CartId,
        menuitem_id: MenuItemId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1 AND menuitem_id = ?2")
            .bind(cart_id)
            .bind(menuitem_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Set the quantity of one line.
    ///
    /// Returns `None` if the pair does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails. A
    /// non-positive quantity trips the table CHECK and surfaces here.
    pub async fn update_quantity(
        &self,
        cart_id: CartId,
        menuitem_id: MenuItemId,
        quantity: i64,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "UPDATE cart_items SET quantity = ?3 \
             WHERE cart_id = ?1 AND menuitem_id = ?2 \
             RETURNING {CART_ITEM_COLUMNS}"
        ))
        .bind(cart_id)
        .bind(menuitem_id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// The lines of a cart joined to menu prices, each with its
    /// store-computed `price * quantity` cost.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_cost(
        &self,
        cart_id: CartId,
    ) -> Result<Vec<CartItemCost>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItemCost>(
            "SELECT ci.cartitem_id, m.name, m.price_cents AS price, ci.quantity, \
                    (m.price_cents * ci.quantity) AS total_price \
             FROM cart_items ci \
             JOIN menu_items m ON ci.menuitem_id = m.menuitem_id \
             WHERE ci.cart_id = ?1 \
             ORDER BY ci.cartitem_id",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// The cart's grand total as a single store-side aggregate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn total_cost(&self, cart_id: CartId) -> Result<Price, RepositoryError> {
        let cents = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(m.price_cents * ci.quantity), 0) \
             FROM cart_items ci \
             JOIN menu_items m ON ci.menuitem_id = m.menuitem_id \
             WHERE ci.cart_id = ?1",
        )
        .bind(cart_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Price::from_cents(cents))
    }

    /// Delete every line of a cart. The cart row itself persists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, cart_id: CartId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
            .bind(cart_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
