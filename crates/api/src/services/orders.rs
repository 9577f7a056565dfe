//! Order placement and lifecycle.
//!
//! Placement is the one multi-statement, invariant-bearing sequence in
//! the system: it prices the cart, creates the order, snapshots the
//! lines, and clears the cart as a single transaction. The total is
//! always computed server-side from current menu prices; a
//! client-declared total is never accepted.

use chrono::Utc;
use ladle_core::{CartId, MenuItemId, OrderId, OrderStatus, Price, UserId};
use sqlx::SqlitePool;
use sqlx::types::Json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::db::loyalty::LoyaltyRepository;
use crate::db::orders::ORDER_COLUMNS;
use crate::models::{CartItem, Order};

/// Failures of the order workflow.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The funding cart does not exist or belongs to another user.
    #[error("cart {0} not found for this user")]
    CartNotFound(CartId),

    /// The funding cart has no lines to convert.
    #[error("cart {0} is empty")]
    EmptyCart(CartId),

    /// A staged line references a menu item that no longer exists; the
    /// whole placement is rolled back.
    #[error("menu item {0} no longer exists")]
    MenuItemVanished(MenuItemId),

    /// The cart total overflowed the cent range.
    #[error("cart total out of range")]
    TotalOverflow,

    /// The repository layer failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

/// A cart line joined to its current menu price.
#[derive(Debug, sqlx::FromRow)]
struct PricedLine {
    price: Price,
    quantity: i64,
}

/// The order-placement workflow and status transitions.
pub struct OrderService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderService<'a> {
    /// Points credited per whole currency unit of a completed order.
    const POINTS_PER_UNIT: i64 = 1;

    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert a cart into an order.
    ///
    /// As one atomic unit: resolves the cart's lines against current menu
    /// prices, computes the total, inserts the order (status `preparing`),
    /// copies every staged line into `order_items`, and clears the cart.
    /// A failure at any step leaves no order, no order items, and the
    /// cart untouched.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::CartNotFound` if the cart is absent or owned
    /// by someone else, `OrderError::EmptyCart` if there is nothing to
    /// convert, and `OrderError::MenuItemVanished` if a staged line
    /// references a deleted menu item (the order-items foreign key fires
    /// mid-sequence and the transaction rolls back).
    pub async fn place_order(
        &self,
        user_id: UserId,
        cart_id: CartId,
    ) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let cart_exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM carts WHERE cart_id = ?1 AND user_id = ?2",
        )
        .bind(cart_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if cart_exists == 0 {
            return Err(OrderError::CartNotFound(cart_id));
        }

        // Every staged line, priced or not. A line whose menu item has
        // vanished must fail the placement, not silently drop.
        let staged = sqlx::query_as::<_, CartItem>(
            "SELECT cartitem_id, cart_id, menuitem_id, quantity, extra_toppings \
             FROM cart_items WHERE cart_id = ?1 ORDER BY cartitem_id",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if staged.is_empty() {
            return Err(OrderError::EmptyCart(cart_id));
        }

        let priced = sqlx::query_as::<_, PricedLine>(
            "SELECT m.price_cents AS price, ci.quantity \
             FROM cart_items ci \
             JOIN menu_items m ON ci.menuitem_id = m.menuitem_id \
             WHERE ci.cart_id = ?1",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        let total = priced
            .iter()
            .try_fold(Price::ZERO, |acc, line| {
                line.price
                    .checked_mul(line.quantity)
                    .and_then(|cost| acc.checked_add(cost))
            })
            .ok_or(OrderError::TotalOverflow)?;

        let now = Utc::now();
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (user_id, total_cents, order_status, created_at, updated_at) \
             VALUES (?1, ?2, 'preparing', ?3, ?3) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(total)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for line in &staged {
            sqlx::query(
                "INSERT INTO order_items (order_id, menuitem_id, quantity, extra_toppings) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(order.order_id)
            .bind(line.menuitem_id)
            .bind(line.quantity)
            .bind(Json(&line.extra_toppings))
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    OrderError::MenuItemVanished(line.menuitem_id)
                }
                _ => OrderError::from(e),
            })?;
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Set an order's status.
    ///
    /// Any target value is accepted; forward-only progression is policy,
    /// not enforcement. Returns `None` if the order does not exist.
    ///
    /// Transitioning into `completed` credits loyalty points afterwards,
    /// outside the transaction: accrual is a separate, later operation
    /// whose failure is logged, never propagated.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if a query fails.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderError> {
        let mut tx = self.pool.begin().await?;

        let previous = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT order_status FROM orders WHERE order_id = ?1",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(previous) = previous else {
            return Ok(None);
        };

        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET order_status = ?2, updated_at = ?3 WHERE order_id = ?1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if previous != OrderStatus::Completed && status == OrderStatus::Completed {
            if let Err(e) = self.credit_loyalty(&order).await {
                tracing::warn!(
                    order_id = %order.order_id,
                    user_id = %order.user_id,
                    error = %e,
                    "loyalty accrual failed after order completion"
                );
            }
        }

        Ok(Some(order))
    }

    /// Credit points for a completed order: one point per whole currency
    /// unit of the total.
    async fn credit_loyalty(&self, order: &Order) -> Result<(), RepositoryError> {
        let points = order.total_amount.whole_units() * Self::POINTS_PER_UNIT;
        if points == 0 {
            return Ok(());
        }

        LoyaltyRepository::new(self.pool)
            .add_points(order.user_id, points)
            .await
            .map(|_| ())
    }
}
