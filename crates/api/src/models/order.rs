//! Order and order line models.

use chrono::{DateTime, Utc};
use ladle_core::{MenuItemId, OrderId, OrderItemId, OrderStatus, Price, UserId};
use serde::Serialize;

/// A confirmed, priced, status-tracked commitment derived from a cart.
///
/// `total_amount` is established solely by the placement workflow as
/// the sum over the order's items of price-at-copy-time times quantity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    /// Aliased from the `total_cents` column.
    pub total_amount: Price,
    pub order_status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable snapshot of a cart item at order-confirmation time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub orderitem_id: OrderItemId,
    pub order_id: OrderId,
    pub menuitem_id: MenuItemId,
    pub quantity: i64,
    #[sqlx(json)]
    pub extra_toppings: Vec<String>,
}
