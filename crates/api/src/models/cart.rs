//! Cart and cart line models.

use chrono::{DateTime, Utc};
use ladle_core::{CartId, CartItemId, MenuItemId, Price, UserId};
use serde::Serialize;

/// A user's staging area for menu selections.
///
/// Exists from creation until order placement clears its items; the row
/// itself persists, empty. A user may hold more than one cart.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Cart {
    pub cart_id: CartId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One staged line in a cart, unique per (cart, menu item) pair.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItem {
    pub cartitem_id: CartItemId,
    pub cart_id: CartId,
    pub menuitem_id: MenuItemId,
    pub quantity: i64,
    #[sqlx(json)]
    pub extra_toppings: Vec<String>,
}

/// A cart line joined to its menu item, with the line cost computed
/// store-side as `price * quantity`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItemCost {
    pub cartitem_id: CartItemId,
    pub name: String,
    pub price: Price,
    pub quantity: i64,
    pub total_price: Price,
}
