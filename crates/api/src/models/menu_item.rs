//! Menu item model.

use chrono::{DateTime, Utc};
use ladle_core::{MenuItemId, Price};
use serde::Serialize;

/// A catalog entry.
///
/// Price changes do not retroactively affect past orders: order items
/// snapshot quantity and toppings, and order totals are fixed at placement.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MenuItem {
    pub menuitem_id: MenuItemId,
    pub name: String,
    /// Aliased from the `price_cents` column.
    pub price: Price,
    #[sqlx(json)]
    pub nutritional_info: Vec<String>,
    #[sqlx(json)]
    pub extra_toppings: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
