//! Row models for the Ladle database.
//!
//! Each model mirrors one table and derives `sqlx::FromRow` so repositories
//! can use the runtime `query_as` API. String collections live in JSON
//! columns (`#[sqlx(json)]`); monetary columns are aliased onto [`Price`]
//! fields in the repository queries.
//!
//! [`Price`]: ladle_core::Price

pub mod cart;
pub mod loyalty;
pub mod menu_item;
pub mod order;
pub mod user;

pub use cart::{Cart, CartItem, CartItemCost};
pub use loyalty::LoyaltyAccount;
pub use menu_item::MenuItem;
pub use order::{Order, OrderItem};
pub use user::User;
