//! HTTP route handlers.
//!
//! Each resource gets its own module with a `router()` builder; [`routes`]
//! merges them into the application router. The surface:
//!
//! | Resource    | Paths                                                        |
//! |-------------|--------------------------------------------------------------|
//! | users       | `GET /users`, `GET /users/{id}`, `POST /users/add-user`, `PUT /users/update-user/{id}`, `DELETE /users/delete-user/{id}`, `POST /users/login` |
//! | menu items  | `GET /menuitems`, `GET /menuitems/{id}`, `POST /menuitems/create-menuitem` |
//! | carts       | `GET /cart`, `GET /cart/{user_id}`, `POST /cart/create-cart` |
//! | cart items  | `GET /cartitems`, `GET /cartitems/{cart_id}`, `POST /cartitems/create-cartitem`, `DELETE /cartitems/remove-cartitem`, `PUT /cartitems/update-cartitem-quantity`, `GET /cartitems/allcart-totalcost/{cart_id}`, `GET /cartitems/cart-total-cost/{cart_id}`, `DELETE /cartitems/clear-cart/{cart_id}` |
//! | orders      | `GET /orders`, `GET /orders/{user_id}`, `POST /orders/add-order/{user_id}`, `PUT /orders/update-order-status` |
//! | order items | `GET /orderitems`, `GET /orderitems/{order_id}`, `POST /orderitems/create-orderitem` |
//! | loyalty     | `GET /loyalty`, `GET /loyalty/{user_id}`, `POST /loyalty/add-points` |

use axum::Router;

use crate::state::AppState;

pub mod cart_items;
pub mod carts;
pub mod loyalty;
pub mod menu_items;
pub mod order_items;
pub mod orders;
pub mod users;

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(menu_items::router())
        .merge(carts::router())
        .merge(cart_items::router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(loyalty::router())
}
