//! Order route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Deserialize;

use ladle_core::{CartId, OrderId, OrderStatus, UserId};

use crate::{
    db::OrderRepository,
    error::{AppError, Result},
    models::Order,
    services::OrderService,
    state::AppState,
};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list))
        .route("/orders/{user_id}", get(list_for_user))
        .route("/orders/add-order/{user_id}", post(add_order))
        .route("/orders/update-order-status", put(update_status))
}

/// Request body for placing an order from a cart.
#[derive(Debug, Deserialize)]
pub struct AddOrderRequest {
    pub cart_id: Option<CartId>,
}

/// Request body for moving an order through its lifecycle.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub order_id: Option<OrderId>,
    pub order_status: Option<String>,
}

/// List every order in the store.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// List a user's orders.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_by_user(user_id)
        .await?;

    Ok(Json(orders))
}

/// Turn a user's cart into an order.
///
/// The whole conversion is one transaction: the total is computed from
/// current menu prices, the staged lines become order lines, and the
/// cart is emptied. If any step fails nothing is kept.
///
/// # Errors
///
/// Returns 400 if `cart_id` is missing or the cart is empty, 404 if the
/// cart does not belong to the user, 409 if a staged menu item no longer
/// exists.
pub async fn add_order(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(body): Json<AddOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let Some(cart_id) = body.cart_id else {
        return Err(AppError::BadRequest("cart_id is required".to_string()));
    };

    let order = OrderService::new(state.pool())
        .place_order(user_id, cart_id)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Move an order to a new status. Completing an order credits loyalty
/// points to its owner.
///
/// # Errors
///
/// Returns 400 for a missing field or unknown status value, 404 if the
/// order does not exist.
pub async fn update_status(
    State(state): State<AppState>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let (Some(order_id), Some(raw_status)) = (body.order_id, body.order_status) else {
        return Err(AppError::BadRequest(
            "order_id and order_status are required".to_string(),
        ));
    };

    let status: OrderStatus = raw_status
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown order status: {raw_status}")))?;

    let order = OrderService::new(state.pool())
        .set_status(order_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    Ok(Json(order))
}
