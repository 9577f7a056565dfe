//! Order line route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use ladle_core::{MenuItemId, OrderId};

use crate::{
    db::OrderItemRepository,
    error::{AppError, Result},
    models::OrderItem,
    state::AppState,
};

/// Build the order items router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orderitems", get(list))
        .route("/orderitems/{order_id}", get(list_for_order))
        .route("/orderitems/create-orderitem", post(create_order_item))
}

/// Request body for appending a line to an existing order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderItemRequest {
    pub order_id: Option<OrderId>,
    pub menuitem_id: Option<MenuItemId>,
    pub quantity: Option<i64>,
    #[serde(default)]
    pub extra_toppings: Option<Vec<String>>,
}

/// List every order line in the store.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderItem>>> {
    let items = OrderItemRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// List the lines of one order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Vec<OrderItem>>> {
    let items = OrderItemRepository::new(state.pool())
        .list_by_order(order_id)
        .await?;

    Ok(Json(items))
}

/// Append a line to an existing order. The normal path creates order
/// lines atomically inside order placement; this endpoint covers manual
/// corrections.
///
/// # Errors
///
/// Returns 400 for a missing field or non-positive quantity, 409 if the
/// order or menu item does not exist.
pub async fn create_order_item(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderItemRequest>,
) -> Result<(StatusCode, Json<OrderItem>)> {
    let (Some(order_id), Some(menuitem_id)) = (body.order_id, body.menuitem_id) else {
        return Err(AppError::BadRequest(
            "order_id and menuitem_id are required".to_string(),
        ));
    };

    let quantity = body.quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be a positive integer".to_string(),
        ));
    }

    let item = OrderItemRepository::new(state.pool())
        .create(
            order_id,
            menuitem_id,
            quantity,
            &body.extra_toppings.unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}
