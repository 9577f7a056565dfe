//! Cart line route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use ladle_core::{CartId, MenuItemId, Price};

use crate::{
    db::CartItemRepository,
    error::{AppError, Result},
    models::{CartItem, CartItemCost},
    state::AppState,
};

/// Build the cart items router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cartitems", get(list))
        .route("/cartitems/{cart_id}", get(list_for_cart))
        .route("/cartitems/create-cartitem", post(create_cart_item))
        .route("/cartitems/remove-cartitem", delete(remove_cart_item))
        .route(
            "/cartitems/update-cartitem-quantity",
            put(update_quantity),
        )
        .route("/cartitems/allcart-totalcost/{cart_id}", get(itemized_cost))
        .route("/cartitems/cart-total-cost/{cart_id}", get(total_cost))
        .route("/cartitems/clear-cart/{cart_id}", delete(clear_cart))
}

/// Request body for staging a menu item into a cart.
#[derive(Debug, Deserialize)]
pub struct CreateCartItemRequest {
    pub cart_id: Option<CartId>,
    pub menuitem_id: Option<MenuItemId>,
    #[serde(default)]
    pub extra_toppings: Option<Vec<String>>,
}

/// Request body addressing one cart line by its (cart, menu item) pair.
#[derive(Debug, Deserialize)]
pub struct CartItemRef {
    pub cart_id: Option<CartId>,
    pub menuitem_id: Option<MenuItemId>,
}

/// Request body for setting a line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub cart_id: Option<CartId>,
    pub menuitem_id: Option<MenuItemId>,
    pub quantity: Option<i64>,
}

/// Response for the itemized cart cost breakdown.
#[derive(Debug, Serialize)]
pub struct ItemizedCostResponse {
    pub items: Vec<CartItemCost>,
    pub total_cost: Price,
}

/// List every cart line in the store.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CartItem>>> {
    let items = CartItemRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// List the lines of one cart.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_for_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartItemRepository::new(state.pool())
        .list_by_cart(cart_id)
        .await?;

    Ok(Json(items))
}

/// Stage a menu item into a cart.
///
/// Staging the same menu item twice is a no-op: the second call answers
/// 200 with the existing line instead of 201.
///
/// # Errors
///
/// Returns 400 if `cart_id` or `menuitem_id` is missing, 409 if the cart
/// does not exist.
pub async fn create_cart_item(
    State(state): State<AppState>,
    Json(body): Json<CreateCartItemRequest>,
) -> Result<(StatusCode, Json<CartItem>)> {
    let (Some(cart_id), Some(menuitem_id)) = (body.cart_id, body.menuitem_id) else {
        return Err(AppError::BadRequest(
            "cart_id and menuitem_id are required".to_string(),
        ));
    };

    let repo = CartItemRepository::new(state.pool());
    let toppings = body.extra_toppings.unwrap_or_default();

    if let Some(item) = repo.create(cart_id, menuitem_id, &toppings).await? {
        return Ok((StatusCode::CREATED, Json(item)));
    }

    // Conflict no-op: hand back the line that was already there.
    let existing = repo
        .get_by_pair(cart_id, menuitem_id)
        .await?
        .ok_or_else(|| AppError::Internal("cart item vanished after conflict".to_string()))?;

    Ok((StatusCode::OK, Json(existing)))
}

/// Remove one line from a cart. Succeeds whether or not the line existed.
///
/// # Errors
///
/// Returns 400 if `cart_id` or `menuitem_id` is missing.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Json(body): Json<CartItemRef>,
) -> Result<Json<Value>> {
    let (Some(cart_id), Some(menuitem_id)) = (body.cart_id, body.menuitem_id) else {
        return Err(AppError::BadRequest(
            "cart_id and menuitem_id are required".to_string(),
        ));
    };

    CartItemRepository::new(state.pool())
        .remove(cart_id, menuitem_id)
        .await?;

    Ok(Json(json!({ "message": "cart item removed" })))
}

/// Set the quantity of one cart line.
///
/// # Errors
///
/// Returns 400 for a missing field or non-positive quantity, 404 if the
/// line does not exist.
pub async fn update_quantity(
    State(state): State<AppState>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Result<Json<CartItem>> {
    let (Some(cart_id), Some(menuitem_id), Some(quantity)) =
        (body.cart_id, body.menuitem_id, body.quantity)
    else {
        return Err(AppError::BadRequest(
            "cart_id, menuitem_id and quantity are required".to_string(),
        ));
    };

    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be a positive integer".to_string(),
        ));
    }

    let item = CartItemRepository::new(state.pool())
        .update_quantity(cart_id, menuitem_id, quantity)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cart item for cart {cart_id}")))?;

    Ok(Json(item))
}

/// Itemized breakdown of a cart with per-line and full totals. Prices
/// always come from the menu, never from the client.
///
/// # Errors
///
/// Returns 500 if the summed total overflows.
pub async fn itemized_cost(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> Result<Json<ItemizedCostResponse>> {
    let items = CartItemRepository::new(state.pool())
        .list_with_cost(cart_id)
        .await?;

    let total_cost = items
        .iter()
        .try_fold(Price::ZERO, |acc, line| acc.checked_add(line.total_price))
        .ok_or_else(|| AppError::Internal("cart total overflow".to_string()))?;

    Ok(Json(ItemizedCostResponse { items, total_cost }))
}

/// Total cost of a cart. An empty or unknown cart totals `0.00`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn total_cost(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> Result<Json<Value>> {
    let total = CartItemRepository::new(state.pool())
        .total_cost(cart_id)
        .await?;

    Ok(Json(json!({ "total_cart_value": total })))
}

/// Empty a cart of all its lines.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> Result<Json<Value>> {
    let removed = CartItemRepository::new(state.pool()).clear(cart_id).await?;

    Ok(Json(json!({ "message": "cart cleared", "removed": removed })))
}
