//! Menu item route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use ladle_core::{MenuItemId, Price};

use crate::{
    db::MenuItemRepository,
    error::{AppError, Result},
    models::MenuItem,
    state::AppState,
};

/// Build the menu items router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menuitems", get(list))
        .route("/menuitems/{id}", get(get_one))
        .route("/menuitems/create-menuitem", post(create_menu_item))
}

/// Request body for adding a menu item.
#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub nutritional_info: Option<Vec<String>>,
    #[serde(default)]
    pub extra_toppings: Option<Vec<String>>,
}

/// List the full menu.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>> {
    let items = MenuItemRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// Get a single menu item by id.
///
/// # Errors
///
/// Returns 404 if no menu item exists for the id.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<MenuItem>> {
    let item = MenuItemRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;

    Ok(Json(item))
}

/// Add a menu item to the catalog.
///
/// # Errors
///
/// Returns 400 if name or price is missing, or the price is negative or
/// carries more than two decimal places.
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(body): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let (Some(name), Some(price)) = (body.name, body.price) else {
        return Err(AppError::BadRequest("name and price are required".to_string()));
    };

    let price = Price::try_from(price).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let item = MenuItemRepository::new(state.pool())
        .create(
            &name,
            price,
            &body.nutritional_info.unwrap_or_default(),
            &body.extra_toppings.unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}
