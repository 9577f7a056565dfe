//! Cart route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use ladle_core::UserId;

use crate::{
    db::CartRepository,
    error::{AppError, Result},
    models::Cart,
    state::AppState,
};

/// Build the carts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(list))
        .route("/cart/{user_id}", get(list_for_user))
        .route("/cart/create-cart", post(create_cart))
}

/// Request body for creating a cart.
#[derive(Debug, Deserialize)]
pub struct CreateCartRequest {
    pub user_id: Option<UserId>,
}

/// List every cart in the store.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Cart>>> {
    let carts = CartRepository::new(state.pool()).list_all().await?;
    Ok(Json(carts))
}

/// List the carts belonging to a user. A user with no carts gets an
/// empty list, not a 404.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Cart>>> {
    let carts = CartRepository::new(state.pool())
        .list_by_user(user_id)
        .await?;

    Ok(Json(carts))
}

/// Open a new cart for a user.
///
/// # Errors
///
/// Returns 400 if `user_id` is missing, 409 if the user does not exist.
pub async fn create_cart(
    State(state): State<AppState>,
    Json(body): Json<CreateCartRequest>,
) -> Result<(StatusCode, Json<Cart>)> {
    let Some(user_id) = body.user_id else {
        return Err(AppError::BadRequest("user_id is required".to_string()));
    };

    let cart = CartRepository::new(state.pool()).create(user_id).await?;

    Ok((StatusCode::CREATED, Json(cart)))
}
