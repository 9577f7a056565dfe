//! Loyalty points route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use ladle_core::UserId;

use crate::{
    db::LoyaltyRepository,
    error::{AppError, Result},
    models::LoyaltyAccount,
    state::AppState,
};

/// Build the loyalty router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/loyalty", get(list))
        .route("/loyalty/{user_id}", get(points_for_user))
        .route("/loyalty/add-points", post(add_points))
}

/// Request body for adjusting a loyalty balance. Negative points spend
/// from the balance.
#[derive(Debug, Deserialize)]
pub struct AddPointsRequest {
    pub user_id: Option<UserId>,
    pub points: Option<i64>,
}

/// List every loyalty account.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<LoyaltyAccount>>> {
    let accounts = LoyaltyRepository::new(state.pool()).list_all().await?;
    Ok(Json(accounts))
}

/// A user's points balance. Users with no account yet read as zero.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn points_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Value>> {
    let points = LoyaltyRepository::new(state.pool())
        .points_for_user(user_id)
        .await?
        .unwrap_or(0);

    Ok(Json(json!({ "points": points })))
}

/// Adjust a user's points balance, creating the account on first touch.
///
/// # Errors
///
/// Returns 400 if a field is missing or the adjustment would take the
/// balance below zero, 409 if the user does not exist.
pub async fn add_points(
    State(state): State<AppState>,
    Json(body): Json<AddPointsRequest>,
) -> Result<Json<LoyaltyAccount>> {
    let (Some(user_id), Some(points)) = (body.user_id, body.points) else {
        return Err(AppError::BadRequest(
            "user_id and points are required".to_string(),
        ));
    };

    let account = LoyaltyRepository::new(state.pool())
        .add_points(user_id, points)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("points balance cannot go below zero".to_string())
        })?;

    Ok(Json(account))
}
