//! User account route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use ladle_core::{Email, UserId};

use crate::{
    db::UserRepository,
    error::{AppError, Result},
    models::User,
    services::AuthService,
    state::AppState,
};

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list))
        .route("/users/{id}", get(get_one))
        .route("/users/add-user", post(add_user))
        .route("/users/update-user/{id}", put(update_user))
        .route("/users/delete-user/{id}", delete(delete_user))
        .route("/users/login", post(login))
}

/// Request body for registering a user.
#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
}

/// Request body for updating a user's profile. Omitted fields keep
/// their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub allergies: Option<Vec<String>>,
}

/// Request body for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: UserId,
}

/// List all users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list_all().await?;
    Ok(Json(users))
}

/// Get a single user by id.
///
/// # Errors
///
/// Returns 404 if no user exists for the id.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    Ok(Json(user))
}

/// Register a new user.
///
/// # Errors
///
/// Returns 400 if a required field is missing or invalid, 409 if the
/// email is already registered.
pub async fn add_user(
    State(state): State<AppState>,
    Json(body): Json<AddUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let (Some(name), Some(email), Some(password)) = (body.name, body.email, body.password) else {
        return Err(AppError::BadRequest(
            "name, email and password are required".to_string(),
        ));
    };

    let auth = AuthService::new(state.pool());
    let user = auth
        .register(&name, &email, &password, &body.allergies.unwrap_or_default())
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user's profile. Fields absent from the body are left as-is.
///
/// # Errors
///
/// Returns 404 if the user does not exist, 400 if the new email is
/// malformed, 409 if it is taken by another account.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let repo = UserRepository::new(state.pool());

    let current = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    let name = body.name.unwrap_or(current.name);
    let email = match body.email {
        Some(raw) => Email::parse(&raw).map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => current.email,
    };
    let allergies = body.allergies.unwrap_or(current.allergies);

    let user = repo
        .update(id, &name, &email, &allergies)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    Ok(Json(user))
}

/// Delete a user. Succeeds whether or not the account existed.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Value>> {
    UserRepository::new(state.pool()).delete(id).await?;
    Ok(Json(json!({ "message": "user deleted" })))
}

/// Authenticate a user by email and password.
///
/// # Errors
///
/// Returns 400 if email or password is missing, 401 for any credential
/// failure (the response never says which part was wrong).
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(AppError::BadRequest(
            "email and password are required".to_string(),
        ));
    };

    let auth = AuthService::new(state.pool());
    let user_id = auth.login(&email, &password).await?;

    Ok(Json(LoginResponse {
        message: "login successful".to_string(),
        user_id,
    }))
}
