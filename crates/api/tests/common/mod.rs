//! Shared harness for API integration tests.
//!
//! Each test gets its own in-memory database with migrations applied and
//! drives the real router through `tower::ServiceExt::oneshot`.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use ladle_api::config::AppConfig;
use ladle_api::{AppState, app, db};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

/// Build the app against a fresh in-memory database.
pub async fn test_app() -> (Router, SqlitePool) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    // One connection keeps the in-memory database alive for the test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory sqlite");

    db::run_migrations(&pool).await.expect("migrations apply");

    let config = AppConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        request_timeout: Duration::from_secs(30),
        sentry_dsn: None,
    };

    let state = AppState::new(config, pool.clone());
    (app(state), pool)
}

/// Send one request through the router and decode the JSON response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("build request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router never errors");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Register a user and return their id.
pub async fn register_user(app: &Router, name: &str, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/users/add-user",
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": "hunter2hunter2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["user_id"].as_i64().expect("user_id in response")
}

/// Add a menu item and return its id.
pub async fn add_menu_item(app: &Router, name: &str, price: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/menuitems/create-menuitem",
        Some(serde_json::json!({ "name": name, "price": price })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add menu item failed: {body}");
    body["menuitem_id"].as_i64().expect("menuitem_id in response")
}

/// Open a cart for a user and return its id.
pub async fn create_cart(app: &Router, user_id: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/cart/create-cart",
        Some(serde_json::json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create cart failed: {body}");
    body["cart_id"].as_i64().expect("cart_id in response")
}

/// Stage a menu item into a cart.
pub async fn stage_item(app: &Router, cart_id: i64, menuitem_id: i64) {
    let (status, body) = send(
        app,
        "POST",
        "/cartitems/create-cartitem",
        Some(serde_json::json!({ "cart_id": cart_id, "menuitem_id": menuitem_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "stage item failed: {body}");
}
