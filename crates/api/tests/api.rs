//! Integration tests for the account, menu and cart endpoints.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{add_menu_item, create_cart, register_user, send, stage_item, test_app};

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _pool) = test_app().await;

    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_register_and_fetch_user() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/add-user",
        Some(json!({
            "name": "Amara",
            "email": "amara@example.com",
            "password": "hunter2hunter2",
            "allergies": ["peanuts"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Amara");
    assert_eq!(body["email"], "amara@example.com");
    assert_eq!(body["allergies"], json!(["peanuts"]));
    // The hash never leaves the server.
    assert!(body.get("password_hash").is_none());

    let user_id = body["user_id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["user_id"], user_id);
}

#[tokio::test]
async fn test_register_missing_fields_is_400() {
    let (app, pool) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/add-user",
        Some(json!({ "name": "No Email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));

    // Nothing was written.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_register_duplicate_email_is_409() {
    let (app, _pool) = test_app().await;
    register_user(&app, "First", "dup@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/users/add-user",
        Some(json!({
            "name": "Second",
            "email": "dup@example.com",
            "password": "hunter2hunter2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_missing_user_is_404() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(&app, "GET", "/users/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_user_partial() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Old Name", "update@example.com").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/update-user/{user_id}"),
        Some(json!({ "name": "New Name" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "New Name");
    // Untouched fields keep their values.
    assert_eq!(body["email"], "update@example.com");
}

#[tokio::test]
async fn test_delete_user_is_idempotent() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Gone", "gone@example.com").await;

    let (status, _) = send(&app, "DELETE", &format!("/users/delete-user/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    // Deleting again still succeeds.
    let (status, _) = send(&app, "DELETE", &format!("/users/delete-user/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success_and_failure() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Login", "login@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/login",
        Some(json!({ "email": "login@example.com", "password": "hunter2hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["message"], "login successful");

    let (status, body) = send(
        &app,
        "POST",
        "/users/login",
        Some(json!({ "email": "login@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // The failure response never discloses the user id.
    assert!(body.get("user_id").is_none());
}

#[tokio::test]
async fn test_login_unknown_email_matches_bad_password() {
    let (app, _pool) = test_app().await;
    register_user(&app, "Login", "known@example.com").await;

    let (status_unknown, body_unknown) = send(
        &app,
        "POST",
        "/users/login",
        Some(json!({ "email": "nobody@example.com", "password": "hunter2hunter2" })),
    )
    .await;
    let (status_wrong, body_wrong) = send(
        &app,
        "POST",
        "/users/login",
        Some(json!({ "email": "known@example.com", "password": "not-the-password" })),
    )
    .await;

    // Unknown account and bad password are indistinguishable.
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(body_unknown["error"], body_wrong["error"]);
}

// =============================================================================
// Menu items
// =============================================================================

#[tokio::test]
async fn test_menu_item_round_trip() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/menuitems/create-menuitem",
        Some(json!({
            "name": "Jollof",
            "price": 12.50,
            "nutritional_info": ["calories: 600"],
            "extra_toppings": ["chicken"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Jollof");
    assert_eq!(body["price"], "12.50");
    assert_eq!(body["nutritional_info"], json!(["calories: 600"]));
    assert_eq!(body["extra_toppings"], json!(["chicken"]));

    let id = body["menuitem_id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/menuitems/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["price"], "12.50");
}

#[tokio::test]
async fn test_menu_item_rejects_negative_price() {
    let (app, _pool) = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/menuitems/create-menuitem",
        Some(json!({ "name": "Broken", "price": -1.00 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Carts and cart items
// =============================================================================

#[tokio::test]
async fn test_create_cart_requires_existing_user() {
    let (app, _pool) = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/cart/create-cart",
        Some(json!({ "user_id": 424242 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_carts_for_user() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Carts", "carts@example.com").await;
    create_cart(&app, user_id).await;
    create_cart(&app, user_id).await;

    let (status, body) = send(&app, "GET", &format!("/cart/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    // A user with no carts reads as an empty list.
    let other = register_user(&app, "Empty", "empty@example.com").await;
    let (status, body) = send(&app, "GET", &format!("/cart/{other}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_cart_item_is_noop() {
    let (app, pool) = test_app().await;
    let user_id = register_user(&app, "Dup", "dupcart@example.com").await;
    let cart_id = create_cart(&app, user_id).await;
    let item_id = add_menu_item(&app, "Suya", "8.00").await;

    let (status, first) = send(
        &app,
        "POST",
        "/cartitems/create-cartitem",
        Some(json!({ "cart_id": cart_id, "menuitem_id": item_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Second staging of the same item answers 200 with the existing line.
    let (status, second) = send(
        &app,
        "POST",
        "/cartitems/create-cartitem",
        Some(json!({ "cart_id": cart_id, "menuitem_id": item_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cartitem_id"], second["cartitem_id"]);
    assert_eq!(second["quantity"], 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE cart_id = ?1")
        .bind(cart_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_create_cart_item_missing_field_writes_nothing() {
    let (app, pool) = test_app().await;
    let user_id = register_user(&app, "Missing", "missing@example.com").await;
    let cart_id = create_cart(&app, user_id).await;

    let (status, _) = send(
        &app,
        "POST",
        "/cartitems/create-cartitem",
        Some(json!({ "cart_id": cart_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_cart_total_cost() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Totals", "totals@example.com").await;
    let cart_id = create_cart(&app, user_id).await;
    let rice = add_menu_item(&app, "Rice", "10.00").await;
    let stew = add_menu_item(&app, "Stew", "5.00").await;

    stage_item(&app, cart_id, rice).await;
    stage_item(&app, cart_id, stew).await;

    // Bump rice to quantity 2: (10.00 * 2) + (5.00 * 1) = 25.00
    let (status, _) = send(
        &app,
        "PUT",
        "/cartitems/update-cartitem-quantity",
        Some(json!({ "cart_id": cart_id, "menuitem_id": rice, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/cartitems/cart-total-cost/{cart_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cart_value"], "25.00");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/cartitems/allcart-totalcost/{cart_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"], "25.00");
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_cart_totals_zero() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Zero", "zero@example.com").await;
    let cart_id = create_cart(&app, user_id).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/cartitems/cart-total-cost/{cart_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cart_value"], "0.00");
}

#[tokio::test]
async fn test_remove_cart_item_is_idempotent() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Remove", "remove@example.com").await;
    let cart_id = create_cart(&app, user_id).await;
    let item_id = add_menu_item(&app, "Moin Moin", "4.00").await;
    stage_item(&app, cart_id, item_id).await;

    let payload = json!({ "cart_id": cart_id, "menuitem_id": item_id });
    let (status, _) = send(&app, "DELETE", "/cartitems/remove-cartitem", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    // Removing the vanished line still reports success.
    let (status, _) = send(&app, "DELETE", "/cartitems/remove-cartitem", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_quantity_rejects_nonpositive() {
    let (app, _pool) = test_app().await;
    let user_id = register_user(&app, "Qty", "qty@example.com").await;
    let cart_id = create_cart(&app, user_id).await;
    let item_id = add_menu_item(&app, "Dodo", "3.50").await;
    stage_item(&app, cart_id, item_id).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/cartitems/update-cartitem-quantity",
        Some(json!({ "cart_id": cart_id, "menuitem_id": item_id, "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_cart() {
    let (app, pool) = test_app().await;
    let user_id = register_user(&app, "Clear", "clear@example.com").await;
    let cart_id = create_cart(&app, user_id).await;
    let a = add_menu_item(&app, "A", "1.00").await;
    let b = add_menu_item(&app, "B", "2.00").await;
    stage_item(&app, cart_id, a).await;
    stage_item(&app, cart_id, b).await;

    let (status, body) = send(&app, "DELETE", &format!("/cartitems/clear-cart/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 2);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE cart_id = ?1")
        .bind(cart_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
