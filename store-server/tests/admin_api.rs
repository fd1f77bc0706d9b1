//! Back-office API: auth gating, catalog management, order overrides
//! and admin account management.

mod common;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let app = common::spawn().await;

    let (status, body) = app.get("/api/admin/products").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) = app.get_auth("/api/admin/products", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email_alike() {
    let app = common::spawn().await;

    let (status, body) = app
        .post_json(
            "/api/admin/auth/login",
            json!({ "email": common::SEED_ADMIN_EMAIL, "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0006");
    let wrong_password_message = body["message"].clone();

    let (status, body) = app
        .post_json(
            "/api/admin/auth/login",
            json!({ "email": "nobody@example.com", "password": "irrelevant" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0006");
    // Same response either way; the error must not reveal which emails exist.
    assert_eq!(body["message"], wrong_password_message);
}

#[tokio::test]
async fn login_returns_token_and_me_reflects_it() {
    let app = common::spawn().await;
    let token = app.admin_token().await;

    let (status, body) = app.get_auth("/api/admin/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["email"], common::SEED_ADMIN_EMAIL);
    assert_eq!(body["data"]["role"], "superadmin");
}

#[tokio::test]
async fn product_crud_and_soft_delete() {
    let app = common::spawn().await;
    let token = app.admin_token().await;

    let (status, created) = app
        .post_json_auth(
            "/api/admin/products",
            &token,
            json!({
                "name": "Steel Bottle",
                "description": "1L insulated",
                "price_base": "499.00",
                "stock": 10,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let pid = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["is_active"], true);

    let (status, updated) = app
        .put_json_auth(
            &format!("/api/admin/products/{pid}"),
            &token,
            json!({ "price_base": "549.00", "stock": 7 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["data"]["price_base"], "549.00");
    assert_eq!(updated["data"]["stock"], 7);
    assert_eq!(updated["data"]["name"], "Steel Bottle");

    // Storefront sees it until it is deactivated.
    let (status, _) = app.get(&format!("/api/products/{pid}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete_auth(&format!("/api/admin/products/{pid}"), &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/products/{pid}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The back office still lists the tombstone.
    let (_, listed) = app.get_auth("/api/admin/products", &token).await;
    let found = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"] == pid && p["is_active"] == false);
    assert!(found, "deactivated product missing from admin list");
}

#[tokio::test]
async fn product_validation_rejects_bad_money_and_negative_stock() {
    let app = common::spawn().await;
    let token = app.admin_token().await;

    for body in [
        json!({ "name": "X", "price_base": "12.999", "stock": 1 }),
        json!({ "name": "X", "price_base": "-5.00", "stock": 1 }),
        json!({ "name": "X", "price_base": "abc", "stock": 1 }),
        json!({ "name": "X", "price_base": "5.00", "stock": -1 }),
        json!({ "name": "   ", "price_base": "5.00", "stock": 1 }),
    ] {
        let (status, resp) = app.post_json_auth("/api/admin/products", &token, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{resp}");
        assert_eq!(resp["code"], "E0002");
    }
}

#[tokio::test]
async fn order_status_override_never_returns_to_pending() {
    let app = common::spawn().await;
    let token = app.admin_token().await;
    let pid = app.seed_product("Widget", "100.00", 5).await;

    let (_, created) = app
        .post_json(
            "/api/checkout/create",
            json!({
                "name": "Asha Verma",
                "email": "asha@example.com",
                "phone": "9876543210",
                "shipping_address": "22 Marine Drive, Mumbai 400002",
                "currency": "INR",
                "items": [{ "product_id": pid, "quantity": 1 }],
            }),
        )
        .await;
    let order_id = created["data"]["order"]["id"].as_i64().unwrap();

    let (status, body) = app
        .put_json_auth(
            &format!("/api/admin/orders/{order_id}/status"),
            &token,
            json!({ "status": "cancelled" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "cancelled");

    let (status, body) = app
        .put_json_auth(
            &format!("/api/admin/orders/{order_id}/status"),
            &token,
            json!({ "status": "pending" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn user_management_is_superadmin_only() {
    let app = common::spawn().await;
    let super_token = app.admin_token().await;

    let (status, created) = app
        .post_json_auth(
            "/api/admin/users",
            &super_token,
            json!({ "email": "ops@example.com", "password": "plain-ops-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    assert_eq!(created["data"]["role"], "admin");
    assert!(created["data"].get("password_hash").is_none());

    // The plain admin can use the back office but not manage accounts.
    let (_, login) = app
        .post_json(
            "/api/admin/auth/login",
            json!({ "email": "ops@example.com", "password": "plain-ops-pass" }),
        )
        .await;
    let ops_token = login["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = app.get_auth("/api/admin/products", &ops_token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get_auth("/api/admin/users", &ops_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
}

#[tokio::test]
async fn duplicate_admin_email_conflicts_and_self_delete_is_rejected() {
    let app = common::spawn().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .post_json_auth(
            "/api/admin/users",
            &token,
            json!({ "email": common::SEED_ADMIN_EMAIL, "password": "another-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (_, me) = app.get_auth("/api/admin/auth/me", &token).await;
    let my_id = me["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .delete_auth(&format!("/api/admin/users/{my_id}"), &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn dashboard_reflects_orders_and_transactions() {
    let app = common::spawn().await;
    let token = app.admin_token().await;
    let pid = app.seed_product("Widget", "250.00", 10).await;

    let (_, created) = app
        .post_json(
            "/api/checkout/create",
            json!({
                "name": "Asha Verma",
                "email": "asha@example.com",
                "phone": "9876543210",
                "shipping_address": "22 Marine Drive, Mumbai 400002",
                "currency": "INR",
                "items": [{ "product_id": pid, "quantity": 2 }],
            }),
        )
        .await;
    let order_id = created["data"]["order"]["id"].as_i64().unwrap();
    app.post_json("/api/checkout/gateway-init", json!({ "order_id": order_id }))
        .await;

    let (status, body) = app.get_auth("/api/admin/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let stats = &body["data"];
    assert_eq!(stats["total_products"], 1);
    assert_eq!(stats["total_orders"], 1);
    assert_eq!(stats["pending_orders"], 1);
    assert_eq!(stats["paid_orders"], 0);
    assert_eq!(stats["total_transactions"], 1);
}
