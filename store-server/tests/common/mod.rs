//! Shared test harness: a real server state over a temp-dir SQLite
//! database, driven through the router without binding a socket.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use store_server::core::{Config, Server, ServerState};
use store_server::db::repository::product;
use store_server::gateway::{self, GatewayConfig, GatewayMode};

pub const TEST_MERCHANT_KEY: &str = "gtKFFx";
pub const TEST_MERCHANT_SALT: &str = "eCwWELxi";
pub const SEED_ADMIN_EMAIL: &str = "root@example.com";
pub const SEED_ADMIN_PASSWORD: &str = "root-password";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    _tmp: tempfile::TempDir,
}

pub async fn spawn() -> TestApp {
    let tmp = tempfile::tempdir().expect("create tempdir");
    let mut config = Config::with_overrides(tmp.path().to_string_lossy(), 5000);
    config.gateway = GatewayConfig {
        merchant_key: TEST_MERCHANT_KEY.to_string(),
        merchant_salt: TEST_MERCHANT_SALT.to_string(),
        mode: GatewayMode::Test,
    };
    config.seed_admin_email = Some(SEED_ADMIN_EMAIL.to_string());
    config.seed_admin_password = Some(SEED_ADMIN_PASSWORD.to_string());

    let state = ServerState::initialize(config).await.expect("initialize state");
    let router = Server::build_router(state.clone());
    TestApp {
        router,
        state,
        _tmp: tmp,
    }
}

impl TestApp {
    /// Seed a catalog product directly through the repository.
    pub async fn seed_product(&self, name: &str, price_inr: &str, stock: i64) -> i64 {
        let created = product::create(
            &self.state.pool,
            shared::models::ProductCreate {
                name: name.to_string(),
                description: None,
                price_base: price_inr.to_string(),
                image_url: None,
                stock,
            },
        )
        .await
        .expect("seed product");
        created.id
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None, Some(body)).await
    }

    pub async fn post_json_auth(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put_json_auth(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete_auth(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).expect("serialize body")))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("route request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// POST a form-encoded gateway callback; returns the redirect Location.
    pub async fn post_callback(&self, uri: &str, fields: &HashMap<String, String>) -> (StatusCode, String) {
        let body = fields
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    shared::util::percent_encode(k),
                    shared::util::percent_encode(v)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("build callback request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("route callback");
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        (status, location)
    }

    /// Log the seeded superadmin in and return a bearer token.
    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post_json(
                "/api/admin/auth/login",
                serde_json::json!({
                    "email": SEED_ADMIN_EMAIL,
                    "password": SEED_ADMIN_PASSWORD,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "seed admin login failed: {body}");
        body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Build a correctly signed gateway callback payload for a
    /// previously initiated payment.
    pub fn signed_callback(
        &self,
        txnid: &str,
        amount: &str,
        productinfo: &str,
        firstname: &str,
        email: &str,
        order_id: i64,
        status: &str,
    ) -> HashMap<String, String> {
        let mut fields = HashMap::from([
            ("txnid".to_string(), txnid.to_string()),
            ("amount".to_string(), amount.to_string()),
            ("productinfo".to_string(), productinfo.to_string()),
            ("firstname".to_string(), firstname.to_string()),
            ("email".to_string(), email.to_string()),
            ("status".to_string(), status.to_string()),
            ("udf1".to_string(), order_id.to_string()),
            ("mihpayid".to_string(), format!("MIH-{txnid}")),
        ]);
        let hash = gateway::payment_response_hash(&self.state.config.gateway, &fields);
        fields.insert("hash".to_string(), hash);
        fields
    }
}
