//! Health check

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<AppResponse<Value>> {
    ok(json!({ "status": "ok" }))
}
