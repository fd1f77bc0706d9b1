//! Checkout endpoints: order creation, gateway handoff, gateway callbacks

pub mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/checkout/create", post(handler::create))
        .route("/checkout/gateway-init", post(handler::gateway_init))
        .route(
            "/checkout/gateway-callback/success",
            post(handler::gateway_success),
        )
        .route(
            "/checkout/gateway-callback/failure",
            post(handler::gateway_failure),
        )
}
