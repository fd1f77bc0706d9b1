//! HTTP API
//!
//! Public storefront endpoints live under `/api`; the back office lives
//! under `/api/admin` and is gated by the auth middleware (the router
//! itself stays flat, the gate is path-based).

pub mod admin;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api", public_router().nest("/admin", admin::router()))
}

fn public_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(checkout::router())
}
