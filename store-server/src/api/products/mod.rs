//! Public product catalog

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/products", get(handler::list_products))
        .route("/products/{id}", get(handler::get_product))
}
