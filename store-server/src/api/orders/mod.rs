//! Public order lookup (used by the payment landing pages)

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders/{id}", get(handler::get_order))
        .route("/orders/number/{order_number}", get(handler::get_order_by_number))
}
