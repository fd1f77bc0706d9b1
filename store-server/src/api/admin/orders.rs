//! Order management
//!
//! Operators may override terminal statuses (refunds, manual capture
//! checks) but nothing ever moves an order back to `pending`; that
//! state belongs to the gateway alone.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;
use shared::client::OrderDetailResponse;
use shared::models::{Order, OrderStatus};

use crate::api::orders::handler::order_detail;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::{AppError, AppResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", put(update_status))
}

async fn list_orders(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<Order>>>, AppError> {
    let orders = order::find_all(&state.pool).await?;
    Ok(ok(orders))
}

async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<OrderDetailResponse>>, AppError> {
    Ok(ok(order_detail(&state, id).await?))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<AppResponse<Order>>, AppError> {
    if body.status == OrderStatus::Pending {
        return Err(AppError::validation("orders cannot be moved back to pending"));
    }
    let updated = order::update_status(&state.pool, id, body.status).await?;
    tracing::info!(order_id = id, status = %body.status, "Order status overridden");
    Ok(ok(updated))
}
