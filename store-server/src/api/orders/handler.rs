//! Order detail handler, shared by the landing pages and the back office.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::{OrderDetailResponse, OrderItemDetail};
use shared::models::OrderItem;

use crate::core::ServerState;
use crate::db::repository::{order, transaction};
use crate::utils::{AppError, AppResponse, ok};

pub async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<OrderDetailResponse>>, AppError> {
    Ok(ok(order_detail(&state, id).await?))
}

/// Lookup by the customer-facing order number (order confirmations
/// carry the number, not the row id).
pub async fn get_order_by_number(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> Result<Json<AppResponse<OrderDetailResponse>>, AppError> {
    let found = order::find_by_number(&state.pool, &order_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_number}")))?;
    Ok(ok(order_detail(&state, found.id).await?))
}

/// Assemble the order with its priced items and payment attempts.
pub(crate) async fn order_detail(
    state: &ServerState,
    id: i64,
) -> Result<OrderDetailResponse, AppError> {
    let found = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    let items = order::items_with_products(&state.pool, id).await?;
    let transactions = transaction::find_by_order(&state.pool, id).await?;

    let items = items
        .into_iter()
        .map(|row| OrderItemDetail {
            item: OrderItem {
                id: row.id,
                order_id: row.order_id,
                product_id: row.product_id,
                quantity: row.quantity,
                price_each: row.price_each,
                currency: row.currency,
                subtotal: row.subtotal,
            },
            product_name: row.product_name,
            product_image_url: row.product_image_url,
        })
        .collect();

    Ok(OrderDetailResponse {
        order: found,
        items,
        transactions,
    })
}
