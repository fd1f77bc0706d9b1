//! Gateway transaction inspection (read-only)

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use shared::models::GatewayTransaction;

use crate::core::ServerState;
use crate::db::repository::transaction;
use crate::utils::{AppError, AppResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/{id}", get(get_transaction))
}

async fn list_transactions(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<GatewayTransaction>>>, AppError> {
    let txns = transaction::find_all(&state.pool).await?;
    Ok(ok(txns))
}

async fn get_transaction(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<GatewayTransaction>>, AppError> {
    let txn = transaction::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Transaction {id}")))?;
    Ok(ok(txn))
}
