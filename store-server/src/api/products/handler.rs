//! Public catalog handlers. Deactivated products are invisible here.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::Product;

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::{AppError, AppResponse, ok};

pub async fn list_products(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<Product>>>, AppError> {
    let products = product::find_all_active(&state.pool).await?;
    Ok(ok(products))
}

pub async fn get_product(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<Product>>, AppError> {
    let found = product::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(ok(found))
}
