//! Catalog management
//!
//! Deletion is a soft deactivate: order items keep their product
//! reference, the storefront just stops listing it.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::validation::{
    self, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN,
};
use crate::utils::{AppError, AppResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
}

async fn list_products(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<Product>>>, AppError> {
    let products = product::find_all(&state.pool).await?;
    Ok(ok(products))
}

async fn create_product(
    State(state): State<ServerState>,
    Json(data): Json<ProductCreate>,
) -> Result<Json<AppResponse<Product>>, AppError> {
    validate_create(&data)?;
    let created = product::create(&state.pool, data).await?;
    tracing::info!(product_id = created.id, name = %created.name, "Product created");
    Ok(ok(created))
}

async fn update_product(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(data): Json<ProductUpdate>,
) -> Result<Json<AppResponse<Product>>, AppError> {
    validate_update(&data)?;
    let updated = product::update(&state.pool, id, data).await?;
    Ok(ok(updated))
}

async fn delete_product(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<()>>, AppError> {
    product::deactivate(&state.pool, id).await?;
    tracing::info!(product_id = id, "Product deactivated");
    Ok(ok(()))
}

fn validate_create(data: &ProductCreate) -> Result<(), AppError> {
    validation::validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validation::validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validation::validate_optional_text(&data.image_url, "imageUrl", MAX_URL_LEN)?;
    validation::validate_money(&data.price_base, "price")?;
    validation::validate_quantity(data.stock, "stock")?;
    Ok(())
}

fn validate_update(data: &ProductUpdate) -> Result<(), AppError> {
    if let Some(name) = &data.name {
        validation::validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validation::validate_optional_text(&data.image_url, "imageUrl", MAX_URL_LEN)?;
    if let Some(price) = &data.price_base {
        validation::validate_money(price, "price")?;
    }
    if let Some(stock) = data.stock {
        validation::validate_quantity(stock, "stock")?;
    }
    Ok(())
}
