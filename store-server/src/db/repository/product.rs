//! Product Repository

use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const SELECT_COLS: &str = "id, name, description, price_base, image_url, stock, is_active, \
                           created_at, updated_at";

/// Active (storefront-visible) products, newest first.
pub async fn find_all_active(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {SELECT_COLS} FROM products WHERE is_active = 1 ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// All products including tombstoned ones (admin listing).
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {SELECT_COLS} FROM products ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {SELECT_COLS} FROM products WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (name, description, price_base, image_url, stock, is_active, \
         created_at, updated_at) VALUES (?, ?, ?, ?, ?, 1, ?, ?) RETURNING {SELECT_COLS}"
    ))
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.price_base)
    .bind(&data.image_url)
    .bind(data.stock)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(product)
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET \
             name = COALESCE(?1, name), \
             description = COALESCE(?2, description), \
             price_base = COALESCE(?3, price_base), \
             image_url = COALESCE(?4, image_url), \
             stock = COALESCE(?5, stock), \
             is_active = COALESCE(?6, is_active), \
             updated_at = ?7 \
         WHERE id = ?8 RETURNING {SELECT_COLS}"
    ))
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.price_base)
    .bind(&data.image_url)
    .bind(data.stock)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    product.ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Soft delete: tombstone the product so historical order items keep a
/// valid reference.
pub async fn deactivate(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE products SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}

/// Atomic conditional stock decrement.
///
/// The `stock >= qty` guard plus the affected-row check closes the
/// check-then-act race between concurrent reconciliations: the decrement
/// either applies in full or not at all, and stock never goes negative.
/// Returns `false` when stock was insufficient.
pub async fn decrement_stock<'e, E>(executor: E, product_id: i64, qty: i64) -> RepoResult<bool>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE products SET stock = stock - ?1, updated_at = ?2 \
         WHERE id = ?3 AND stock >= ?1",
    )
    .bind(qty)
    .bind(now)
    .bind(product_id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Clamp stock to zero (oversell fallback, see the reconciler).
pub async fn zero_stock<'e, E>(executor: E, product_id: i64) -> RepoResult<()>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    sqlx::query("UPDATE products SET stock = 0, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(product_id)
        .execute(executor)
        .await?;
    Ok(())
}
