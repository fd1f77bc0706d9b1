//! Order Repository
//!
//! Order + items are written in one transaction: a failed item insert
//! rolls the whole order back, never leaving a partial order behind.

use shared::models::{Currency, Order, OrderItem, OrderStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const ORDER_COLS: &str = "id, order_number, name, email, phone, shipping_address, \
                          billing_address, currency, amount_total, fx_rate, status, \
                          created_at, updated_at";

const ITEM_COLS: &str = "id, order_id, product_id, quantity, price_each, currency, subtotal";

/// New order header, priced and ready to persist.
#[derive(Debug, Clone)]
pub struct OrderInsert {
    pub order_number: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub currency: Currency,
    pub amount_total: String,
    pub fx_rate: String,
}

/// New order line, priced in the order's settlement currency.
#[derive(Debug, Clone)]
pub struct OrderItemInsert {
    pub product_id: i64,
    pub quantity: i64,
    pub price_each: String,
    pub subtotal: String,
}

/// Insert the order and all its items atomically. Returns the stored
/// order (status `pending`) and its priced items.
pub async fn create_with_items(
    pool: &SqlitePool,
    order: OrderInsert,
    items: Vec<OrderItemInsert>,
) -> RepoResult<(Order, Vec<OrderItem>)> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let created: Order = sqlx::query_as(&format!(
        "INSERT INTO orders (order_number, name, email, phone, shipping_address, \
         billing_address, currency, amount_total, fx_rate, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?) RETURNING {ORDER_COLS}"
    ))
    .bind(&order.order_number)
    .bind(&order.name)
    .bind(&order.email)
    .bind(&order.phone)
    .bind(&order.shipping_address)
    .bind(&order.billing_address)
    .bind(order.currency)
    .bind(&order.amount_total)
    .bind(&order.fx_rate)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let mut created_items = Vec::with_capacity(items.len());
    for item in &items {
        let row: OrderItem = sqlx::query_as(&format!(
            "INSERT INTO order_items (order_id, product_id, quantity, price_each, currency, \
             subtotal) VALUES (?, ?, ?, ?, ?, ?) RETURNING {ITEM_COLS}"
        ))
        .bind(created.id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(&item.price_each)
        .bind(order.currency)
        .bind(&item.subtotal)
        .fetch_one(&mut *tx)
        .await?;
        created_items.push(row);
    }

    tx.commit().await?;
    Ok((created, created_items))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLS} FROM orders ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

pub async fn find_by_number(pool: &SqlitePool, order_number: &str) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLS} FROM orders WHERE order_number = ?"
    ))
    .bind(order_number)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn items_for_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLS} FROM order_items WHERE order_id = ? ORDER BY id"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Order item joined with product display fields. The product may be
/// tombstoned; display fields still resolve.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItemWithProduct {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price_each: String,
    pub currency: Currency,
    pub subtotal: String,
    pub product_name: Option<String>,
    pub product_image_url: Option<String>,
}

pub async fn items_with_products(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Vec<OrderItemWithProduct>> {
    let items = sqlx::query_as::<_, OrderItemWithProduct>(
        "SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price_each, oi.currency, \
                oi.subtotal, p.name AS product_name, p.image_url AS product_image_url \
         FROM order_items oi \
         LEFT JOIN products p ON p.id = oi.product_id \
         WHERE oi.order_id = ? ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Administrative status override (no precondition on the current status).
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? RETURNING {ORDER_COLS}"
    ))
    .bind(status)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    order.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Gateway-driven transition: only applies while the order is still
/// `pending`. Returns `false` if the order was missing or already
/// resolved (a redelivered callback must not flip a settled order).
pub async fn resolve_status<'e, E>(executor: E, id: i64, status: OrderStatus) -> RepoResult<bool>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = 'pending'",
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}
