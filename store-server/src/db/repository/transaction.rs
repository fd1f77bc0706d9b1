//! Gateway Transaction Repository
//!
//! Reconciliation looks transactions up by `txn_id` (UNIQUE), never by
//! order id; an order retried at the gateway owns several rows and only
//! the one named in the callback is touched.

use shared::models::{Currency, GatewayTransaction, TxnStatus};
use sqlx::SqlitePool;

use super::RepoResult;

const TXN_COLS: &str = "id, order_id, txn_id, gateway_payment_id, amount, currency, status, \
                        hash_sent, hash_received, raw_request, raw_response, created_at, \
                        updated_at";

/// New payment attempt, recorded when the gateway redirect is built.
#[derive(Debug, Clone)]
pub struct TxnInsert {
    pub order_id: i64,
    pub txn_id: String,
    pub amount: String,
    pub currency: Currency,
    pub hash_sent: String,
    pub raw_request: String,
}

pub async fn create(pool: &SqlitePool, data: TxnInsert) -> RepoResult<GatewayTransaction> {
    let now = shared::util::now_millis();
    let txn = sqlx::query_as::<_, GatewayTransaction>(&format!(
        "INSERT INTO gateway_transactions (order_id, txn_id, amount, currency, status, \
         hash_sent, raw_request, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 'pending', ?, ?, ?, ?) RETURNING {TXN_COLS}"
    ))
    .bind(data.order_id)
    .bind(&data.txn_id)
    .bind(&data.amount)
    .bind(data.currency)
    .bind(&data.hash_sent)
    .bind(&data.raw_request)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(txn)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<GatewayTransaction>> {
    let txns = sqlx::query_as::<_, GatewayTransaction>(&format!(
        "SELECT {TXN_COLS} FROM gateway_transactions ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(txns)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<GatewayTransaction>> {
    let txn = sqlx::query_as::<_, GatewayTransaction>(&format!(
        "SELECT {TXN_COLS} FROM gateway_transactions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(txn)
}

pub async fn find_by_txn_id(
    pool: &SqlitePool,
    txn_id: &str,
) -> RepoResult<Option<GatewayTransaction>> {
    let txn = sqlx::query_as::<_, GatewayTransaction>(&format!(
        "SELECT {TXN_COLS} FROM gateway_transactions WHERE txn_id = ?"
    ))
    .bind(txn_id)
    .fetch_optional(pool)
    .await?;
    Ok(txn)
}

pub async fn find_by_order(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Vec<GatewayTransaction>> {
    let txns = sqlx::query_as::<_, GatewayTransaction>(&format!(
        "SELECT {TXN_COLS} FROM gateway_transactions WHERE order_id = ? ORDER BY created_at DESC"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(txns)
}

/// Resolve a pending transaction exactly once (first writer wins).
///
/// The `status = 'pending'` guard makes redelivered callbacks no-ops:
/// `false` means the row was already terminal and the caller must skip
/// every downstream side effect (order transition, stock decrement).
#[allow(clippy::too_many_arguments)]
pub async fn resolve<'e, E>(
    executor: E,
    txn_id: &str,
    status: TxnStatus,
    gateway_payment_id: Option<&str>,
    hash_received: Option<&str>,
    raw_response: &str,
) -> RepoResult<bool>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE gateway_transactions SET status = ?, gateway_payment_id = ?, \
         hash_received = ?, raw_response = ?, updated_at = ? \
         WHERE txn_id = ? AND status = 'pending'",
    )
    .bind(status)
    .bind(gateway_payment_id)
    .bind(hash_received)
    .bind(raw_response)
    .bind(now)
    .bind(txn_id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}
