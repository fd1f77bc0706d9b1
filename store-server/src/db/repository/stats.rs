//! Dashboard statistics (read-only aggregates)

use std::str::FromStr;

use rust_decimal::Decimal;
use shared::client::DashboardStats;
use shared::models::Currency;
use shared::money::fmt_money;
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn dashboard_stats(pool: &SqlitePool) -> RepoResult<DashboardStats> {
    let total_products =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(pool)
            .await?;

    let (total_orders, pending_orders, paid_orders, failed_orders) =
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE status = 'pending'), \
                    COUNT(*) FILTER (WHERE status = 'paid'), \
                    COUNT(*) FILTER (WHERE status = 'failed') \
             FROM orders",
        )
        .fetch_one(pool)
        .await?;

    let (total_transactions, successful_transactions, failed_transactions) =
        sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE status = 'success'), \
                    COUNT(*) FILTER (WHERE status = 'failure') \
             FROM gateway_transactions",
        )
        .fetch_one(pool)
        .await?;

    // Money columns are decimal strings; sum with Decimal rather than
    // SQLite float arithmetic.
    let paid_totals = sqlx::query_as::<_, (String, Currency)>(
        "SELECT amount_total, currency FROM orders WHERE status = 'paid'",
    )
    .fetch_all(pool)
    .await?;

    let mut revenue_inr = Decimal::ZERO;
    let mut revenue_usd = Decimal::ZERO;
    for (amount, currency) in paid_totals {
        let amount = Decimal::from_str(&amount).unwrap_or_default();
        match currency {
            Currency::Inr => revenue_inr += amount,
            Currency::Usd => revenue_usd += amount,
        }
    }

    Ok(DashboardStats {
        total_products,
        total_orders,
        total_transactions,
        pending_orders,
        paid_orders,
        failed_orders,
        revenue_inr: fmt_money(revenue_inr),
        revenue_usd: fmt_money(revenue_usd),
        successful_transactions,
        failed_transactions,
    })
}
