//! Order and OrderItem Models

use serde::{Deserialize, Serialize};

use super::Currency;

/// Order lifecycle.
///
/// Gateway-driven transitions are `pending -> paid` and `pending -> failed`
/// only. Operators may override `paid`/`failed`/`cancelled` between each
/// other, but nothing ever transitions back to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Failed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Failed => write!(f, "failed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Order row. `amount_total` is in the settlement currency; `fx_rate` is
/// the INR-to-settlement rate snapshotted at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub currency: Currency,
    pub amount_total: String,
    pub fx_rate: String,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item. A priced snapshot taken at order creation; immutable,
/// independent of later product price changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price_each: String,
    pub currency: Currency,
    pub subtotal: String,
}
