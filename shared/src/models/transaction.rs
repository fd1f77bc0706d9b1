//! Gateway Transaction Model
//!
//! One row per payment attempt. An order retried at the gateway has
//! several rows; callbacks reconcile against `txn_id`, never `order_id`.

use serde::{Deserialize, Serialize};

use super::Currency;

/// Transaction state machine: `pending -> success` or `pending -> failure`,
/// terminal either way (first writer wins on redelivered callbacks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum TxnStatus {
    Pending,
    Success,
    Failure,
}

impl std::fmt::Display for TxnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxnStatus::Pending => write!(f, "pending"),
            TxnStatus::Success => write!(f, "success"),
            TxnStatus::Failure => write!(f, "failure"),
        }
    }
}

/// Gateway transaction row.
///
/// `txn_id` is generated by this system and carries a UNIQUE index (the
/// reconciliation idempotency key). `gateway_payment_id` is assigned by the
/// gateway and only populated once a callback arrives. Raw outbound and
/// inbound parameter sets are kept as JSON text for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GatewayTransaction {
    pub id: i64,
    pub order_id: i64,
    pub txn_id: String,
    pub gateway_payment_id: Option<String>,
    pub amount: String,
    pub currency: Currency,
    pub status: TxnStatus,
    pub hash_sent: Option<String>,
    pub hash_received: Option<String>,
    pub raw_request: Option<String>,
    pub raw_response: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
