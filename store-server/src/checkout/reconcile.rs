//! Gateway callback reconciliation
//!
//! Callbacks arrive over the open internet and may be forged, replayed
//! or redelivered. Everything here funnels into one conditional state
//! transition: the transaction and order rows only move out of
//! `pending` once, and the stock decrement rides inside that same
//! database transaction. A redelivered or late callback observes
//! `rows_affected == 0` and skips every side effect.

use std::collections::HashMap;
use std::sync::Arc;

use shared::models::{OrderStatus, TxnStatus};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::core::config::Config;
use crate::db::repository::{order, product, transaction};
use crate::gateway::{self, GATEWAY_SUCCESS_STATUS};
use crate::utils::error::AppError;

/// What the callback handler needs to build the browser redirect.
#[derive(Debug, Clone)]
pub struct CallbackOutcome {
    pub order_id: Option<i64>,
    pub paid: bool,
    pub error: Option<String>,
}

/// Applies gateway callbacks. Never surfaces errors to the gateway;
/// the shopper's browser is always redirected to a landing page and
/// failures are logged server-side.
#[derive(Clone)]
pub struct Reconciler {
    pool: SqlitePool,
    config: Arc<Config>,
}

impl Reconciler {
    pub fn new(pool: SqlitePool, config: Arc<Config>) -> Self {
        Self { pool, config }
    }

    /// Handle the gateway's success callback.
    ///
    /// "Success" names the endpoint, not the outcome: the payload is
    /// only trusted after its signature verifies and its status field
    /// reads `success`. Anything else resolves the attempt as failed.
    pub async fn handle_success(&self, raw: HashMap<String, String>) -> CallbackOutcome {
        let verified = gateway::verify_response_hash(&self.config.gateway, &raw);
        let reported_success = raw.get("status").map(String::as_str) == Some(GATEWAY_SUCCESS_STATUS);
        let captured = verified && reported_success;

        let err_msg = if captured {
            None
        } else if !verified {
            warn!(txnid = raw.get("txnid").map(String::as_str), "callback signature mismatch");
            Some("signature verification failed".to_string())
        } else {
            Some(format!(
                "gateway reported status {}",
                raw.get("status").map(String::as_str).unwrap_or("(none)")
            ))
        };
        self.apply(raw, captured, err_msg).await
    }

    /// Handle the gateway's failure callback. The attempt is resolved
    /// as failed without signature verification; a forged failure can
    /// at worst fail an order the shopper can retry.
    pub async fn handle_failure(&self, raw: HashMap<String, String>) -> CallbackOutcome {
        let err_msg = raw
            .get("error_Message")
            .filter(|m| !m.is_empty())
            .cloned()
            .or_else(|| Some("Payment failed".to_string()));
        self.apply(raw, false, err_msg).await
    }

    async fn apply(
        &self,
        raw: HashMap<String, String>,
        captured: bool,
        err_msg: Option<String>,
    ) -> CallbackOutcome {
        // Hint for the landing page even when the attempt row is gone.
        let udf1_order = raw.get("udf1").and_then(|v| v.parse::<i64>().ok());
        match self.apply_inner(&raw, captured).await {
            Ok(order_id) => CallbackOutcome {
                order_id: order_id.or(udf1_order),
                paid: captured,
                error: err_msg,
            },
            Err(e) => {
                error!(error = %e, "callback reconciliation failed");
                CallbackOutcome {
                    order_id: udf1_order,
                    paid: false,
                    error: Some("payment could not be reconciled".to_string()),
                }
            }
        }
    }

    async fn apply_inner(
        &self,
        raw: &HashMap<String, String>,
        captured: bool,
    ) -> Result<Option<i64>, AppError> {
        let txn_id = raw.get("txnid").map(String::as_str).unwrap_or_default();
        let txn = transaction::find_by_txn_id(&self.pool, txn_id).await?;
        let order_id = match &txn {
            Some(t) => Some(t.order_id),
            None => {
                warn!(txnid = txn_id, "callback for unknown transaction");
                raw.get("udf1").and_then(|v| v.parse::<i64>().ok())
            }
        };

        let items = match order_id {
            Some(oid) if captured => order::items_for_order(&self.pool, oid).await?,
            _ => Vec::new(),
        };

        let raw_response = serde_json::to_string(raw)
            .map_err(|e| AppError::internal(format!("serialize callback: {e}")))?;
        let txn_status = if captured { TxnStatus::Success } else { TxnStatus::Failure };

        let mut dbtx = self.pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;

        if txn.is_some() {
            let applied = transaction::resolve(
                &mut *dbtx,
                txn_id,
                txn_status,
                raw.get("mihpayid").map(String::as_str),
                raw.get("hash").map(String::as_str),
                &raw_response,
            )
            .await?;
            if !applied {
                info!(txnid = txn_id, "transaction already resolved, callback ignored");
            }
        }

        if let Some(oid) = order_id {
            if captured {
                // The order guard, not the transaction guard, gates the
                // stock decrement: a second successful attempt for an
                // already-paid order must not decrement twice.
                let applied = order::resolve_status(&mut *dbtx, oid, OrderStatus::Paid).await?;
                if applied {
                    for item in &items {
                        let ok =
                            product::decrement_stock(&mut *dbtx, item.product_id, item.quantity)
                                .await?;
                        if !ok {
                            // Payment is already captured; clamp rather
                            // than fail the reconciliation.
                            warn!(
                                order_id = oid,
                                product_id = item.product_id,
                                quantity = item.quantity,
                                "oversold product, clamping stock to zero"
                            );
                            product::zero_stock(&mut *dbtx, item.product_id).await?;
                        }
                    }
                    info!(order_id = oid, txnid = txn_id, "order paid");
                } else {
                    info!(order_id = oid, "order already terminal, callback ignored");
                }
            } else {
                let applied = order::resolve_status(&mut *dbtx, oid, OrderStatus::Failed).await?;
                if applied {
                    info!(order_id = oid, txnid = txn_id, "order failed");
                }
            }
        }

        dbtx.commit().await.map_err(|e| AppError::database(e.to_string()))?;
        Ok(order_id)
    }

    /// Landing-page URL for the browser redirect.
    pub fn landing_url(&self, outcome: &CallbackOutcome) -> String {
        let base = &self.config.base_url;
        let oid = outcome
            .order_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        if outcome.paid {
            format!("{base}/payment/success?orderId={oid}")
        } else {
            let err = outcome.error.as_deref().unwrap_or("Payment failed");
            format!(
                "{base}/payment/failure?orderId={oid}&error={}",
                shared::util::percent_encode(err)
            )
        }
    }
}
