//! Hosted-payment gateway integration
//!
//! The gateway is redirect-based: we build a signed form the shopper's
//! browser POSTs to the gateway, and the gateway later POSTs a signed
//! outcome back to our callback endpoints. Nothing here performs I/O;
//! the signature scheme and form layout are pure functions over
//! [`GatewayConfig`] so they can be pinned by tests.

pub mod signature;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use signature::{payment_request_hash, payment_response_hash, verify_response_hash};

const GATEWAY_TEST_URL: &str = "https://test.payu.in/_payment";
const GATEWAY_LIVE_URL: &str = "https://secure.payu.in/_payment";

/// Status token the gateway reports on a captured payment.
pub const GATEWAY_SUCCESS_STATUS: &str = "success";

/// Gateway mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GatewayMode {
    #[default]
    Test,
    Live,
}

/// Merchant credentials and mode, built once at startup and passed by
/// reference into the signature functions. No hidden env reads below this
/// point.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub merchant_key: String,
    pub merchant_salt: String,
    pub mode: GatewayMode,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let mode = match std::env::var("GATEWAY_MODE").as_deref() {
            Ok("LIVE") => GatewayMode::Live,
            _ => GatewayMode::Test,
        };
        Self {
            merchant_key: std::env::var("GATEWAY_MERCHANT_KEY").unwrap_or_default(),
            merchant_salt: std::env::var("GATEWAY_MERCHANT_SALT").unwrap_or_default(),
            mode,
        }
    }

    /// Payment page URL the signed form is submitted to.
    pub fn payment_url(&self) -> &'static str {
        match self.mode {
            GatewayMode::Test => GATEWAY_TEST_URL,
            GatewayMode::Live => GATEWAY_LIVE_URL,
        }
    }
}

/// Outbound payment parameters. `amount` is the stored order total,
/// verbatim — never recomputed or re-normalized, because the gateway
/// hashes the exact string it receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentParams {
    pub txnid: String,
    pub amount: String,
    pub productinfo: String,
    pub firstname: String,
    pub email: String,
    pub phone: String,
    pub surl: String,
    pub furl: String,
    #[serde(default)]
    pub udf1: Option<String>,
    #[serde(default)]
    pub udf2: Option<String>,
    #[serde(default)]
    pub udf3: Option<String>,
    #[serde(default)]
    pub udf4: Option<String>,
    #[serde(default)]
    pub udf5: Option<String>,
}

/// Complete field set for the browser-initiated form submission.
pub fn build_payment_form(
    config: &GatewayConfig,
    params: &PaymentParams,
    hash: &str,
) -> BTreeMap<String, String> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    BTreeMap::from([
        ("key".to_string(), config.merchant_key.clone()),
        ("txnid".to_string(), params.txnid.clone()),
        ("amount".to_string(), params.amount.clone()),
        ("productinfo".to_string(), params.productinfo.clone()),
        ("firstname".to_string(), params.firstname.clone()),
        ("email".to_string(), params.email.clone()),
        ("phone".to_string(), params.phone.clone()),
        ("surl".to_string(), params.surl.clone()),
        ("furl".to_string(), params.furl.clone()),
        ("hash".to_string(), hash.to_string()),
        ("udf1".to_string(), opt(&params.udf1)),
        ("udf2".to_string(), opt(&params.udf2)),
        ("udf3".to_string(), opt(&params.udf3)),
        ("udf4".to_string(), opt(&params.udf4)),
        ("udf5".to_string(), opt(&params.udf5)),
    ])
}
