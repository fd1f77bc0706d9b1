//! Gateway signature scheme
//!
//! The gateway binds transaction-critical fields with a salted SHA-512
//! digest over a pipe-delimited concatenation. The request and response
//! digests use *mirror-image* field orders; both orderings live here as
//! named pure functions so the asymmetry stays visible and testable.
//!
//! Inputs are hashed exactly as provided — no trimming, no case folding —
//! because the gateway recomputes the same digest on its side and any
//! deviation breaks verification.

use std::collections::HashMap;

use sha2::{Digest, Sha512};

use super::{GatewayConfig, PaymentParams};

fn sha512_hex(input: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Outbound signature.
///
/// Field order: `key|txnid|amount|productinfo|firstname|email|udf1..udf5|`
/// five empty placeholders `|salt`.
pub fn payment_request_hash(config: &GatewayConfig, params: &PaymentParams) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let fields = [
        config.merchant_key.clone(),
        params.txnid.clone(),
        params.amount.clone(),
        params.productinfo.clone(),
        params.firstname.clone(),
        params.email.clone(),
        opt(&params.udf1),
        opt(&params.udf2),
        opt(&params.udf3),
        opt(&params.udf4),
        opt(&params.udf5),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        config.merchant_salt.clone(),
    ];
    sha512_hex(&fields.join("|"))
}

/// Inbound signature, computed over the callback's raw parameter map.
///
/// The field order is the outbound order reversed, salt first and merchant
/// key last, with `status` injected after the salt. The placeholder block
/// shrinks from seven empty fields to five when the gateway reports an
/// `additionalCharges` field; its presence, not its value, selects the
/// shape.
pub fn payment_response_hash(config: &GatewayConfig, params: &HashMap<String, String>) -> String {
    let get = |k: &str| params.get(k).cloned().unwrap_or_default();

    let status = get("status");
    let placeholders = if get("additionalCharges").is_empty() {
        7
    } else {
        5
    };

    let mut fields = Vec::with_capacity(18);
    fields.push(config.merchant_salt.clone());
    fields.push(status);
    fields.extend(std::iter::repeat_n(String::new(), placeholders));
    fields.push(get("udf5"));
    fields.push(get("udf4"));
    fields.push(get("udf3"));
    fields.push(get("udf2"));
    fields.push(get("udf1"));
    fields.push(get("email"));
    fields.push(get("firstname"));
    fields.push(get("productinfo"));
    fields.push(get("amount"));
    fields.push(get("txnid"));
    fields.push(config.merchant_key.clone());

    sha512_hex(&fields.join("|"))
}

/// Verify the digest the gateway sent against a recomputation.
///
/// Comparison is case-insensitive. A mismatch is a normal outcome
/// (tampered redirect, stale test credentials), never an error: the
/// reconciler folds `false` into a `failure`-status transaction.
pub fn verify_response_hash(config: &GatewayConfig, params: &HashMap<String, String>) -> bool {
    let Some(received) = params.get("hash") else {
        return false;
    };
    let calculated = payment_response_hash(config, params);
    calculated.eq_ignore_ascii_case(received)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayMode;

    fn test_config() -> GatewayConfig {
        GatewayConfig {
            merchant_key: "gtKFFx".to_string(),
            merchant_salt: "eCwWELxi".to_string(),
            mode: GatewayMode::Test,
        }
    }

    fn sample_params() -> PaymentParams {
        PaymentParams {
            txnid: "AWTEST0001".to_string(),
            amount: "12.05".to_string(),
            productinfo: "Order ORD-TEST-1".to_string(),
            firstname: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            surl: "http://localhost:5000/api/checkout/gateway-callback/success".to_string(),
            furl: "http://localhost:5000/api/checkout/gateway-callback/failure".to_string(),
            udf1: Some("42".to_string()),
            udf2: None,
            udf3: None,
            udf4: None,
            udf5: None,
        }
    }

    fn sample_response() -> HashMap<String, String> {
        let mut p = HashMap::new();
        p.insert("txnid".to_string(), "AWTEST0001".to_string());
        p.insert("amount".to_string(), "12.05".to_string());
        p.insert("productinfo".to_string(), "Order ORD-TEST-1".to_string());
        p.insert("firstname".to_string(), "Asha".to_string());
        p.insert("email".to_string(), "asha@example.com".to_string());
        p.insert("status".to_string(), "success".to_string());
        p.insert("udf1".to_string(), "42".to_string());
        p
    }

    // Digest pinned against an independent SHA-512 of
    // "gtKFFx|AWTEST0001|12.05|Order ORD-TEST-1|Asha|asha@example.com|42||||||||||eCwWELxi".
    // Guards the outbound field order against regressions.
    #[test]
    fn request_hash_is_pinned() {
        assert_eq!(
            payment_request_hash(&test_config(), &sample_params()),
            "4aa9385d2a07f257aa22ea4c333c01dc79af1a6cddaf40516b102ad25b4b5acf\
             da7dc4095210ff8baccf1d670d402b79b8e7ef6f0f67306241a3607b28643912"
        );
    }

    // Reverse-order digest with the seven-placeholder block.
    #[test]
    fn response_hash_is_pinned() {
        assert_eq!(
            payment_response_hash(&test_config(), &sample_response()),
            "a3b355c1b62b47e7e35a4a38c4fe8792bc18ec79171f1e4551a69ae19c4b9cf0\
             b0e3ea25782aafff27206c99495bb6b05f7b1631329fb70d746c7b9971f9ac87"
        );
    }

    // additionalCharges swaps in the five-placeholder block; its value is
    // not part of the hash input, only its presence.
    #[test]
    fn response_hash_with_additional_charges_is_pinned() {
        let mut params = sample_response();
        params.insert("additionalCharges".to_string(), "10.00".to_string());
        assert_eq!(
            payment_response_hash(&test_config(), &params),
            "29a2017bb24b0f26000894a40399b3b3e01f7f650e808dfb578ed52ed37a90b7\
             2ec2d13b8c32357d94cd5c8781eeda9aaa6d3e833e1f6d14049b9a2b7345552f"
        );
    }

    #[test]
    fn verify_accepts_correct_digest_any_case() {
        let mut params = sample_response();
        let digest = payment_response_hash(&test_config(), &params);
        params.insert("hash".to_string(), digest.to_uppercase());
        assert!(verify_response_hash(&test_config(), &params));
    }

    #[test]
    fn verify_rejects_mutated_fields() {
        let config = test_config();
        let mut good = sample_response();
        good.insert("hash".to_string(), payment_response_hash(&config, &good));
        assert!(verify_response_hash(&config, &good));

        for (field, forged) in [
            ("amount", "1.00"),
            ("status", "failure"),
            ("txnid", "AWTEST0002"),
        ] {
            let mut tampered = good.clone();
            tampered.insert(field.to_string(), forged.to_string());
            assert!(
                !verify_response_hash(&config, &tampered),
                "mutating {field} must invalidate the digest"
            );
        }
    }

    #[test]
    fn verify_rejects_missing_hash() {
        assert!(!verify_response_hash(&test_config(), &sample_response()));
    }

    #[test]
    fn request_fields_are_used_verbatim() {
        // A trailing space is part of the signed payload, not noise.
        let mut params = sample_params();
        let base = payment_request_hash(&test_config(), &params);
        params.firstname = "Asha ".to_string();
        assert_ne!(payment_request_hash(&test_config(), &params), base);
    }
}
