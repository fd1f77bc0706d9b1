/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Encode a non-negative integer in lowercase base-36.
fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ASCII")
}

/// Generate a customer-facing order number.
///
/// Shape: `ORD-<base36 millis>-<3 random bytes hex>`, all uppercase.
/// The timestamp component keeps numbers roughly sortable; the random
/// suffix makes collisions negligible under concurrent checkouts. A
/// UNIQUE constraint on `orders.order_number` backs this up.
pub fn order_number() -> String {
    use rand::Rng;
    let ts = to_base36(now_millis() as u64).to_uppercase();
    let bytes: [u8; 3] = rand::thread_rng().r#gen();
    format!("ORD-{}-{}", ts, hex::encode_upper(bytes))
}

/// Generate a gateway transaction id.
///
/// Shape: `AW<base36 millis><4 random bytes hex>`, uppercased. This is the
/// idempotency key for callback reconciliation, so it carries more random
/// bits than the order number (UNIQUE index on `gateway_transactions.txn_id`).
pub fn txn_id() -> String {
    use rand::Rng;
    let ts = to_base36(now_millis() as u64);
    let bytes: [u8; 4] = rand::thread_rng().r#gen();
    format!("AW{}{}", ts, hex::encode(bytes)).to_uppercase()
}

/// Percent-encode a value for a query string or form body. Spaces become
/// `%20`, unreserved characters pass through.
pub fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_round_trip_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "lpg60pts");
    }

    #[test]
    fn order_number_shape() {
        let n = order_number();
        assert!(n.starts_with("ORD-"));
        let parts: Vec<&str> = n.split('-').collect();
        assert_eq!(parts.len(), 3);
        // 3 random bytes -> 6 uppercase hex chars
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(n, n.to_uppercase());
    }

    #[test]
    fn txn_id_shape() {
        let t = txn_id();
        assert!(t.starts_with("AW"));
        assert_eq!(t, t.to_uppercase());
        // base36 millis (8+ chars at current epoch) + 8 hex chars
        assert!(t.len() >= 2 + 8 + 8);
        assert!(t[2..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn percent_encode_escapes_reserved_characters() {
        assert_eq!(percent_encode("Payment failed"), "Payment%20failed");
        assert_eq!(percent_encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(percent_encode("safe-chars_.~"), "safe-chars_.~");
    }

    #[test]
    fn txn_ids_do_not_collide_in_a_tight_loop() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(txn_id()));
        }
    }
}
