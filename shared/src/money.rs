//! Money and currency conversion
//!
//! Product prices are canonically stored in INR. Orders settle in the
//! shopper's chosen currency, converted with a fixed rate that is also
//! snapshotted onto the order row (`fx_rate`) so historical orders stay
//! reconstructable if the constant changes.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Currency;

/// Fixed conversion rate: 1 USD = 83 INR.
pub const USD_TO_INR: Decimal = Decimal::from_parts(83, 0, 0, false, 0);

/// Precomputed reciprocal, 1 INR in USD.
pub fn inr_to_usd() -> Decimal {
    Decimal::ONE / USD_TO_INR
}

/// Rate applied when settling an INR amount in `currency`.
pub fn settlement_rate(currency: Currency) -> Decimal {
    match currency {
        Currency::Inr => Decimal::ONE,
        Currency::Usd => inr_to_usd(),
    }
}

/// Convert a base-currency (INR) amount to the settlement currency.
///
/// Returns the unrounded value; rounding happens exactly once, at the
/// point an amount is persisted (see [`round_money`]). Deriving totals
/// from already-rounded per-item values would compound rounding error.
pub fn to_settlement(amount_inr: Decimal, currency: Currency) -> Decimal {
    match currency {
        Currency::Inr => amount_inr,
        Currency::Usd => amount_inr / USD_TO_INR,
    }
}

/// Round to two decimal places, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two-decimal string form, the shape persisted and sent to the gateway.
pub fn fmt_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn inr_passes_through() {
        let amount = Decimal::from_str("1000.00").unwrap();
        assert_eq!(fmt_money(to_settlement(amount, Currency::Inr)), "1000.00");
    }

    #[test]
    fn usd_conversion_at_fixed_rate() {
        // 1000 INR / 83 = 12.048..., rounds to 12.05
        let amount = Decimal::from_str("1000.00").unwrap();
        assert_eq!(fmt_money(to_settlement(amount, Currency::Usd)), "12.05");
    }

    #[test]
    fn rounding_happens_once_not_per_step() {
        // 500 INR -> 6.0240963...; two items of it must not be rounded
        // before summing (2 * 6.02 = 12.04, but the true total is 12.05).
        let unit = to_settlement(Decimal::from_str("500.00").unwrap(), Currency::Usd);
        let total = unit * Decimal::TWO;
        assert_eq!(fmt_money(total), "12.05");
    }

    #[test]
    fn reciprocal_matches_rate() {
        let one_usd = inr_to_usd() * USD_TO_INR;
        assert_eq!(round_money(one_usd), Decimal::ONE);
    }

    #[test]
    fn settlement_rate_snapshot_values() {
        assert_eq!(settlement_rate(Currency::Inr), Decimal::ONE);
        assert_eq!(
            format!("{:.8}", settlement_rate(Currency::Usd)),
            "0.01204819"
        );
    }
}
