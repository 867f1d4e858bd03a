use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub mod pricing;
pub mod stays;

/// Collapse runs of whitespace and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Largest price a vendor may set for a night or an extra (1,000,000.00).
pub(crate) const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Parse a non-negative decimal amount such as `12`, `12.5` or `12.50` into cents.
///
/// Amounts with more than two significant decimal places are rejected.
pub(crate) fn parse_price_cents(input: &str) -> Option<i64> {
    let amount = Decimal::from_str(input.trim()).ok()?.normalize();
    if amount.is_sign_negative() || amount.scale() > 2 {
        return None;
    }

    amount.checked_mul(Decimal::ONE_HUNDRED)?.to_i64()
}
