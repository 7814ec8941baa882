//! Lenient amount parsing for user-typed fields.
//!
//! Bad input is never an error here: empty, non-numeric, negative or non-finite
//! amounts all become 0.

use regex::Regex;
use std::sync::LazyLock;

/// `1,234` / `12,345,678.90`: comma-grouped thousands, optional fraction
static GROUPED_THOUSANDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}(?:,\d{3})+(?:\.\d*)?$").expect("static thousands pattern")
});

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];

/// Clamp an amount into the valid range: finite and >= 0.
pub fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Parse a raw text field into an amount, coercing anything unusable to 0.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let unprefixed = trimmed
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(trimmed)
        .trim_start();

    let normalized = if GROUPED_THOUSANDS.is_match(unprefixed) {
        unprefixed.replace(',', "")
    } else {
        unprefixed.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        Ok(v) => {
            tracing::debug!(raw, value = v, "coercing out-of-range amount to 0");
            0.0
        }
        Err(_) => {
            tracing::debug!(raw, "coercing non-numeric amount to 0");
            0.0
        }
    }
}
