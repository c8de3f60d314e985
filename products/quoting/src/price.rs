//! Price input handling. Quotes are typed with a comma as the decimal
//! separator (`150,50`) and stored as integer cents.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{LifecycleError, LifecycleResult};

/// Largest storable amount: nine digits with two decimals.
pub const MAX_PRICE_CENTS: i64 = 999_999_999;

/// Parse a locale-formatted price into cents.
///
/// The input must be a plain positive number with at most two decimal places.
/// Thousands separators and exponent notation are not accepted.
pub fn parse_price(input: &str) -> LifecycleResult<i64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(LifecycleError::InvalidPrice("value is required".into()));
    }
    let not_a_number = || LifecycleError::InvalidPrice(format!("`{}` is not a number", input.trim()));
    let plain = normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if !plain {
        return Err(not_a_number());
    }
    let value = Decimal::from_str(&normalized).map_err(|_| not_a_number())?;
    if value <= Decimal::ZERO {
        return Err(LifecycleError::InvalidPrice("value must be positive".into()));
    }
    let value = value.normalize();
    if value.scale() > 2 {
        return Err(LifecycleError::InvalidPrice(
            "at most two decimal places are allowed".into(),
        ));
    }
    let mut cents = value;
    cents.rescale(2);
    i64::try_from(cents.mantissa())
        .ok()
        .filter(|cents| *cents <= MAX_PRICE_CENTS)
        .ok_or_else(|| LifecycleError::InvalidPrice("value is too large".into()))
}

pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Canonical rendering with a dot separator, e.g. `150.50`.
pub fn format_cents(cents: i64) -> String {
    cents_to_decimal(cents).to_string()
}
