//! Parsing of raw field text typed at the prompt.
//!
//! Every function here returns a [`FieldError`] naming the rejected text. The
//! `*_arg` variants adapt them to argh's `from_str_fn` signature so a malformed
//! value is reported by the argument parser and never reaches the store.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Date format used for display, and the first one tried when parsing.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid quantity '{0}': expected a whole number of at least 0")]
    InvalidQuantity(String),

    #[error("invalid price '{0}': expected a decimal amount such as 2.50")]
    InvalidPrice(String),

    #[error("invalid date '{0}': expected dd/mm/yyyy or yyyy-mm-dd")]
    InvalidDate(String),

    #[error("invalid number of days '{0}': expected a whole number")]
    InvalidDays(String),
}

pub fn parse_quantity(raw: &str) -> Result<u32, FieldError> {
    raw.trim()
        .parse()
        .map_err(|_| FieldError::InvalidQuantity(raw.to_string()))
}

/// Parse an exact decimal amount. Both `.` and `,` are accepted as the decimal
/// separator; grouping separators are not.
pub fn parse_price(raw: &str) -> Result<Decimal, FieldError> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| FieldError::InvalidPrice(raw.to_string()))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT))
        .map_err(|_| FieldError::InvalidDate(raw.to_string()))
}

pub fn parse_days(raw: &str) -> Result<i64, FieldError> {
    raw.trim()
        .parse()
        .map_err(|_| FieldError::InvalidDays(raw.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Render a currency amount with two decimal places behind `symbol`.
///
/// Half-cents round away from zero.
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", symbol, rounded)
}

pub fn quantity_arg(raw: &str) -> Result<u32, String> {
    parse_quantity(raw).map_err(|e| e.to_string())
}

pub fn price_arg(raw: &str) -> Result<Decimal, String> {
    parse_price(raw).map_err(|e| e.to_string())
}

pub fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| e.to_string())
}

pub fn days_arg(raw: &str) -> Result<i64, String> {
    parse_days(raw).map_err(|e| e.to_string())
}
