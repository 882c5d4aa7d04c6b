//! Canonical transaction model consumed by the export step

use serde::{Deserialize, Serialize};

/// Fixed currency prefix carried by every amount string.
pub const CURRENCY_PREFIX: &str = "₹";

/// Direction of money flow for a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    /// Title used on export when the payee is blank
    pub fn fallback_title(&self) -> &'static str {
        match self {
            Direction::Incoming => "Received",
            Direction::Outgoing => "Paid",
        }
    }

    /// Sign applied to the absolute amount on export
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Incoming => 1.0,
            Direction::Outgoing => -1.0,
        }
    }
}

/// A normalized, export-ready transaction.
///
/// `amount` is always positive; direction lives in `direction`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalTransaction {
    /// ISO calendar date (YYYY-MM-DD)
    pub date: String,
    /// 12-hour clock with meridiem (e.g. "10:30 AM")
    pub time: String,
    /// Currency-prefixed decimal with two places (e.g. "₹1250.00")
    pub amount: String,
    pub direction: Direction,
    /// Display title
    pub payee: String,
    /// Empty unless filled by an external payee lookup
    pub category: String,
    /// "TxnID: .., UTR: .." or empty
    pub note: String,
}

impl CanonicalTransaction {
    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::Incoming
    }

    /// Amount with direction applied (negative for outgoing).
    /// Returns `None` when the amount string does not parse.
    pub fn signed_amount(&self) -> Option<f64> {
        parse_amount(&self.amount).map(|v| v * self.direction.sign())
    }
}

/// Render a decimal as a currency-prefixed string with exactly two places.
pub fn format_amount(value: f64) -> String {
    format!("{CURRENCY_PREFIX}{:.2}", value.abs())
}

/// Parse a currency-prefixed amount, tolerating thousands separators.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(CURRENCY_PREFIX, "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
