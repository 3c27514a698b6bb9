//! Price normalization for heterogeneous catalog price fields.
//!
//! The catalog API has been observed to return prices as plain numbers
//! (`88000`), formatted strings (`"Rp 88,000"`), or not at all, sometimes
//! nested under a `details` map. This module coerces every observed shape
//! into integer rupiah. Normalization is total: it never fails, it
//! produces `0` for anything unparseable or absent.

use serde::{Deserialize, Serialize};

/// A price value exactly as it appeared in an API payload.
///
/// Untagged: deserializes from a JSON number or string without any
/// wrapper. Kept raw so cart lines retain the original representation
/// and normalization stays in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// Integer amount, e.g. `88000`.
    Int(i64),
    /// Fractional amount; some payloads use floats for whole rupiah.
    Float(f64),
    /// Formatted text, e.g. `"Rp 88,000"`.
    Text(String),
}

impl RawPrice {
    /// Coerce this raw value into integer rupiah.
    ///
    /// Text values have every non-digit character stripped before being
    /// parsed; parse failures and empty results coerce to `0`. Numeric
    /// values truncate toward zero.
    #[must_use]
    pub fn normalize(&self) -> i64 {
        match self {
            Self::Int(n) => *n,
            #[allow(clippy::cast_possible_truncation)] // rupiah amounts fit i64
            Self::Float(f) if f.is_finite() => *f as i64,
            Self::Float(_) => 0,
            Self::Text(s) => {
                let digits: String = s.chars().filter(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            }
        }
    }

    /// Whether this value carries anything usable.
    ///
    /// Blank text counts as absent so precedence falls through to the
    /// next candidate field instead of yielding a spurious `0`.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        match self {
            Self::Int(_) | Self::Float(_) => true,
            Self::Text(s) => !s.trim().is_empty(),
        }
    }
}

/// Normalize an optional raw price into integer rupiah.
///
/// Absent values coerce to `0`; see [`RawPrice::normalize`] for the rest.
#[must_use]
pub fn normalize_price(value: Option<&RawPrice>) -> i64 {
    value.map_or(0, RawPrice::normalize)
}

/// Format an amount with thousands separators, e.g. `88000` -> `"88,000"`.
///
/// No currency symbol: whether to prefix `Rp` is a presentation concern.
#[must_use]
pub fn format_grouped(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
