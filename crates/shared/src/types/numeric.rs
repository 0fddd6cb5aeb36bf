//! Lenient numeric coercion for host-supplied document fields.
//!
//! Host documents are edited by hand and arrive with blanks, nulls, stray
//! text and numbers encoded as strings. Costing never fails on such input:
//! anything that does not start with a number coerces to zero, and a
//! numeric prefix (`"12 pcs"`) is honoured.
//!
//! All conversions go through `Decimal`; no floating point is involved.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use std::str::FromStr;

/// Coerces a JSON value to a decimal, falling back to zero.
#[must_use]
pub fn flt(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                flt_str(&n.to_string())
            }
        }
        Value::String(s) => flt_str(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => Decimal::ZERO,
    }
}

/// Parses the leading number of a string, falling back to zero.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Trailing text after the number is ignored.
///
/// Numbers outside the `Decimal` range (more than 28 integer digits, or an
/// exponent pushing past it) coerce to zero like any other bad input.
#[must_use]
pub fn flt_str(raw: &str) -> Decimal {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_part = &s[frac_start..frac_end];
        pos = frac_end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return Decimal::ZERO;
    }

    let mut exponent = "";
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let exp_start = pos + 1;
        let mut exp_end = exp_start;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            exponent = &s[exp_start..exp_end];
        }
    }

    let mut normalized = String::with_capacity(int_part.len() + frac_part.len() + 8);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }

    let parsed = if exponent.is_empty() {
        Decimal::from_str(&normalized)
    } else {
        normalized.push('e');
        normalized.push_str(exponent);
        Decimal::from_scientific(&normalized)
    };

    parsed.unwrap_or(Decimal::ZERO)
}

/// Coerces a JSON value to an integer, truncating any fraction.
#[must_use]
pub fn cint(value: &Value) -> i64 {
    flt(value).trunc().to_i64().unwrap_or(0)
}

/// Interprets a checkbox-style value (`true`, `1`, `"1"`) as a boolean.
#[must_use]
pub fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        other => cint(other) != 0,
    }
}

/// `deserialize_with` helpers that never reject a field's value.
pub mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::types::ItemCode;

    /// Deserializes any value as a decimal, coercing bad input to zero.
    pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::flt(&value))
    }

    /// Deserializes any value as a checkbox flag.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::flag(&value))
    }

    /// Deserializes an item code, treating blanks and non-text as absent.
    pub fn item_code<'de, D>(deserializer: D) -> Result<Option<ItemCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => ItemCode::parse(&s),
            Value::Number(n) => ItemCode::parse(&n.to_string()),
            _ => None,
        })
    }

    /// Deserializes free text, treating null and non-text as empty.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    /// Deserializes optional free text, treating blanks as absent.
    pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = text(deserializer)?;
        let trimmed = text.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    /// Deserializes a child table, treating null as an empty table.
    pub fn rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}
