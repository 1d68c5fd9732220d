//! Canonical decimal numbers for comparing numeric answers.
//!
//! Answers are compared as exact decimals rather than floats, so `1,000`,
//! `+1000` and `1000.0` are the same value and `0.1 + 0.2` style rounding
//! never enters into it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A number reduced to `-?\d+(\.\d+)?` with no redundant zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalNumber(String);

impl CanonicalNumber {
    /// Parse a formatted number: optional sign, digits with optional `,`
    /// thousands separators, optional fractional part. Surrounding whitespace
    /// is ignored. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        let (negative, body) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let body = body.trim_start();

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (body, None),
        };

        let int_digits = strip_separators(int_part)?;
        let frac_digits = match frac_part {
            Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => f,
            Some(_) => return None,
            None => "",
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }

        let int_digits = int_digits.trim_start_matches('0');
        let frac_digits = frac_digits.trim_end_matches('0');

        let mut out = String::with_capacity(int_digits.len() + frac_digits.len() + 2);
        let is_zero = int_digits.is_empty() && frac_digits.is_empty();
        if negative && !is_zero {
            out.push('-');
        }
        if int_digits.is_empty() {
            out.push('0');
        } else {
            out.push_str(int_digits);
        }
        if !frac_digits.is_empty() {
            out.push('.');
            out.push_str(frac_digits);
        }
        Some(Self(out))
    }

    /// Build from a JSON number or numeric string.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Self::parse(&n.to_string()),
            serde_json::Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value as an integer, if it has no fractional part and fits.
    pub fn as_integer(&self) -> Option<i64> {
        if self.0.contains('.') {
            return None;
        }
        self.0.parse().ok()
    }
}

/// Remove `,` thousands separators, requiring groups of three after the first.
/// Returns `None` if any non-digit remains.
fn strip_separators(int_part: &str) -> Option<String> {
    if !int_part.contains(',') {
        return int_part
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| int_part.to_string());
    }
    let mut groups = int_part.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut out = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        out.push_str(group);
    }
    Some(out)
}

impl fmt::Display for CanonicalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<String> for CanonicalNumber {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("not a number: {value:?}"))
    }
}

impl From<CanonicalNumber> for String {
    fn from(n: CanonicalNumber) -> Self {
        n.0
    }
}
