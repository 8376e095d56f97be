// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lenient numeric fields.
//!
//! Trail documents are written by the web client as well as by this API, so
//! numeric fields occasionally arrive as strings, `null`, or something else
//! entirely. Deserialization never fails on them: non-numeric values become
//! `None`, and [`or_zero`] turns that into the documented `0` fallback.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl NumberLike {
    fn into_f64(self) -> Option<f64> {
        let value = match self {
            NumberLike::Number(n) => Some(n),
            NumberLike::Text(s) => s.trim().parse::<f64>().ok(),
            NumberLike::Other(_) => None,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Deserialize a number that may be stored as a number, a numeric string,
/// `null`, or garbage. Anything that is not a finite number becomes `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberLike>::deserialize(deserializer)?.and_then(NumberLike::into_f64))
}

/// Coerce an optional number to a finite value, defaulting to `0`.
///
/// This is the only place the "missing means zero" rule lives; both the
/// filter and the sort stages go through it.
pub fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Doc {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: Option<f64>,
    }

    fn parse(value: serde_json::Value) -> Option<f64> {
        serde_json::from_value::<Doc>(value).unwrap().value
    }

    #[test]
    fn test_lenient_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(json!({ "value": 12.5 })), Some(12.5));
        assert_eq!(parse(json!({ "value": 7 })), Some(7.0));
        assert_eq!(parse(json!({ "value": " 3.25 " })), Some(3.25));
    }

    #[test]
    fn test_lenient_maps_garbage_to_none() {
        assert_eq!(parse(json!({})), None);
        assert_eq!(parse(json!({ "value": null })), None);
        assert_eq!(parse(json!({ "value": "far" })), None);
        assert_eq!(parse(json!({ "value": [1, 2] })), None);
        assert_eq!(parse(json!({ "value": { "km": 3 } })), None);
        assert_eq!(parse(json!({ "value": "NaN" })), None);
    }

    #[test]
    fn test_or_zero() {
        assert_eq!(or_zero(Some(4.0)), 4.0);
        assert_eq!(or_zero(None), 0.0);
        assert_eq!(or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(or_zero(Some(f64::INFINITY)), 0.0);
    }
}
