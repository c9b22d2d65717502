//! Helpers for reading typed parameter overrides out of a JSON object.
//!
//! The scalar helpers never fail: a missing key or a value of the wrong type
//! yields the default. [`param_range`] is stricter because a malformed range
//! is almost always a typo worth reporting.

use serde_json::Value;

use crate::error::FieldError;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or
/// not a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a `[min, max]` pair from `params[name]`.
///
/// A missing key or `null` yields `default`. Anything other than a
/// two-element array of numbers is a `FieldError::ParamTypeMismatch`.
pub fn param_range(
    params: &Value,
    name: &str,
    default: (f64, f64),
) -> Result<(f64, f64), FieldError> {
    let value = match params.get(name) {
        None | Some(Value::Null) => return Ok(default),
        Some(v) => v,
    };
    let pair = value
        .as_array()
        .filter(|items| items.len() == 2)
        .and_then(|items| Some((items[0].as_f64()?, items[1].as_f64()?)));
    pair.ok_or_else(|| FieldError::ParamTypeMismatch {
        name: name.to_owned(),
        expected: "[min, max]".to_owned(),
        got: json_type_name(value).to_owned(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
