//! Type-directed conversion of configuration values
//!
//! Configuration values arrive as whatever literal type the YAML document
//! used. Plugins call these helpers from `set_property` to coerce a value to
//! the property's declared type, so `"25"` binds to an integer property and
//! `"TRUE"` to a boolean one.

use std::str::FromStr;

use serde_yaml::Value;

use crate::error::BindError;

/// Short human description of a value, used in conversion errors
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Sequence(_) => "sequence".to_string(),
        Value::Mapping(_) => "mapping".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}

fn mismatch(expected: &'static str, value: &Value) -> BindError {
    BindError::Conversion {
        expected,
        found: describe(value),
    }
}

/// Scalars convert to their textual form
pub fn to_string(value: &Value) -> Result<String, BindError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(mismatch("string", value)),
    }
}

pub fn to_bool(value: &Value) -> Result<bool, BindError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(mismatch("boolean", value)),
        },
        _ => Err(mismatch("boolean", value)),
    }
}

/// Integers and numeric strings convert; fractional numbers do not
pub fn to_i64(value: &Value) -> Result<i64, BindError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| mismatch("integer", value)),
        Value::String(s) => s.trim().parse().map_err(|_| mismatch("integer", value)),
        _ => Err(mismatch("integer", value)),
    }
}

pub fn to_f64(value: &Value) -> Result<f64, BindError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| mismatch("float", value)),
        Value::String(s) => s.trim().parse().map_err(|_| mismatch("float", value)),
        _ => Err(mismatch("float", value)),
    }
}

/// Parse a scalar into any `FromStr` type, typically a property enum
pub fn to_enum<T: FromStr>(value: &Value, expected: &'static str) -> Result<T, BindError> {
    let text = to_string(value).map_err(|_| mismatch(expected, value))?;
    text.trim().parse().map_err(|_| mismatch(expected, value))
}
