//! Kind-directed value sanitization.
//!
//! [`sanitize`] coerces a raw value into the shape its declared
//! [`Kind`] requires, or reports that no sensible coercion exists.
//! It is a pure dispatch table; callers decide when sanitization
//! applies (documents skip it for `_id` and for null values).

use super::{Kind, errors::SchemaError};
use crate::map::Value;

/// Coerces `value` into the declared `kind`.
///
/// Values already in the declared shape pass through unchanged. Text
/// renderings of numbers and booleans are parsed; numbers and booleans
/// are rendered into text. Container kinds accept only their own
/// shape. Anything else fails with [`SchemaError::Sanitize`].
pub fn sanitize(kind: Kind, value: Value) -> Result<Value, SchemaError> {
    match kind {
        Kind::Text => sanitize_text(value),
        Kind::Int => sanitize_int(value),
        Kind::Float => sanitize_float(value),
        Kind::Bool => sanitize_bool(value),
        Kind::Map => match value {
            Value::Map(_) => Ok(value),
            other => Err(mismatch(kind, &other)),
        },
        Kind::List => match value {
            Value::List(_) => Ok(value),
            other => Err(mismatch(kind, &other)),
        },
    }
}

fn sanitize_text(value: Value) -> Result<Value, SchemaError> {
    match value {
        Value::Text(_) => Ok(value),
        Value::Bool(b) => Ok(Value::Text(b.to_string())),
        Value::Int(n) => Ok(Value::Text(n.to_string())),
        Value::Float(x) => Ok(Value::Text(x.to_string())),
        other => Err(mismatch(Kind::Text, &other)),
    }
}

fn sanitize_int(value: Value) -> Result<Value, SchemaError> {
    match value {
        Value::Int(_) => Ok(value),
        Value::Text(ref s) => match s.trim().parse::<i64>() {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Err(mismatch(Kind::Int, &value)),
        },
        // Fractionless floats carry an exact integer; anything else
        // would silently lose precision.
        Value::Float(x) if x.fract() == 0.0 && x.is_finite() => Ok(Value::Int(x as i64)),
        other => Err(mismatch(Kind::Int, &other)),
    }
}

fn sanitize_float(value: Value) -> Result<Value, SchemaError> {
    match value {
        Value::Float(_) => Ok(value),
        Value::Int(n) => Ok(Value::Float(n as f64)),
        Value::Text(ref s) => match s.trim().parse::<f64>() {
            Ok(x) => Ok(Value::Float(x)),
            Err(_) => Err(mismatch(Kind::Float, &value)),
        },
        other => Err(mismatch(Kind::Float, &other)),
    }
}

fn sanitize_bool(value: Value) -> Result<Value, SchemaError> {
    match value {
        Value::Bool(_) => Ok(value),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::Text(ref s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(Value::Bool(true)),
            "false" | "f" | "no" | "n" | "0" => Ok(Value::Bool(false)),
            _ => Err(mismatch(Kind::Bool, &value)),
        },
        other => Err(mismatch(Kind::Bool, &other)),
    }
}

fn mismatch(kind: Kind, value: &Value) -> SchemaError {
    SchemaError::Sanitize {
        kind,
        actual: value.type_name().to_string(),
    }
}
