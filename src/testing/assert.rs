//! Assertion primitives for scenario expectations
//!
//! Equality is structural over JSON values. Objects are compared by key set,
//! so two bodies that differ only in key order are equal. There is no
//! coercion between variants: the string `"2"` never equals the number `2`.

use serde_json::{Number, Value};

use crate::common::{Error, Result};
use crate::http::HttpResponse;

/// Fail with a diagnostic unless `actual` structurally equals `expected`
pub fn assert_equal(actual: &Value, expected: &Value, message: &str) -> Result<()> {
    if json_eq(actual, expected) {
        Ok(())
    } else {
        Err(Error::assertion(
            message,
            expected.to_string(),
            actual.to_string(),
        ))
    }
}

/// Fail unless the response carries the expected status code
pub fn assert_status(response: &HttpResponse, expected: u16, context: &str) -> Result<()> {
    if response.status == expected {
        Ok(())
    } else {
        Err(Error::assertion(
            format!(
                "{} expected status {}, got {}",
                context, expected, response.status
            ),
            expected.to_string(),
            response.status.to_string(),
        ))
    }
}

/// Recursive structural equality over JSON values
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => false,
    }
}

// Integers compare exactly; anything involving a float compares by value.
fn number_eq(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Numeric reading of a JSON value, the way a loosely typed client would
///
/// Arrays read through their text form, so `[]` is 0 and `[x]` reads as
/// `x`. Returns `None` for values that have no numeric reading.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => str_to_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [only] => element_to_number(only),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

// An array element joins as text: null is "", booleans are words.
fn element_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(_) | Value::Object(_) => None,
        other => as_number(other),
    }
}

fn str_to_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    // f64 parsing also takes "inf" and "nan", which are not numbers here
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}
