//! Draft-to-body coercion.
//!
//! Numeric fields use the console's lenient policy: whatever the user typed
//! is parsed permissively and anything that is not a finite number becomes
//! zero. Nothing here rejects input.

use serde_json::{Number, Value};

/// Permissive number parse: trimmed decimal or exponent form, otherwise `0`.
pub fn lenient_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// JSON number for a coerced value: integral values stay integers.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or_else(|| Value::from(0))
    }
}

pub fn lenient_number_value(text: &str) -> Value {
    number_value(lenient_number(text))
}
