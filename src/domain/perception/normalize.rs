//! Conversion of engine results into JSON-safe values

use serde_json::Value;

/// Pure, total conversion of an engine result into a JSON value.
///
/// Implementations only flatten nested fields into objects and arrays; they
/// never filter or rename.
pub trait Normalize {
    fn normalize(&self) -> Value;
}

impl Normalize for bool {
    fn normalize(&self) -> Value {
        Value::Bool(*self)
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&self) -> Value {
        Value::Array(self.iter().map(Normalize::normalize).collect())
    }
}

/// Finite floats become JSON numbers; NaN and infinities become `null`
pub(crate) fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub(crate) fn optional_number(value: Option<f64>) -> Value {
    value.map(number).unwrap_or(Value::Null)
}
