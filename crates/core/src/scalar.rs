//! Loose scalar values accepted from clients.
//!
//! Browser clients send category ids and difficulties either as JSON numbers
//! or as strings (`"category": "1"` and `"category": 1` are both common), so
//! request payloads accept either form and normalize it here.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// A JSON value that is either an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Text(String),
}

impl Scalar {
    /// Convert an arbitrary JSON value, rejecting anything that is not an
    /// integer or a string.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::String(s) => Ok(Scalar::Text(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Integer)
                .ok_or_else(|| CoreError::Validation(format!("{n} is not an integer"))),
            other => Err(CoreError::Validation(format!(
                "expected a string or an integer, got {other}"
            ))),
        }
    }

    /// The value in its textual form, as stored in text columns.
    pub fn into_text(self) -> String {
        match self {
            Scalar::Integer(i) => i.to_string(),
            Scalar::Text(s) => s,
        }
    }

    /// The value as an integer; strings must parse completely.
    pub fn to_integer(&self) -> Result<i64, CoreError> {
        match self {
            Scalar::Integer(i) => Ok(*i),
            Scalar::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| CoreError::Validation(format!("'{s}' is not an integer"))),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Require a JSON string.
pub fn expect_text(field: &str, value: &Value) -> Result<String, CoreError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| CoreError::Validation(format!("{field} must be a string")))
}

/// Require a value that fits a `SMALLINT`-sized difficulty column.
pub fn expect_small_int(field: &str, value: &Value) -> Result<i32, CoreError> {
    let n = Scalar::from_value(value)?.to_integer()?;
    i32::try_from(n).map_err(|_| CoreError::Validation(format!("{field} is out of range")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn integers_and_strings_normalize_to_text() {
        assert_eq!(Scalar::from_value(&json!(4)).unwrap().into_text(), "4");
        assert_eq!(Scalar::from_value(&json!("4")).unwrap().into_text(), "4");
    }

    #[test]
    fn other_json_types_are_rejected() {
        assert_matches!(Scalar::from_value(&json!(true)), Err(CoreError::Validation(_)));
        assert_matches!(Scalar::from_value(&json!(2.5)), Err(CoreError::Validation(_)));
        assert_matches!(Scalar::from_value(&json!([1])), Err(CoreError::Validation(_)));
    }

    #[test]
    fn numeric_strings_convert_to_integers() {
        assert_eq!(Scalar::Text(" 3 ".into()).to_integer().unwrap(), 3);
        assert_matches!(Scalar::Text("a200".into()).to_integer(), Err(_));
    }

    #[test]
    fn deserializes_untagged() {
        let values: Vec<Scalar> = serde_json::from_value(json!([1, "2"])).unwrap();
        assert_eq!(values, vec![Scalar::Integer(1), Scalar::Text("2".into())]);
    }

    #[test]
    fn small_int_accepts_numeric_strings() {
        assert_eq!(expect_small_int("difficulty", &json!("3")).unwrap(), 3);
        assert_eq!(expect_small_int("difficulty", &json!(5)).unwrap(), 5);
        assert_matches!(expect_small_int("difficulty", &json!("hard")), Err(_));
        assert_matches!(expect_small_int("difficulty", &json!(i64::MAX)), Err(_));
    }

    #[test]
    fn text_requires_a_string() {
        assert_eq!(expect_text("answer", &json!("Paris")).unwrap(), "Paris");
        assert_matches!(expect_text("answer", &json!(12)), Err(_));
    }
}
