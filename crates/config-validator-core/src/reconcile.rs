//! Type reconciliation
//!
//! JSON and TOML carry native types, INI does not. A string leaf is accepted
//! for `integer`, `number` and `boolean` when its text parses as that type,
//! so an INI document can be checked against a schema written for typed
//! formats.

use crate::schema::SchemaType;
use crate::value::Value;

/// Outcome of matching a value against an expected type
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// The native type satisfies the expected type
    Match,
    /// A string that parses as the expected type; carries the parsed value
    Coercible(Value),
    /// The value cannot satisfy the expected type
    Mismatch,
}

impl Reconciliation {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Reconciliation::Mismatch)
    }
}

/// Decide whether `value` satisfies `expected`; `None` accepts anything
pub fn reconcile(value: &Value, expected: Option<SchemaType>) -> Reconciliation {
    let Some(expected) = expected else {
        return Reconciliation::Match;
    };

    match (expected, value) {
        (SchemaType::Null, Value::Null)
        | (SchemaType::Boolean, Value::Bool(_))
        | (SchemaType::Integer, Value::Integer(_))
        | (SchemaType::Number, Value::Integer(_) | Value::Float(_))
        | (SchemaType::String, Value::String(_))
        | (SchemaType::Array, Value::Array(_))
        | (SchemaType::Object, Value::Object(_)) => Reconciliation::Match,

        (SchemaType::Integer | SchemaType::Number | SchemaType::Boolean, Value::String(text)) => {
            match coerce(text, expected) {
                Some(parsed) => Reconciliation::Coercible(parsed),
                None => Reconciliation::Mismatch,
            }
        }

        _ => Reconciliation::Mismatch,
    }
}

fn coerce(text: &str, expected: SchemaType) -> Option<Value> {
    match expected {
        SchemaType::Boolean => {
            if text.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        SchemaType::Integer => text.parse::<i64>().ok().map(Value::Integer),
        SchemaType::Number => text
            .parse::<i64>()
            .ok()
            .map(Value::Integer)
            .or_else(|| parse_decimal(text).map(Value::Float)),
        _ => None,
    }
}

/// Finite decimal numbers only; `inf` and `NaN` spellings are rejected
fn parse_decimal(text: &str) -> Option<f64> {
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok().filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_type_matches_everything() {
        for value in [
            Value::Null,
            Value::Bool(true),
            Value::Integer(1),
            Value::from("x"),
            Value::Array(vec![]),
        ] {
            assert_eq!(reconcile(&value, None), Reconciliation::Match);
        }
    }

    #[test]
    fn test_native_matches() {
        assert_eq!(reconcile(&Value::Integer(1), Some(SchemaType::Integer)), Reconciliation::Match);
        assert_eq!(reconcile(&Value::Float(1.5), Some(SchemaType::Number)), Reconciliation::Match);
        assert_eq!(reconcile(&Value::from("a"), Some(SchemaType::String)), Reconciliation::Match);
        assert_eq!(reconcile(&Value::Null, Some(SchemaType::Null)), Reconciliation::Match);
    }

    #[test]
    fn test_integer_is_a_number_but_float_is_not_an_integer() {
        assert_eq!(reconcile(&Value::Integer(3), Some(SchemaType::Number)), Reconciliation::Match);
        assert!(reconcile(&Value::Float(3.0), Some(SchemaType::Integer)).is_mismatch());
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(
            reconcile(&Value::from("42"), Some(SchemaType::Integer)),
            Reconciliation::Coercible(Value::Integer(42))
        );
        assert_eq!(
            reconcile(&Value::from("-7"), Some(SchemaType::Number)),
            Reconciliation::Coercible(Value::Integer(-7))
        );
        assert_eq!(
            reconcile(&Value::from("2.5"), Some(SchemaType::Number)),
            Reconciliation::Coercible(Value::Float(2.5))
        );
        assert_eq!(
            reconcile(&Value::from("TRUE"), Some(SchemaType::Boolean)),
            Reconciliation::Coercible(Value::Bool(true))
        );
        assert_eq!(
            reconcile(&Value::from("False"), Some(SchemaType::Boolean)),
            Reconciliation::Coercible(Value::Bool(false))
        );
    }

    #[test]
    fn test_failed_coercion_is_mismatch() {
        assert!(reconcile(&Value::from("abc"), Some(SchemaType::Integer)).is_mismatch());
        assert!(reconcile(&Value::from("2.5"), Some(SchemaType::Integer)).is_mismatch());
        assert!(reconcile(&Value::from("yes"), Some(SchemaType::Boolean)).is_mismatch());
        assert!(reconcile(&Value::from("inf"), Some(SchemaType::Number)).is_mismatch());
        assert!(reconcile(&Value::from("NaN"), Some(SchemaType::Number)).is_mismatch());
        assert!(reconcile(&Value::from(""), Some(SchemaType::Integer)).is_mismatch());
    }

    #[test]
    fn test_strings_never_coerce_to_structures_or_null() {
        assert!(reconcile(&Value::from("null"), Some(SchemaType::Null)).is_mismatch());
        assert!(reconcile(&Value::from("[]"), Some(SchemaType::Array)).is_mismatch());
        assert!(reconcile(&Value::from("{}"), Some(SchemaType::Object)).is_mismatch());
    }

    #[test]
    fn test_null_never_coerces() {
        for expected in [
            SchemaType::String,
            SchemaType::Integer,
            SchemaType::Number,
            SchemaType::Boolean,
            SchemaType::Object,
        ] {
            assert!(reconcile(&Value::Null, Some(expected)).is_mismatch());
        }
    }

    #[test]
    fn test_non_string_scalars_do_not_coerce() {
        assert!(reconcile(&Value::Integer(1), Some(SchemaType::String)).is_mismatch());
        assert!(reconcile(&Value::Integer(1), Some(SchemaType::Boolean)).is_mismatch());
        assert!(reconcile(&Value::Bool(true), Some(SchemaType::Integer)).is_mismatch());
    }
}
