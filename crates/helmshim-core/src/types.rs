//! Runtime type tests and assertions
//!
//! Implements the `v, ok := x.(T)` and `v := x.(T)` forms of generated code.
//! Because decoded numbers are always float64, the integer tags accept any
//! float with no fractional part.

use phf::phf_map;
use std::fmt;
use std::str::FromStr;

use crate::error::{ShimError, ShimResult};
use crate::value::Value;

/// Type name a generated template may test a value against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    String,
    Int,
    Int32,
    Int64,
    Float64,
    Map,
    List,
    Nil,
    /// `any` / `interface {}`: every non-null value
    Any,
}

static TYPE_TAGS: phf::Map<&'static str, TypeTag> = phf_map! {
    "bool" => TypeTag::Bool,
    "string" => TypeTag::String,
    "int" => TypeTag::Int,
    "int32" => TypeTag::Int32,
    "int64" => TypeTag::Int64,
    "float64" => TypeTag::Float64,
    "map" => TypeTag::Map,
    "map[string]interface {}" => TypeTag::Map,
    "map[string]any" => TypeTag::Map,
    "list" => TypeTag::List,
    "[]interface {}" => TypeTag::List,
    "[]any" => TypeTag::List,
    "nil" => TypeTag::Nil,
    "<nil>" => TypeTag::Nil,
    "any" => TypeTag::Any,
    "interface {}" => TypeTag::Any,
};

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Map => "map",
            Self::List => "list",
            Self::Nil => "nil",
            Self::Any => "any",
        }
    }

    /// `int`, `int32` and `int64`
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int | Self::Int32 | Self::Int64)
    }

    /// Whether `value` satisfies this tag
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::String => matches!(value, Value::String(_)),
            Self::Int | Self::Int32 | Self::Int64 => {
                matches!(value, Value::Int(_)) || is_int_like_float(value)
            }
            Self::Float64 => matches!(value, Value::Number(_)),
            Self::Map => matches!(value, Value::Map(_)),
            Self::List => matches!(value, Value::List(_)),
            Self::Nil => value.is_null(),
            Self::Any => !value.is_null(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = ShimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TYPE_TAGS
            .get(s)
            .copied()
            .ok_or_else(|| ShimError::UnknownTypeTag {
                name: s.to_string(),
            })
    }
}

/// True iff `value` is a float64 with a zero fractional part
pub fn is_int_like_float(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n - n.floor() == 0.0)
}

/// `v, ok := value.(tag)`: never fails
pub fn type_test(tag: TypeTag, value: Value, zero: Value) -> (Value, bool) {
    if tag.matches(&value) {
        (value, true)
    } else {
        (zero, false)
    }
}

/// `v := value.(tag)`: fails with [`ShimError::TypeMismatch`]
///
/// An int-like float asserted as an integer kind comes back as [`Value::Int`].
pub fn type_assert(tag: TypeTag, value: Value) -> ShimResult<Value> {
    if tag.is_integer()
        && let Value::Number(n) = value
        && is_int_like_float(&value)
    {
        return Ok(Value::Int(n as i64));
    }

    if tag.matches(&value) {
        Ok(value)
    } else {
        Err(ShimError::TypeMismatch {
            expected: tag.to_string(),
            actual: value.kind_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;

    #[test]
    fn test_is_int_like_float() {
        assert!(is_int_like_float(&Value::Number(4.0)));
        assert!(is_int_like_float(&Value::Number(-12.0)));
        assert!(!is_int_like_float(&Value::Number(4.5)));
        assert!(!is_int_like_float(&Value::Number(f64::NAN)));
        assert!(!is_int_like_float(&Value::Number(f64::INFINITY)));
        assert!(!is_int_like_float(&Value::Int(4)));
        assert!(!is_int_like_float(&Value::from("4")));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("int64".parse::<TypeTag>().unwrap(), TypeTag::Int64);
        assert_eq!(
            "map[string]interface {}".parse::<TypeTag>().unwrap(),
            TypeTag::Map
        );
        assert_eq!("[]any".parse::<TypeTag>().unwrap(), TypeTag::List);
        assert!(matches!(
            "uint8".parse::<TypeTag>(),
            Err(ShimError::UnknownTypeTag { name }) if name == "uint8"
        ));
    }

    #[test]
    fn test_type_test_string() {
        assert_eq!(
            type_test(TypeTag::String, Value::from("foo"), Value::from("")),
            (Value::from("foo"), true)
        );
        assert_eq!(
            type_test(TypeTag::String, Value::Number(5.0), Value::from("")),
            (Value::from(""), false)
        );
    }

    #[test]
    fn test_type_test_integer_kinds() {
        for tag in [TypeTag::Int, TypeTag::Int32, TypeTag::Int64] {
            assert_eq!(
                type_test(tag, Value::Number(3.0), Value::Number(0.0)),
                (Value::Number(3.0), true)
            );
            assert_eq!(
                type_test(tag, Value::Number(3.25), Value::Number(0.0)),
                (Value::Number(0.0), false)
            );
        }
    }

    #[test]
    fn test_type_test_containers_and_nil() {
        let map = Value::Map(Map::new());
        assert!(type_test(TypeTag::Map, map.clone(), Value::Null).1);
        assert!(!type_test(TypeTag::List, map, Value::Null).1);
        assert!(type_test(TypeTag::Nil, Value::Null, Value::Null).1);
        assert!(!type_test(TypeTag::Any, Value::Null, Value::Null).1);
        assert!(type_test(TypeTag::Any, Value::Bool(false), Value::Null).1);
    }

    #[test]
    fn test_type_assert_coerces_int_like() {
        let result = type_assert(TypeTag::Int, Value::Number(4.0)).unwrap();
        assert!(matches!(result, Value::Int(4)));

        let result = type_assert(TypeTag::Int64, Value::Number(-7.0)).unwrap();
        assert!(matches!(result, Value::Int(-7)));
    }

    #[test]
    fn test_type_assert_mismatch() {
        let err = type_assert(TypeTag::Int, Value::Number(4.5)).unwrap_err();
        assert_eq!(
            err,
            ShimError::TypeMismatch {
                expected: "int".to_string(),
                actual: "float64",
            }
        );

        let err = type_assert(TypeTag::String, Value::Null).unwrap_err();
        assert_eq!(err.to_string(), r#"expected type of "string" got: <nil>"#);
    }

    #[test]
    fn test_type_assert_passthrough() {
        let value = Value::from("hello");
        assert_eq!(type_assert(TypeTag::String, value.clone()).unwrap(), value);

        // float64 assertions never coerce
        let result = type_assert(TypeTag::Float64, Value::Number(2.0)).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 2.0));
    }
}
