//! Pointer emulation
//!
//! Pointers do not exist in the template world: a pointer is the pointee
//! itself, and a nil pointer is [`Value::Null`].

use crate::error::{ShimError, ShimResult};
use crate::value::Value;

/// `*ptr`: fails with [`ShimError::NilDereference`] on null
pub fn deref(ptr: Value) -> ShimResult<Value> {
    if ptr.is_null() {
        return Err(ShimError::NilDereference);
    }
    Ok(ptr)
}

/// `ptr.Deref(ptr, def)`
pub fn ptr_deref(ptr: Value, def: Value) -> Value {
    if ptr.is_null() { def } else { ptr }
}

/// `ptr.Equal(a, b)`
pub fn ptr_equal(a: &Value, b: &Value) -> bool {
    if a.is_null() && b.is_null() {
        return true;
    }
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deref() {
        assert_eq!(deref(Value::Number(5.0)).unwrap(), Value::Number(5.0));
        assert_eq!(deref(Value::Null), Err(ShimError::NilDereference));
        // zero values are not nil
        assert_eq!(deref(Value::from("")).unwrap(), Value::from(""));
    }

    #[test]
    fn test_ptr_deref() {
        assert_eq!(
            ptr_deref(Value::Null, Value::from("default")),
            Value::from("default")
        );
        assert_eq!(
            ptr_deref(Value::Bool(false), Value::Bool(true)),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_ptr_equal() {
        assert!(ptr_equal(&Value::Null, &Value::Null));
        assert!(!ptr_equal(&Value::Null, &Value::Number(1.0)));
        assert!(!ptr_equal(&Value::Number(1.0), &Value::Null));
        assert!(ptr_equal(&Value::from("a"), &Value::from("a")));
        assert!(ptr_equal(&Value::Int(3), &Value::Number(3.0)));

        let a = Value::from(serde_json::json!({"k": [1, 2]}));
        let b = Value::from(serde_json::json!({"k": [1, 2]}));
        assert!(ptr_equal(&a, &b));
    }
}
