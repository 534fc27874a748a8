//! Map lookups with presence flag, multi-value packing and lengths

use crate::value::{Map, Value};

/// `v, ok := m[key]`
///
/// A null or non-map `map` behaves like an empty map.
pub fn dict_test(map: &Value, key: &str, zero: Value) -> (Value, bool) {
    match map.as_map().and_then(|m| m.get(key)) {
        Some(found) => (found.clone(), true),
        None => (zero, false),
    }
}

/// Pack values under the positional keys `T1..TN`
///
/// Callers read the result back by those exact keys; the map is a tuple in
/// disguise and carries no other meaning.
pub fn compact(values: Vec<Value>) -> Map {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (format!("T{}", i + 1), v))
        .collect()
}

/// Read back the `index`-th (0-based) value of a [`compact`] result
pub fn compact_get(packed: &Map, index: usize) -> Option<&Value> {
    packed.get(&format!("T{}", index + 1))
}

/// Length with "no value" and "empty value" treated alike
///
/// Strings count bytes. Scalars have no elements and report 0.
pub fn length(value: &Value) -> usize {
    match value {
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        Value::String(s) => s.len(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Int(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_dict_test_present() {
        let m = map_of(serde_json::json!({"a": 1}));
        assert_eq!(
            dict_test(&m, "a", Value::Number(0.0)),
            (Value::Number(1.0), true)
        );
    }

    #[test]
    fn test_dict_test_missing() {
        let m = map_of(serde_json::json!({}));
        assert_eq!(
            dict_test(&m, "a", Value::Number(0.0)),
            (Value::Number(0.0), false)
        );
    }

    #[test]
    fn test_dict_test_present_null_is_found() {
        let m = map_of(serde_json::json!({"a": null}));
        assert_eq!(dict_test(&m, "a", Value::from("zero")), (Value::Null, true));
    }

    #[test]
    fn test_dict_test_null_map() {
        assert_eq!(
            dict_test(&Value::Null, "a", Value::from("zero")),
            (Value::from("zero"), false)
        );
    }

    #[test]
    fn test_compact() {
        let packed = compact(vec![Value::Number(1.0), Value::from("x"), Value::Bool(true)]);
        let expected = map_of(serde_json::json!({"T1": 1, "T2": "x", "T3": true}));

        assert_eq!(Value::Map(packed.clone()), expected);
        assert_eq!(
            packed.keys().cloned().collect::<Vec<_>>(),
            vec!["T1", "T2", "T3"]
        );
        assert_eq!(compact_get(&packed, 1), Some(&Value::from("x")));
        assert_eq!(compact_get(&packed, 3), None);
    }

    #[test]
    fn test_compact_empty() {
        assert!(compact(vec![]).is_empty());
    }

    #[test]
    fn test_length() {
        assert_eq!(length(&Value::Null), 0);
        assert_eq!(length(&Value::Map(Map::new())), 0);
        assert_eq!(length(&Value::List(vec![])), 0);
        assert_eq!(length(&map_of(serde_json::json!({"a": 1, "b": 2}))), 2);
        assert_eq!(length(&map_of(serde_json::json!([1, 2, 3]))), 3);
        assert_eq!(length(&Value::from("héllo")), 6);
        assert_eq!(length(&Value::Number(12.0)), 0);
    }
}
