//! Values handling with deep merge support
//!
//! Values are the configuration input of a render. They are decoded from
//! YAML or JSON into the shim [`Value`] model, so every number is already a
//! float64 by the time a template sees it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::value::{Map, Value};

/// Values container with deep merge capability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub Value);

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(Value::Map(Map::new()))
    }

    /// Load values from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse values from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Ok(Self::normalized(value))
    }

    /// Parse values from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::normalized(value))
    }

    // an empty document decodes to null; treat it as no values
    fn normalized(value: Value) -> Self {
        if value.is_null() {
            Self::new()
        } else {
            Self(value)
        }
    }

    /// Deep merge another Values into this one
    ///
    /// Rules:
    /// - Scalars: overlay replaces base
    /// - Maps: recursive merge
    /// - Lists: overlay replaces base (not appended)
    pub fn merge(&mut self, overlay: &Values) {
        deep_merge(&mut self.0, &overlay.0);
    }

    /// Set a value by dotted path (e.g., "image.tag")
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let parts: Vec<&str> = path.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(CoreError::ValuesMerge {
                message: format!("Invalid key path: '{}'", path),
            });
        }
        set_nested(&mut self.0, &parts, value);
        Ok(())
    }

    /// Get a value by dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();
        get_nested(&self.0, &parts)
    }

    /// Get the inner value
    pub fn inner(&self) -> &Value {
        &self.0
    }
}

/// Deep merge two values
fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Map(base_map), Value::Map(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}

/// Set a nested value by path, replacing non-map intermediates
fn set_nested(value: &mut Value, path: &[&str], new_value: Value) {
    let Some((key, remaining)) = path.split_first() else {
        *value = new_value;
        return;
    };

    if !matches!(value, Value::Map(_)) {
        *value = Value::Map(Map::new());
    }

    if let Value::Map(map) = value {
        let entry = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Map(Map::new()));
        set_nested(entry, remaining, new_value);
    }
}

/// Get a nested value by path
fn get_nested<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let Some((key, remaining)) = path.split_first() else {
        return Some(value);
    };

    match value {
        Value::Map(map) => map.get(*key).and_then(|v| get_nested(v, remaining)),
        _ => None,
    }
}

/// Parse --set arguments (key=value format)
///
/// Numbers become float64 like any decoded number.
pub fn parse_set_values(set_args: &[String]) -> Result<Values> {
    let mut values = Values::new();

    for arg in set_args {
        let (key, val) = arg.split_once('=').ok_or_else(|| CoreError::ValuesMerge {
            message: format!("Invalid --set format: '{}'. Expected key=value", arg),
        })?;

        let value = if val == "true" {
            Value::Bool(true)
        } else if val == "false" {
            Value::Bool(false)
        } else if val == "null" {
            Value::Null
        } else if let Ok(num) = val.parse::<f64>()
            && num.is_finite()
        {
            Value::Number(num)
        } else if val.starts_with('[') || val.starts_with('{') {
            serde_json::from_str(val).unwrap_or_else(|_| Value::from(val))
        } else {
            Value::from(val)
        };

        values.set(key, value)?;
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_merge() {
        let mut base = Values::from_yaml(
            r#"
image:
  repository: nginx
  tag: "1.0"
replicas: 1
"#,
        )
        .unwrap();

        let overlay = Values::from_yaml(
            r#"
image:
  tag: "2.0"
  pullPolicy: Always
replicas: 3
"#,
        )
        .unwrap();

        base.merge(&overlay);

        assert_eq!(base.get("image.repository").unwrap(), &Value::from("nginx"));
        assert_eq!(base.get("image.tag").unwrap(), &Value::from("2.0"));
        assert_eq!(base.get("image.pullPolicy").unwrap(), &Value::from("Always"));
        assert_eq!(base.get("replicas").unwrap(), &Value::Number(3.0));
    }

    #[test]
    fn test_lists_are_replaced() {
        let mut base = Values::from_json(r#"{"args": ["a", "b"]}"#).unwrap();
        let overlay = Values::from_json(r#"{"args": ["c"]}"#).unwrap();
        base.merge(&overlay);

        assert_eq!(
            base.get("args").unwrap(),
            &Value::List(vec![Value::from("c")])
        );
    }

    #[test]
    fn test_empty_document() {
        let values = Values::from_yaml("").unwrap();
        assert_eq!(values, Values::new());
    }

    #[test]
    fn test_set_nested() {
        let mut values = Values::new();
        values.set("image.tag", Value::from("v1")).unwrap();
        values.set("replicas", Value::Number(3.0)).unwrap();

        assert_eq!(values.get("image.tag").unwrap(), &Value::from("v1"));
        assert_eq!(values.get("replicas").unwrap(), &Value::Number(3.0));
        assert!(values.set("image..tag", Value::Null).is_err());
    }

    #[test]
    fn test_parse_set_values() {
        let args = vec![
            "image.tag=v2".to_string(),
            "replicas=5".to_string(),
            "debug=true".to_string(),
            "resources.memory=2Gi".to_string(),
            "ports=[80, 443]".to_string(),
        ];

        let values = parse_set_values(&args).unwrap();

        assert_eq!(values.get("image.tag").unwrap(), &Value::from("v2"));
        assert!(matches!(values.get("replicas").unwrap(), Value::Number(n) if *n == 5.0));
        assert_eq!(values.get("debug").unwrap(), &Value::Bool(true));
        assert_eq!(values.get("resources.memory").unwrap(), &Value::from("2Gi"));
        assert_eq!(
            values.get("ports").unwrap(),
            &Value::List(vec![Value::Number(80.0), Value::Number(443.0)])
        );
    }

    #[test]
    fn test_parse_set_values_rejects_missing_equals() {
        let err = parse_set_values(&["replicas".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Expected key=value"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.yaml");
        std::fs::write(&path, "storage:\n  size: 20Gi\n").unwrap();

        let values = Values::from_file(&path).unwrap();
        assert_eq!(values.get("storage.size").unwrap(), &Value::from("20Gi"));
    }
}
