// SPDX-License-Identifier: MIT OR Apache-2.0

//! The untyped JSON object every decode starts from.
//!
//! A [`RawObject`] keeps the three states a probe has to tell apart: a key
//! that is absent, a key that is present with `null`, and a key that is
//! present with an (possibly empty) object.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, VpcError};

/// One decoded JSON object prior to variant resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawObject(Map<String, Value>);

impl RawObject {
    /// Create an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse JSON text into a raw object.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::MalformedInput`] naming `family` when the text is
    /// not valid JSON or its top-level value is not an object.
    #[allow(clippy::result_large_err)]
    pub fn from_str(family: &'static str, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| VpcError::MalformedInput {
            family,
            reason: e.to_string(),
        })?;
        Self::from_value(family, value)
    }

    /// Parse UTF-8 JSON bytes into a raw object.
    ///
    /// # Errors
    ///
    /// Same as [`RawObject::from_str`].
    #[allow(clippy::result_large_err)]
    pub fn from_slice(family: &'static str, json: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(json).map_err(|e| VpcError::MalformedInput {
            family,
            reason: e.to_string(),
        })?;
        Self::from_value(family, value)
    }

    /// Wrap an already parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::MalformedInput`] when `value` is not an object.
    #[allow(clippy::result_large_err)]
    pub fn from_value(family: &'static str, value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(VpcError::MalformedInput {
                family,
                reason: format!("expected a JSON object, found {}", kind_of(&other)),
            }),
        }
    }

    /// Raw value stored under `key`, `None` when the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` is present, regardless of its value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The string stored under `key`, if the key holds a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Decode the field `key` as `T`.
    ///
    /// Absent keys and explicit `null` both decode to `None`; a present value
    /// of the wrong shape is a [`VpcError::FieldType`] naming the family,
    /// variant and field.
    ///
    /// # Errors
    ///
    /// See above.
    #[allow(clippy::result_large_err)]
    pub fn field<T: DeserializeOwned>(
        &self,
        family: &'static str,
        variant: &'static str,
        key: &str,
    ) -> Result<Option<T>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|source| VpcError::FieldType {
                    family,
                    variant,
                    field: key.to_string(),
                    source,
                }),
        }
    }

    /// Encode `value` under `key`. `None` leaves the key absent.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::Encode`] naming `key` when `value` cannot be
    /// represented as JSON.
    #[allow(clippy::result_large_err)]
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: Option<&T>) -> Result<()> {
        if let Some(value) = value {
            let encoded = serde_json::to_value(value).map_err(|e| VpcError::Encode {
                field: key.to_string(),
                reason: e.to_string(),
            })?;
            self.0.insert(key.to_string(), encoded);
        }
        Ok(())
    }

    /// Insert an already encoded value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a `serde_json::Value::Object`.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for RawObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawObject> for Value {
    fn from(raw: RawObject) -> Self {
        raw.into_value()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_str_rejects_non_object() {
        let err = RawObject::from_str("InstanceTemplate", "[1, 2]").unwrap_err();
        match err {
            VpcError::MalformedInput { family, reason } => {
                assert_eq!(family, "InstanceTemplate");
                assert!(reason.contains("an array"));
            }
            other => panic!("Expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_from_str_rejects_invalid_json() {
        let err = RawObject::from_str("InstanceTemplate", "{\"id\":").unwrap_err();
        assert!(matches!(err, VpcError::MalformedInput { .. }));
    }

    #[test]
    fn test_field_absent_and_null_are_unset() {
        let raw = RawObject::from_value("F", json!({"name": null})).unwrap();
        let name: Option<String> = raw.field("F", "V", "name").unwrap();
        let id: Option<String> = raw.field("F", "V", "id").unwrap();
        assert!(name.is_none());
        assert!(id.is_none());
        assert!(raw.contains_key("name"));
        assert!(!raw.contains_key("id"));
    }

    #[test]
    fn test_field_type_mismatch() {
        let raw = RawObject::from_value("F", json!({"port_min": "eighty"})).unwrap();
        let err = raw.field::<u32>("F", "V", "port_min").unwrap_err();
        match err {
            VpcError::FieldType {
                family,
                variant,
                field,
                ..
            } => {
                assert_eq!(family, "F");
                assert_eq!(variant, "V");
                assert_eq!(field, "port_min");
            }
            other => panic!("Expected FieldType, got {other:?}"),
        }
    }

    #[test]
    fn test_put_skips_none() {
        let mut raw = RawObject::new();
        raw.put("name", Some("rule-1")).unwrap();
        raw.put::<String>("id", None).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.get_str("name"), Some("rule-1"));
    }

    #[test]
    fn test_put_reports_field_on_encode_failure() {
        use std::collections::BTreeMap;

        // Maps with non-string keys cannot become JSON objects.
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], 1u8);

        let mut raw = RawObject::new();
        let err = raw.put("user_tags", Some(&bad)).unwrap_err();
        match err {
            VpcError::Encode { field, .. } => assert_eq!(field, "user_tags"),
            other => panic!("Expected Encode, got {other:?}"),
        }
    }
}
