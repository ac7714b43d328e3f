//! Conversion between the inbound wire representation and the internal
//! object model.

use std::collections::BTreeMap;

use serde_json::Map;

use crate::error::TypeError;
use crate::object::Object;
use crate::value::Value;

/// The reserved key carrying an object's UID on the wire.
pub const UID_KEY: &str = "_uid";

/// Bookkeeping keys that are never part of an object's data. They are
/// stripped when an [`ApiObject`] is converted to an [`Object`].
pub const RESERVED_KEYS: [&str; 5] = ["_uid", "_created", "_author", "_modified", "_modifier"];

/// An object as it appears in an API request or response: a flat JSON map
/// where data fields and reserved bookkeeping keys share one namespace.
pub type ApiObject = Map<String, serde_json::Value>;

/// Convert an inbound wire map into an [`Object`].
///
/// Reserved keys are dropped from the data. A missing or empty `_uid`
/// yields an object with an empty UID (the store assigns one on set).
/// A field holding a non-scalar value (array, object, null) is an error.
pub fn object_from_api(api: &ApiObject) -> Result<Object, TypeError> {
    let uid = match api.get(UID_KEY) {
        None => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(_) => return Err(TypeError::InvalidUid),
    };
    let mut data = BTreeMap::new();
    for (key, raw) in api {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let value = match raw {
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                Value::Number(n.as_f64().ok_or_else(|| TypeError::UnsupportedValue {
                    field: key.clone(),
                })?)
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            _ => {
                return Err(TypeError::UnsupportedValue { field: key.clone() });
            }
        };
        data.insert(key.clone(), value);
    }
    Ok(Object {
        uid,
        data,
    })
}

/// Convert an [`Object`] into its wire representation, re-attaching the
/// UID under the reserved key.
pub fn object_to_api(object: &Object) -> ApiObject {
    let mut api = Map::new();
    api.insert(
        UID_KEY.to_string(),
        serde_json::Value::String(object.uid.clone()),
    );
    for (key, value) in &object.data {
        let raw = match value {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
        };
        api.insert(key.clone(), raw);
    }
    api
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(json: &str) -> ApiObject {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn strips_reserved_keys() {
        let a = api(r#"{"_uid":"u1","_created":"x","_author":"y","_modified":"z","_modifier":"w","test":1}"#);
        let o = object_from_api(&a).unwrap();
        assert_eq!(o.uid, "u1");
        assert_eq!(o.data.len(), 1);
        assert_eq!(o.data["test"], Value::from(1));
    }

    #[test]
    fn missing_uid_is_empty() {
        let o = object_from_api(&api(r#"{"test":"hello"}"#)).unwrap();
        assert!(o.uid.is_empty());
    }

    #[test]
    fn non_string_uid_is_error() {
        let result = object_from_api(&api(r#"{"_uid":42}"#));
        assert_eq!(result, Err(TypeError::InvalidUid));
    }

    #[test]
    fn non_scalar_field_is_error() {
        let result = object_from_api(&api(r#"{"test":[1,2]}"#));
        assert!(matches!(result, Err(TypeError::UnsupportedValue { .. })));
    }

    #[test]
    fn roundtrip_through_api() {
        let a = api(r#"{"_uid":"u1","s":"hello","n":1.5,"b":true}"#);
        let o = object_from_api(&a).unwrap();
        let back = object_to_api(&o);
        assert_eq!(back["_uid"], serde_json::Value::String("u1".into()));
        assert_eq!(back["s"], serde_json::json!("hello"));
        assert_eq!(back["n"], serde_json::json!(1.5));
        assert_eq!(back["b"], serde_json::json!(true));
    }
}
