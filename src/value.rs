use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

use crate::constants::{INCOMPLETE_CLASS_NAME_KEY, SERIALIZED_KEY};

/// Array key as written on the wire: `i:` or `s:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Key::Int(value) => Some(*value),
            Key::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(value) => Some(value.as_str()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(value) => write!(f, "{value}"),
            Key::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

/// An `O:` value. Property names are already demangled.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub class: String,
    pub properties: IndexMap<String, Value>,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// A `C:` value: the class implemented its own serializer, so the payload is
/// kept as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPayload {
    pub class: String,
    pub payload: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Object,
    Custom,
    Recursion,
}

/// A decoded value. Strings and compound payloads sit behind `Arc`, so a
/// backreference shares the referenced node instead of copying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<Vec<Value>>),
    Map(Arc<IndexMap<Key, Value>>),
    Object(Arc<Object>),
    Custom(Arc<CustomPayload>),
    /// Backreference to a compound value that was still being decoded when
    /// the reference was read. Holds the 1-based table slot.
    Recursion(usize),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Object(_) => ValueKind::Object,
            Value::Custom(_) => ValueKind::Custom,
            Value::Recursion(_) => ValueKind::Recursion,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Floats as-is, integers widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(&**value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(map) => Some(&**map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(&**object),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomPayload> {
        match self {
            Value::Custom(custom) => Some(&**custom),
            _ => None,
        }
    }

    /// Looks up a string key in a map or a property in an object.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(&Key::Str(name.to_string())),
            Value::Object(object) => object.get(name),
            _ => None,
        }
    }

    /// Looks up a position in a list or an integer key in a map.
    pub fn get_index(&self, index: i64) -> Option<&Value> {
        match self {
            Value::List(items) => usize::try_from(index).ok().and_then(|idx| items.get(idx)),
            Value::Map(map) => map.get(&Key::Int(index)),
            _ => None,
        }
    }

    /// True when both values are the same shared node, as two references
    /// resolved to one slot are.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(map: IndexMap<Key, Value>) -> Self {
        Value::Map(Arc::new(map))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(Arc::new(object))
    }
}

impl From<CustomPayload> for Value {
    fn from(custom: CustomPayload) -> Self {
        Value::Custom(Arc::new(custom))
    }
}

/// JSON view of a decoded value, shaped the way a browser would see the
/// unserialized data.
pub fn to_json_value(value: &Value) -> JsonValue {
    match value {
        Value::Null | Value::Recursion(_) => JsonValue::Null,
        Value::Bool(value) => JsonValue::Bool(*value),
        Value::Int(value) => JsonValue::Number(JsonNumber::from(*value)),
        Value::Float(value) => JsonNumber::from_f64(*value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Str(value) => JsonValue::String(value.to_string()),
        Value::List(items) => JsonValue::Array(items.iter().map(to_json_value).collect()),
        Value::Map(map) => {
            let mapped = map
                .iter()
                .map(|(key, value)| (key.to_string(), to_json_value(value)))
                .collect::<JsonMap<String, JsonValue>>();
            JsonValue::Object(mapped)
        }
        Value::Object(object) => {
            let mapped = object
                .properties
                .iter()
                .map(|(name, value)| (name.clone(), to_json_value(value)))
                .collect::<JsonMap<String, JsonValue>>();
            JsonValue::Object(mapped)
        }
        Value::Custom(custom) => {
            let mut mapped = JsonMap::new();
            mapped.insert(
                INCOMPLETE_CLASS_NAME_KEY.to_string(),
                JsonValue::String(custom.class.clone()),
            );
            mapped.insert(
                SERIALIZED_KEY.to_string(),
                JsonValue::String(custom.payload.clone()),
            );
            JsonValue::Object(mapped)
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(value) => serializer.collect_str(value),
            Key::Str(value) => serializer.serialize_str(value),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Recursion(_) => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) if value.is_finite() => serializer.serialize_f64(*value),
            Value::Float(_) => serializer.serialize_unit(),
            Value::Str(value) => serializer.serialize_str(value),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::Object(object) => {
                let mut out = serializer.serialize_map(Some(object.properties.len()))?;
                for (name, value) in &object.properties {
                    out.serialize_entry(name, value)?;
                }
                out.end()
            }
            Value::Custom(custom) => {
                let mut out = serializer.serialize_map(Some(2))?;
                out.serialize_entry(INCOMPLETE_CLASS_NAME_KEY, &custom.class)?;
                out.serialize_entry(SERIALIZED_KEY, &custom.payload)?;
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[rstest::rstest]
    fn json_view_stringifies_map_keys() {
        let mut map = IndexMap::new();
        map.insert(Key::Int(5), Value::from("a"));
        map.insert(Key::from("foo"), Value::from("b"));
        let value = Value::from(map);
        assert_eq!(to_json_value(&value), json!({"5": "a", "foo": "b"}));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"5":"a","foo":"b"}"#
        );
    }

    #[rstest::rstest]
    fn json_view_drops_non_finite_floats() {
        assert_eq!(to_json_value(&Value::Float(f64::NAN)), JsonValue::Null);
        assert_eq!(
            serde_json::to_string(&Value::Float(f64::INFINITY)).unwrap(),
            "null"
        );
    }

    #[rstest::rstest]
    fn json_view_of_custom_payload() {
        let value = Value::from(CustomPayload {
            class: "Foo".into(),
            payload: "abc".into(),
        });
        assert_eq!(
            to_json_value(&value),
            json!({"__PHP_Incomplete_Class_Name": "Foo", "serialized": "abc"})
        );
    }

    #[rstest::rstest]
    fn lookup_helpers() {
        let mut object = Object::new("User");
        object.properties.insert("name".into(), Value::from("Ada"));
        let value = Value::from(object);
        assert_eq!(value.get("name").and_then(Value::as_str), Some("Ada"));
        assert_eq!(value.kind(), ValueKind::Object);

        let list = Value::from(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list.get_index(1).and_then(Value::as_i64), Some(2));
        assert!(list.get_index(-1).is_none());
    }

    #[rstest::rstest]
    fn clones_share_compound_nodes() {
        let list = Value::from(vec![Value::from("a")]);
        let copy = list.clone();
        assert!(list.ptr_eq(&copy));
        assert!(!list.ptr_eq(&Value::from(vec![Value::from("a")])));
        assert!(!Value::Int(1).ptr_eq(&Value::Int(1)));
    }
}
