use indexmap::IndexMap;

use crate::constants::{CLASS_SEPARATOR, PROTECTED_MARKER, VISIBILITY_MARKER};
use crate::decode::keys::read_key;
use crate::decode::Decoder;
use crate::error::DecodeError;
use crate::value::{CustomPayload, Key, Object, Value};

/// Maps a raw property key to the name a caller sees.
///
/// PHP mangles non-public properties as `\0*\0name` (protected) and
/// `\0Class\0name` (private to `Class`). Private properties of another class
/// in the hierarchy keep the class as a `Class::name` prefix so they cannot
/// overwrite a same-named property of `class`. A public property literally
/// named `Class::name` can still collide with such a prefix.
pub fn resolve_property_name(key: &Key, class: &str) -> String {
    let raw = match key {
        Key::Int(value) => return value.to_string(),
        Key::Str(raw) => raw,
    };
    let Some(mangled) = raw.strip_prefix(VISIBILITY_MARKER) else {
        return raw.clone();
    };
    let Some((owner, name)) = mangled.split_once(VISIBILITY_MARKER) else {
        return raw.clone();
    };
    if owner == PROTECTED_MARKER || owner == class {
        return name.to_string();
    }
    format!("{owner}{CLASS_SEPARATOR}{name}")
}

impl Decoder<'_> {
    /// `O:<len>:"<class>":<count>:{<key><value>...}`
    pub(super) fn decode_object(&mut self) -> Result<Value, DecodeError> {
        let slot = self.refs.reserve();
        let class_len = self.cursor.read_length(b'"')?;
        let class = self.cursor.read_string(class_len, b"\":")?;
        let count = self.cursor.read_length(b'{')?;

        let mut properties = IndexMap::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            let key = read_key(&mut self.cursor)?;
            let name = resolve_property_name(&key, class);
            let value = self.decode_value()?;
            properties.insert(name, value);
        }
        self.cursor.expect(b'}')?;

        let object = Value::from(Object {
            class: class.to_string(),
            properties,
        });
        self.refs.fill(slot, object.clone());
        Ok(object)
    }

    /// `C:<len>:"<class>":<len>:{<payload>}`; the payload is kept verbatim.
    pub(super) fn decode_custom(&mut self) -> Result<Value, DecodeError> {
        let class_len = self.cursor.read_length(b'"')?;
        let class = self.cursor.read_string(class_len, b"\":")?;
        let payload_len = self.cursor.read_length(b'{')?;
        let payload = self.cursor.read_string(payload_len, b"}")?;

        let custom = Value::from(CustomPayload {
            class: class.to_string(),
            payload: payload.to_string(),
        });
        self.refs.push(custom.clone());
        Ok(custom)
    }
}
