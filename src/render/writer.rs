use indexmap::IndexMap;

use crate::constants::{
    INCOMPLETE_CLASS, INCOMPLETE_CLASS_NAME_KEY, SERIALIZED_KEY, STD_CLASS,
};
use crate::num::number::{format_int, format_php_float};
use crate::value::{CustomPayload, Key, Object, Value};

/// Builds `var_export` text. `level` follows PHP's own bookkeeping: the root
/// is level 1 and every nested element is two levels deeper.
pub(crate) struct VarExportWriter {
    buffer: String,
    indent_cache: Vec<String>,
}

impl VarExportWriter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_cache: vec![String::new()],
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_root(&mut self, value: &Value) {
        self.write_value(value, 1);
    }

    fn write_spaces(&mut self, count: usize) {
        if count >= self.indent_cache.len() {
            self.extend_indent_cache(count);
        }
        self.buffer.push_str(&self.indent_cache[count]);
    }

    fn extend_indent_cache(&mut self, count: usize) {
        while self.indent_cache.len() <= count {
            let next = " ".repeat(self.indent_cache.len());
            self.indent_cache.push(next);
        }
    }

    fn write_value(&mut self, value: &Value, level: usize) {
        match value {
            // var_export refuses recursion and prints NULL in its place.
            Value::Null | Value::Recursion(_) => self.buffer.push_str("NULL"),
            Value::Bool(value) => self.buffer.push_str(if *value { "true" } else { "false" }),
            Value::Int(value) => self.buffer.push_str(&format_int(*value)),
            Value::Float(value) => self.buffer.push_str(&format_php_float(*value)),
            Value::Str(value) => self.write_quoted(value),
            Value::List(items) => {
                let entries = items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| (Key::Int(idx as i64), item));
                self.write_array(entries, level);
            }
            Value::Map(map) => self.write_array(map.iter().map(|(k, v)| (k.clone(), v)), level),
            Value::Object(object) => self.write_object(object, level),
            Value::Custom(custom) => self.write_custom(custom, level),
        }
    }

    fn open_nested(&mut self, level: usize) {
        if level > 1 {
            self.buffer.push('\n');
            self.write_spaces(level - 1);
        }
    }

    fn close_nested(&mut self, level: usize) {
        if level > 1 {
            self.write_spaces(level - 1);
        }
    }

    fn write_array<'v, I>(&mut self, entries: I, level: usize)
    where
        I: Iterator<Item = (Key, &'v Value)>,
    {
        self.open_nested(level);
        self.buffer.push_str("array (\n");
        for (key, value) in entries {
            self.write_spaces(level + 1);
            self.write_key(&key);
            self.buffer.push_str(" => ");
            self.write_value(value, level + 2);
            self.buffer.push_str(",\n");
        }
        self.close_nested(level);
        self.buffer.push(')');
    }

    fn write_object(&mut self, object: &Object, level: usize) {
        self.open_nested(level);
        let std_class = object.class == STD_CLASS;
        if std_class {
            self.buffer.push_str("(object) array(\n");
        } else {
            self.buffer.push('\\');
            self.buffer.push_str(&object.class);
            self.buffer.push_str("::__set_state(array(\n");
        }
        self.write_properties(&object.properties, level);
        self.close_nested(level);
        self.buffer.push_str(if std_class { ")" } else { "))" });
    }

    fn write_custom(&mut self, custom: &CustomPayload, level: usize) {
        let mut properties = IndexMap::with_capacity(2);
        properties.insert(
            INCOMPLETE_CLASS_NAME_KEY.to_string(),
            Value::from(custom.class.as_str()),
        );
        properties.insert(SERIALIZED_KEY.to_string(), Value::from(custom.payload.as_str()));

        self.open_nested(level);
        self.buffer.push('\\');
        self.buffer.push_str(INCOMPLETE_CLASS);
        self.buffer.push_str("::__set_state(array(\n");
        self.write_properties(&properties, level);
        self.close_nested(level);
        self.buffer.push_str("))");
    }

    fn write_properties(&mut self, properties: &IndexMap<String, Value>, level: usize) {
        for (name, value) in properties {
            self.write_spaces(level + 2);
            self.write_quoted(name);
            self.buffer.push_str(" => ");
            self.write_value(value, level + 2);
            self.buffer.push_str(",\n");
        }
    }

    fn write_key(&mut self, key: &Key) {
        match key {
            Key::Int(value) => self.buffer.push_str(&format_int(*value)),
            Key::Str(value) => self.write_quoted(value),
        }
    }

    /// Single-quoted literal. NUL bytes cannot live inside single quotes, so
    /// they are spliced in as `' . "\0" . '`.
    fn write_quoted(&mut self, value: &str) {
        self.buffer.push('\'');
        for ch in value.chars() {
            match ch {
                '\'' => self.buffer.push_str("\\'"),
                '\\' => self.buffer.push_str("\\\\"),
                '\0' => self.buffer.push_str("' . \"\\0\" . '"),
                _ => self.buffer.push(ch),
            }
        }
        self.buffer.push('\'');
    }
}
