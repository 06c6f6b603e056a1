mod collection;
mod cursor;
mod keys;
mod object;

use std::io::Read;

use tracing::{debug, trace};

use crate::arena::RefTable;
use crate::error::DecodeError;
use crate::value::Value;
use crate::{DecodeOptions, Error, Result};

use collection::Building;
use cursor::Cursor;
use keys::read_key;

pub use object::resolve_property_name;

/// Shortest possible array entry is `i:0;N;`.
const MIN_ENTRY_LEN: usize = 6;

pub fn from_str(input: &str, options: &DecodeOptions) -> std::result::Result<Value, DecodeError> {
    let mut decoder = Decoder::new(input, options);
    decoder.decode_document()
}

pub fn from_slice(input: &[u8], options: &DecodeOptions) -> std::result::Result<Value, DecodeError> {
    let text = std::str::from_utf8(input).map_err(|err| DecodeError::InvalidUtf8 {
        position: err.valid_up_to(),
    })?;
    from_str(text, options)
}

pub fn from_reader<R: Read>(mut reader: R, options: &DecodeOptions) -> Result<Value> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::Io)?;
    Ok(from_str(&buf, options)?)
}

/// Per-call parse state. Nothing here outlives one decode.
pub(crate) struct Decoder<'a> {
    cursor: Cursor<'a>,
    refs: RefTable,
    max_depth: usize,
    allow_trailing: bool,
    depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a str, options: &DecodeOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            refs: RefTable::new(),
            max_depth: options.max_depth,
            allow_trailing: options.allow_trailing,
            depth: 0,
        }
    }

    fn decode_document(&mut self) -> std::result::Result<Value, DecodeError> {
        debug!(input_len = self.cursor.remaining().len(), "decode start");
        let value = self.decode_value()?;
        if !self.cursor.is_at_end() {
            if !self.allow_trailing {
                return Err(DecodeError::TrailingInput {
                    position: self.cursor.position(),
                });
            }
            debug!(
                position = self.cursor.position(),
                ignored = self.cursor.remaining().len(),
                "ignoring trailing input"
            );
        }
        debug!(slots = self.refs.len(), "decode finished");
        Ok(value)
    }

    /// Reads one type tag and decodes the value it introduces.
    fn decode_value(&mut self) -> std::result::Result<Value, DecodeError> {
        let (tag, position) = self.cursor.read_type_tag()?;
        match tag {
            b'N' => {
                self.refs.push(Value::Null);
                Ok(Value::Null)
            }
            b'b' => {
                let token = self.cursor.read_delimited(b';')?;
                Ok(self.push_scalar(Value::Bool(token == "1")))
            }
            b'i' => {
                let value = self.cursor.read_int()?;
                Ok(self.push_scalar(Value::Int(value)))
            }
            b'd' => {
                let token = self.cursor.read_delimited(b';')?;
                let value = parse_float(token).ok_or(DecodeError::MalformedNumber {
                    position: position + 2,
                })?;
                Ok(self.push_scalar(Value::Float(value)))
            }
            b's' => {
                let len = self.cursor.read_length(b'"')?;
                let value = self.cursor.read_string(len, b"\";")?;
                Ok(self.push_scalar(Value::from(value)))
            }
            b'a' => self.nested(position, Self::decode_array),
            b'O' => self.nested(position, Self::decode_object),
            b'C' => self.decode_custom(),
            b'r' => {
                let index = self.cursor.read_int()?;
                let value = self.refs.get(index)?;
                trace!(index, slot = self.refs.len() + 1, "aliasing backreference");
                self.refs.push(value.clone());
                Ok(value)
            }
            b'R' => {
                let index = self.cursor.read_int()?;
                trace!(index, "reference");
                self.refs.get(index)
            }
            other => Err(DecodeError::UnknownTag {
                tag: other as char,
                position,
            }),
        }
    }

    fn push_scalar(&mut self, value: Value) -> Value {
        self.refs.push(value.clone());
        value
    }

    fn nested<F>(&mut self, position: usize, decode: F) -> std::result::Result<Value, DecodeError>
    where
        F: FnOnce(&mut Self) -> std::result::Result<Value, DecodeError>,
    {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthExceeded {
                max_depth: self.max_depth,
                position,
            });
        }
        self.depth += 1;
        let result = decode(self);
        self.depth -= 1;
        result
    }

    /// Declared counts come from the input, so never preallocate more than
    /// the remaining text could hold.
    fn capacity_hint(&self, count: usize) -> usize {
        count.min(self.cursor.remaining().len() / MIN_ENTRY_LEN)
    }

    /// `a:<count>:{<key><value>...}`
    fn decode_array(&mut self) -> std::result::Result<Value, DecodeError> {
        let count = self.cursor.read_length(b'{')?;
        let slot = self.refs.reserve();
        let mut building = Building::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            let key = read_key(&mut self.cursor)?;
            let value = self.decode_value()?;
            if building.insert(key, value) {
                trace!(slot, position = self.cursor.position(), "array promoted to map");
            }
        }
        self.cursor.expect(b'}')?;

        let value = building.finish();
        self.refs.fill(slot, value.clone());
        Ok(value)
    }
}

fn parse_float(token: &str) -> Option<f64> {
    match token {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NAN" => Some(f64::NAN),
        _ => {
            let digits = token.strip_prefix('-').unwrap_or(token);
            // Rust also accepts "inf"/"nan" spellings; the wire format does not.
            if !digits.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.') {
                return None;
            }
            token.parse::<f64>().ok()
        }
    }
}
