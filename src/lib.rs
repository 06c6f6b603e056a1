pub mod arena;
pub mod constants;
pub mod decode;
pub mod error;
pub mod num;
pub mod options;
pub mod render;
pub mod value;

use std::io::Read;

use serde::de::DeserializeOwned;

pub use crate::decode::resolve_property_name;
pub use crate::error::{DecodeError, DecodeErrorKind, Error};
pub use crate::options::{DecodeOptions, RenderMode, RenderOptions};
pub use crate::render::{render_json, render_var_export};
pub use crate::value::{to_json_value, CustomPayload, Key, Object, Value, ValueKind};

pub type Result<T> = std::result::Result<T, Error>;

pub fn decode(input: &str) -> std::result::Result<Value, DecodeError> {
    decode_with_options(input, &DecodeOptions::default())
}

pub fn decode_with_options(
    input: &str,
    options: &DecodeOptions,
) -> std::result::Result<Value, DecodeError> {
    decode::from_str(input, options)
}

pub fn decode_slice(input: &[u8]) -> std::result::Result<Value, DecodeError> {
    decode_slice_with_options(input, &DecodeOptions::default())
}

pub fn decode_slice_with_options(
    input: &[u8],
    options: &DecodeOptions,
) -> std::result::Result<Value, DecodeError> {
    decode::from_slice(input, options)
}

pub fn decode_reader<R: Read>(reader: R) -> Result<Value> {
    decode_reader_with_options(reader, &DecodeOptions::default())
}

pub fn decode_reader_with_options<R: Read>(reader: R, options: &DecodeOptions) -> Result<Value> {
    decode::from_reader(reader, options)
}

/// Decodes and then maps the JSON view of the value onto `T`.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_str_with_options(input, &DecodeOptions::default())
}

pub fn from_str_with_options<T: DeserializeOwned>(
    input: &str,
    options: &DecodeOptions,
) -> Result<T> {
    let value = decode::from_str(input, options)?;
    serde_json::from_value(to_json_value(&value)).map_err(|err| Error::deserialize(err.to_string()))
}

pub fn render(value: &Value, options: &RenderOptions) -> String {
    render::render(value, options)
}

pub fn render_with_mode(value: &Value, mode: RenderMode) -> String {
    render::render(value, &RenderOptions::new().with_mode(mode))
}

/// Decodes independent inputs. With the `parallel` feature the inputs are
/// spread over the rayon pool; results keep input order either way.
pub fn decode_batch(inputs: &[&str]) -> Vec<std::result::Result<Value, DecodeError>> {
    decode_batch_with_options(inputs, &DecodeOptions::default())
}

#[cfg(feature = "parallel")]
pub fn decode_batch_with_options(
    inputs: &[&str],
    options: &DecodeOptions,
) -> Vec<std::result::Result<Value, DecodeError>> {
    use rayon::prelude::*;

    inputs
        .par_iter()
        .map(|input| decode::from_str(input, options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn decode_batch_with_options(
    inputs: &[&str],
    options: &DecodeOptions,
) -> Vec<std::result::Result<Value, DecodeError>> {
    inputs
        .iter()
        .map(|input| decode::from_str(input, options))
        .collect()
}
