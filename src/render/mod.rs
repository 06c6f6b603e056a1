mod writer;

use std::io::Write;

use serde::Serialize;

use crate::value::Value;
use crate::{RenderMode, RenderOptions};

use writer::VarExportWriter;

pub fn render(value: &Value, options: &RenderOptions) -> String {
    match options.mode {
        RenderMode::VarExport => render_var_export(value),
        RenderMode::Json => render_json(value, options.indent),
    }
}

pub fn render_var_export(value: &Value) -> String {
    let mut writer = VarExportWriter::new();
    writer.write_root(value);
    writer.finish()
}

pub fn render_json(value: &Value, indent: usize) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail and Value serializes every variant.
    let _ = write_json(&mut out, value, indent);
    String::from_utf8(out).unwrap_or_default()
}

pub fn write_json<W: Write>(writer: W, value: &Value, indent: usize) -> serde_json::Result<()> {
    if indent == 0 {
        return serde_json::to_writer(writer, value);
    }
    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)
}
