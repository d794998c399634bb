//! JSON output: pretty-printing with a configurable indent.

use crate::errors::ParseError;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Four spaces per level.
pub const DEFAULT_INDENT: &[u8] = b"    ";

/// Render `value` as indented JSON text.
///
/// Object keys are written in insertion order (`serde_json` is built with
/// `preserve_order`), so the output follows the order of the source tree.
pub fn to_string_indented(value: &Value, indent: &[u8]) -> Result<String, ParseError> {
    let mut out = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(indent);
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Render `value` with the default four-space indent.
pub fn to_string_pretty(value: &Value) -> Result<String, ParseError> {
    to_string_indented(value, DEFAULT_INDENT)
}
