//! JSON pretty-printer.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::FormatError;

/// Re-serializes a JSON document with `indent` spaces per level.
///
/// Object key order is preserved.
pub fn pretty(body: &str, indent: usize) -> Result<String, FormatError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::with_capacity(body.len() * 2);
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}
