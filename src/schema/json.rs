//! JSON text in the exact shape the model prompt formats were written against.
//!
//! Prompt formats embed JSON produced by Python's `json.dumps`: `", "` and
//! `": "` separators, ASCII-only output, and for the Jinja `tojson` filter
//! sorted keys plus HTML-safe escaping. serde_json's defaults differ on all
//! of these, so the helpers here adjust its output.

use super::error::{TemplateError, TemplateResult};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::io;

/// Compact formatter with Python's default separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn write_with<F: Formatter>(value: &Value, formatter: F) -> TemplateResult<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| TemplateError::Serialization(e.to_string()))?;
    let text = String::from_utf8(buf).map_err(|e| TemplateError::Serialization(e.to_string()))?;
    Ok(ascii_escape(&text))
}

/// Escape every character outside printable ASCII as `\uXXXX`.
///
/// Such characters can only occur inside JSON strings, so escaping them after
/// serialization is safe. Astral characters become surrogate pairs.
fn ascii_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut units = [0u16; 2];
    for c in text.chars() {
        if (c as u32) < 0x7f {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn html_safe(text: String) -> String {
    text.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\'', "\\u0027")
}

/// `json.dumps(value)`: insertion order, spaced separators, ASCII only.
pub(crate) fn dumps(value: &Value) -> TemplateResult<String> {
    write_with(value, SpacedFormatter)
}

/// Jinja `value | tojson`.
pub(crate) fn tojson(value: &Value) -> TemplateResult<String> {
    write_with(&sort_keys(value), SpacedFormatter).map(html_safe)
}

/// Jinja `value | tojson(indent=4)`.
pub(crate) fn tojson_pretty(value: &Value) -> TemplateResult<String> {
    write_with(&sort_keys(value), PrettyFormatter::with_indent(b"    ")).map(html_safe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dumps_keeps_insertion_order() {
        let value = json!({"b": 1, "a": [1, 2], "c": {}});
        assert_eq!(dumps(&value).unwrap(), r#"{"b": 1, "a": [1, 2], "c": {}}"#);
    }

    #[test]
    fn test_dumps_escapes_non_ascii() {
        let value = json!({"city": "Zürich", "emoji": "😀"});
        assert_eq!(
            dumps(&value).unwrap(),
            r#"{"city": "Z\u00fcrich", "emoji": "\ud83d\ude00"}"#
        );
    }

    #[test]
    fn test_tojson_sorts_and_escapes_html() {
        let value = json!({"query": "<a & 'b'>", "limit": 5});
        assert_eq!(
            tojson(&value).unwrap(),
            r#"{"limit": 5, "query": "\u003ca \u0026 \u0027b\u0027\u003e"}"#
        );
    }

    #[test]
    fn test_tojson_pretty_layout() {
        let value = json!({"type": "function", "function": {"name": "f", "parameters": {}}});
        let expected = "{\n    \"function\": {\n        \"name\": \"f\",\n        \"parameters\": {}\n    },\n    \"type\": \"function\"\n}";
        assert_eq!(tojson_pretty(&value).unwrap(), expected);
    }
}
