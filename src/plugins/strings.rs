//! Support for Apple `.strings` localization files.
//!
//! A `.strings` file is a flat list of `"key" = "value";` pairs. It parses into a flat
//! object; values are kept exactly as written between the quotes, escapes included.
//! Saving edits the existing text in place so comments and layout survive.

use std::ops::Range;

use serde_json::{Map, Value};

use crate::{error::Error, traits::FormatPlugin};

#[derive(Debug, Clone, Copy, Default)]
pub struct StringsPlugin;

impl FormatPlugin for StringsPlugin {
    fn name(&self) -> &'static str {
        "strings"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".strings"]
    }

    fn parse(&self, raw: &str) -> Result<Value, Error> {
        let mut pairs = Map::new();
        for entry in scan(raw)? {
            pairs.insert(entry.key, Value::String(entry.value));
        }
        Ok(Value::Object(pairs))
    }

    fn serialize(&self, data: &Value) -> Result<String, Error> {
        let mut content = String::new();
        for (key, value) in flat_object(data)? {
            push_entry(&mut content, key, &value_text(key, value)?);
        }
        Ok(content)
    }

    /// Replaces the values that changed inside `original` and appends new keys at
    /// the end. Keys missing from `data` are left as they are.
    fn rewrite(&self, original: &str, data: &Value) -> Result<String, Error> {
        let object = flat_object(data)?;
        let mut updates = Map::new();
        for (key, value) in object {
            updates.insert(key.clone(), Value::String(value_text(key, value)?));
        }

        let entries = scan(original)?;
        let mut current = Map::new();
        for entry in &entries {
            current.insert(entry.key.clone(), Value::String(entry.value.clone()));
        }

        let mut content = String::with_capacity(original.len());
        let mut copied = 0;
        for entry in &entries {
            let Some(Value::String(new_value)) = updates.get(&entry.key) else {
                continue;
            };
            if current.get(&entry.key).and_then(Value::as_str) == Some(new_value.as_str()) {
                continue;
            }
            content.push_str(&original[copied..entry.span.start]);
            content.push_str(new_value);
            copied = entry.span.end;
        }
        content.push_str(&original[copied..]);

        let mut appended = updates
            .iter()
            .filter(|(key, _)| !current.contains_key(key.as_str()))
            .peekable();
        if appended.peek().is_some() && !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        for (key, value) in appended {
            push_entry(&mut content, key, value.as_str().unwrap_or_default());
        }
        Ok(content)
    }
}

/// One `"key" = "value"` pair and the byte range of its value inside the file.
struct Entry {
    key: String,
    value: String,
    span: Range<usize>,
}

/// Walks the file text, skipping comments and lines that are not pairs.
///
/// Only ASCII delimiters are ever used as slice boundaries, so any UTF-8 content
/// is safe.
fn scan(raw: &str) -> Result<Vec<Entry>, Error> {
    let bytes = raw.as_bytes();
    let mut pos = if raw.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
    let mut entries = Vec::new();

    loop {
        pos = skip_whitespace(bytes, pos);
        if pos >= bytes.len() {
            break;
        }

        if raw[pos..].starts_with("//") {
            pos = skip_line(bytes, pos);
        } else if raw[pos..].starts_with("/*") {
            let end = raw[pos + 2..]
                .find("*/")
                .ok_or_else(|| Error::InvalidResource("unterminated /* comment".to_string()))?;
            pos += 2 + end + 2;
        } else if bytes[pos] == b'"' {
            let key_end = closing_quote(bytes, pos)
                .ok_or_else(|| Error::InvalidResource("unterminated key".to_string()))?;
            let key = &raw[pos + 1..key_end];

            pos = skip_whitespace(bytes, key_end + 1);
            if bytes.get(pos) != Some(&b'=') {
                pos = skip_line(bytes, pos);
                continue;
            }
            pos = skip_whitespace(bytes, pos + 1);
            if bytes.get(pos) != Some(&b'"') {
                return Err(Error::InvalidResource(format!(
                    "value for `{}` is not a quoted string",
                    key
                )));
            }
            let value_end = closing_quote(bytes, pos).ok_or_else(|| {
                Error::InvalidResource(format!("unterminated value for `{}`", key))
            })?;
            let span = pos + 1..value_end;

            entries.push(Entry {
                key: key.to_string(),
                value: one_line(&raw[span.clone()]),
                span,
            });

            pos = skip_whitespace(bytes, value_end + 1);
            if bytes.get(pos) == Some(&b';') {
                pos += 1;
            }
        } else {
            pos = skip_line(bytes, pos);
        }
    }

    Ok(entries)
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn skip_line(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| pos + offset + 1)
}

/// Index of the unescaped `"` closing the string opened at `open`.
fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Joins a value spanning several lines into one line, using a literal `\n`
/// between the parts and dropping the continuation lines' leading whitespace.
fn one_line(value: &str) -> String {
    if !value.contains('\n') {
        return value.to_string();
    }
    value
        .lines()
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join(r"\n")
}

fn flat_object(data: &Value) -> Result<&Map<String, Value>, Error> {
    data.as_object()
        .ok_or_else(|| Error::DataMismatch(".strings files hold a flat key/value map".to_string()))
}

fn value_text(key: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(Error::DataMismatch(format!(
            "nested value for `{}` is not supported in .strings format",
            key
        ))),
    }
}

fn push_entry(content: &mut String, key: &str, value: &str) {
    content.push_str(&format!("\"{}\" = \"{}\";\n", key, value));
}
