//! JSON resource files (`.json`).

use serde_json::Value;

use crate::{error::Error, traits::FormatPlugin};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPlugin;

impl FormatPlugin for JsonPlugin {
    fn name(&self) -> &'static str {
        "json"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".json"]
    }

    fn parse(&self, raw: &str) -> Result<Value, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Two-space indentation with a trailing newline.
    fn serialize(&self, data: &Value) -> Result<String, Error> {
        let mut content = serde_json::to_string_pretty(data)?;
        content.push('\n');
        Ok(content)
    }
}
