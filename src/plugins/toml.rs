//! TOML resource files (`.toml`).

use serde_json::Value;

use crate::{error::Error, traits::FormatPlugin};

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlPlugin;

impl FormatPlugin for TomlPlugin {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".toml"]
    }

    fn parse(&self, raw: &str) -> Result<Value, Error> {
        Ok(toml::from_str(raw)?)
    }

    /// TOML documents are tables; any other top level is rejected.
    fn serialize(&self, data: &Value) -> Result<String, Error> {
        if !data.is_object() {
            return Err(Error::DataMismatch(
                "TOML documents must have a table at the top level".to_string(),
            ));
        }
        Ok(toml::to_string(data)?)
    }
}
