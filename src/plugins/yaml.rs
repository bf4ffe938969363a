//! YAML resource files (`.yaml`, `.yml`).

use serde_json::Value;

use crate::{error::Error, traits::FormatPlugin};

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlPlugin;

impl FormatPlugin for YamlPlugin {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".yaml", ".yml"]
    }

    fn parse(&self, raw: &str) -> Result<Value, Error> {
        Ok(serde_yaml::from_str(raw)?)
    }

    fn serialize(&self, data: &Value) -> Result<String, Error> {
        Ok(serde_yaml::to_string(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde_json::json;

    #[test]
    fn test_parse_nested() {
        let data = YamlPlugin
            .parse(indoc! {"
                menu:
                  open: Open
                  close: Close
                title: Hello
            "})
            .unwrap();
        assert_eq!(
            data,
            json!({ "menu": { "open": "Open", "close": "Close" }, "title": "Hello" })
        );
        let keys: Vec<&String> = data["menu"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["open", "close"]);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(YamlPlugin.parse("a: [unclosed").is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let data = json!({ "b": "two", "a": { "c": "three" } });
        let output = YamlPlugin.serialize(&data).unwrap();
        assert_eq!(output, "b: two\na:\n  c: three\n");
        assert_eq!(YamlPlugin.parse(&output).unwrap(), data);
    }
}
