//! Format plugins and the ordered registry that resolves them by file name.
//!
//! Resolution is a linear scan in registration order: the first plugin whose
//! extension list matches a case-insensitive suffix of the file name wins.

pub mod android_strings;
pub mod json;
pub mod strings;
pub mod toml;
pub mod yaml;

pub use android_strings::AndroidStringsPlugin;
pub use json::JsonPlugin;
pub use strings::StringsPlugin;
pub use toml::TomlPlugin;
pub use yaml::YamlPlugin;

use std::fmt;

use crate::{error::Error, traits::FormatPlugin};

/// Ordered list of format plugins.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn FormatPlugin>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in plugin, in resolution order:
    /// JSON, YAML, TOML, Apple strings, Android strings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for name in Self::builtin_names() {
            if let Some(plugin) = builtin(name) {
                registry.register(plugin);
            }
        }
        registry
    }

    /// Creates a registry with the named built-in plugins, in the given order.
    pub fn from_names<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            let name = name.as_ref();
            let plugin = builtin(name).ok_or_else(|| Error::UnknownPlugin(name.to_string()))?;
            registry.register(plugin);
        }
        Ok(registry)
    }

    /// Names accepted by [`PluginRegistry::from_names`].
    pub fn builtin_names() -> &'static [&'static str] {
        &["json", "yaml", "toml", "strings", "android"]
    }

    /// Appends a plugin; it loses ties against every plugin registered before it.
    pub fn register(&mut self, plugin: Box<dyn FormatPlugin>) {
        self.plugins.push(plugin);
    }

    /// Returns the first plugin that handles `file_name`.
    pub fn resolve(&self, file_name: &str) -> Option<&dyn FormatPlugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.supports(file_name))
            .map(|plugin| plugin.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FormatPlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|plugin| plugin.name()))
            .finish()
    }
}

fn builtin(name: &str) -> Option<Box<dyn FormatPlugin>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "json" => Some(Box::new(JsonPlugin)),
        "yaml" | "yml" => Some(Box::new(YamlPlugin)),
        "toml" => Some(Box::new(TomlPlugin)),
        "strings" => Some(Box::new(StringsPlugin)),
        "android" | "androidstrings" | "xml" => Some(Box::new(AndroidStringsPlugin)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    struct FakePlugin(&'static str);

    impl FormatPlugin for FakePlugin {
        fn name(&self) -> &'static str {
            self.0
        }

        fn file_extensions(&self) -> &'static [&'static str] {
            &[".json"]
        }

        fn parse(&self, _raw: &str) -> Result<Value, Error> {
            Ok(Value::Null)
        }

        fn serialize(&self, _data: &Value) -> Result<String, Error> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_resolve_by_extension() {
        let registry = PluginRegistry::with_defaults();
        assert_eq!(registry.resolve("en.json").unwrap().name(), "json");
        assert_eq!(registry.resolve("en.yml").unwrap().name(), "yaml");
        assert_eq!(registry.resolve("en.yaml").unwrap().name(), "yaml");
        assert_eq!(registry.resolve("Cargo.toml").unwrap().name(), "toml");
        assert_eq!(
            registry.resolve("Localizable.strings").unwrap().name(),
            "strings"
        );
        assert_eq!(registry.resolve("strings.xml").unwrap().name(), "android");
        assert!(registry.resolve("notes.txt").is_none());
        assert!(registry.resolve("json").is_none());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = PluginRegistry::with_defaults();
        assert_eq!(registry.resolve("EN.JSON").unwrap().name(), "json");
        assert_eq!(registry.resolve("messages.Yaml").unwrap().name(), "yaml");
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let mut registry = PluginRegistry::new();
        registry.register(Box::new(FakePlugin("first")));
        registry.register(Box::new(FakePlugin("second")));
        assert_eq!(registry.resolve("a.json").unwrap().name(), "first");
    }

    #[test]
    fn test_from_names() {
        let registry = PluginRegistry::from_names(["yaml", "json"]).unwrap();
        assert_eq!(format!("{:?}", registry), r#"["yaml", "json"]"#);
        assert!(registry.resolve("a.toml").is_none());

        let err = PluginRegistry::from_names(["json", "ini"]).unwrap_err();
        assert!(matches!(err, Error::UnknownPlugin(name) if name == "ini"));
    }

    #[test]
    fn test_defaults_cover_builtin_names() {
        let registry = PluginRegistry::with_defaults();
        assert_eq!(registry.len(), PluginRegistry::builtin_names().len());
        assert!(!registry.is_empty());
    }
}
