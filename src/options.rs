//! Options for building a [`crate::ResourceManager`].

use serde::Deserialize;

/// Configuration for locale recognition and plugin selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    /// Codes accepted as locales in addition to the built-in table.
    pub extra_locales: Vec<String>,
    /// Built-in plugin names in resolution order; empty means all defaults.
    pub plugins: Vec<String>,
}

impl LoadOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds extra locale codes.
    pub fn with_extra_locales<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_locales.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Restricts and orders the registered plugins.
    pub fn with_plugins<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugins = names.into_iter().map(Into::into).collect();
        self
    }
}
