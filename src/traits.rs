//! Collaborator traits used by the directory pipeline.
//!
//! A [`LocaleOracle`] decides whether a string names a language; a [`FormatPlugin`]
//! turns one file syntax into structured data and back.

use serde_json::Value;

use crate::error::Error;

/// Decides whether a candidate string denotes a recognized locale.
///
/// Implementations must be pure: the same input always yields the same answer.
pub trait LocaleOracle: Send + Sync {
    /// Returns the normalized locale for `candidate`, or `None` if it is not one.
    fn locale(&self, candidate: &str) -> Option<String>;
}

/// Parses and serializes one localization file syntax.
///
/// # Example
///
/// ```rust
/// use langtree::plugins::JsonPlugin;
/// use langtree::traits::FormatPlugin;
///
/// let plugin = JsonPlugin;
/// let data = plugin.parse(r#"{"hello": "Hello"}"#)?;
/// assert_eq!(data["hello"], "Hello");
/// # Ok::<(), langtree::Error>(())
/// ```
pub trait FormatPlugin: Send + Sync {
    /// Short identifier used by configuration, e.g. `json`.
    fn name(&self) -> &'static str;

    /// Lowercase filename suffixes handled by this plugin, dot included.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse raw file text into structured data.
    fn parse(&self, raw: &str) -> Result<Value, Error>;

    /// Serialize structured data back into file text.
    fn serialize(&self, data: &Value) -> Result<String, Error>;

    /// Serialize `data` as a new version of `original`, the file's current text.
    ///
    /// Formats whose parsed data cannot represent everything in the file (comments,
    /// attributes, unsupported elements) override this to edit `original` in place.
    fn rewrite(&self, original: &str, data: &Value) -> Result<String, Error> {
        let _ = original;
        self.serialize(data)
    }

    /// Whether this plugin claims `file_name`.
    fn supports(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.file_extensions()
            .iter()
            .any(|extension| lower.ends_with(extension))
    }
}
