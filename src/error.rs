//! All error types for the langtree crate.
//!
//! These are returned from the fallible layers (listing, parsing, serialization,
//! saving). The public `parse_file` and `save_file` operations collapse them into
//! `Option` and `bool`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no format plugin handles `{0}`")]
    NoPlugin(String),

    #[error("unknown plugin `{0}`")]
    UnknownPlugin(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("serializer produced no content for {}", .0.display())]
    EmptyOutput(PathBuf),

    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_no_plugin_error() {
        let error = Error::NoPlugin("notes.txt".to_string());
        assert_eq!(error.to_string(), "no format plugin handles `notes.txt`");
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_empty_output_error() {
        let error = Error::EmptyOutput(PathBuf::from("locales/en.json"));
        assert_eq!(
            error.to_string(),
            "serializer produced no content for locales/en.json"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::DataMismatch("nested value".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("DataMismatch"));
        assert!(debug.contains("nested value"));
    }
}
