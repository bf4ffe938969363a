#![forbid(unsafe_code)]
//! Organizes a directory tree of localization files into translation groups.
//!
//! Files that hold the same logical message set, across languages or naming variants,
//! are discovered and grouped automatically, and edits are merged back into the files
//! without losing content the tool does not know about.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langtree::{ResourceManager, SaveRequest};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), langtree::Error> {
//! let manager = ResourceManager::new();
//!
//! // locales/greeting.en.json + locales/greeting.fr.json -> one "greeting" group
//! for node in manager.load_folder("locales").await? {
//!     println!("{}", node.name());
//! }
//!
//! // Only "title" changes; every other key in the file is kept in place
//! let saved = manager
//!     .save_file(&SaveRequest::new("locales/greeting.en.json", json!({ "title": "Hi" })))
//!     .await;
//! assert!(saved);
//! # Ok(())
//! # }
//! ```
//!
//! # Grouping rules
//!
//! - `greeting.en.json`, `greeting_fr.json`: group `greeting`, languages `en`, `fr`
//! - `en.json`: whole-file translation in group [`DEFAULT_GROUP_NAME`]
//! - `en/common.json`, `fr/common.json`: group `common` via language folders
//! - `about.json`: its own group, with `about` as both prefix and language

pub mod aggregate;
pub mod error;
pub mod heuristic;
pub mod locale;
pub mod manager;
pub mod merge;
pub mod options;
pub mod plugins;
pub mod scan;
pub mod traits;
pub mod types;
pub mod walker;

use std::path::Path;

use serde_json::Value;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    heuristic::{DEFAULT_GROUP_NAME, NameInfo, infer_name_info},
    locale::LocaleTable,
    manager::ResourceManager,
    merge::deep_merge,
    options::LoadOptions,
    plugins::PluginRegistry,
    traits::{FormatPlugin, LocaleOracle},
    types::{FileDescriptor, FolderNode, LoadedNode, ParsedResource, ResourceGroup, SaveRequest},
};

/// Walks `path` with the default plugins and locale table.
pub async fn load_folder<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedNode>, Error> {
    ResourceManager::new().load_folder(path).await
}

/// Parses one file with the default plugins; any failure yields `None`.
pub async fn parse_file<P: AsRef<Path>>(path: P) -> Option<Value> {
    ResourceManager::new().parse_file(path).await
}

/// Merge-saves one file with the default plugins; `false` on any failure.
pub async fn save_file(request: &SaveRequest) -> bool {
    ResourceManager::new().save_file(request).await
}
