/// This module provides [`ResourceManager`], the entry point for loading a folder of
/// localization files into translation groups, parsing single files, and saving
/// updates back with merge semantics.
///
/// A manager owns a [`PluginRegistry`] and a [`LocaleOracle`]; both are fixed after
/// construction, so one manager can serve any number of concurrent walks and saves.
///
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    aggregate::read_and_parse,
    error::Error,
    locale::LocaleTable,
    merge::deep_merge,
    options::LoadOptions,
    plugins::PluginRegistry,
    traits::LocaleOracle,
    types::{LoadedNode, SaveRequest},
    walker::walk,
};

/// Loads, parses and saves localization resources.
pub struct ResourceManager {
    registry: PluginRegistry,
    oracle: Box<dyn LocaleOracle>,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceManager {
    /// Creates a manager with every built-in plugin and the default locale table.
    pub fn new() -> Self {
        Self::with_parts(PluginRegistry::with_defaults(), LocaleTable::new())
    }

    /// Creates a manager from an explicit registry and oracle.
    pub fn with_parts(registry: PluginRegistry, oracle: impl LocaleOracle + 'static) -> Self {
        Self {
            registry,
            oracle: Box::new(oracle),
        }
    }

    /// Creates a manager from [`LoadOptions`].
    ///
    /// # Returns
    ///
    /// An `Error::UnknownPlugin` if `options.plugins` names a plugin that does not exist.
    pub fn from_options(options: &LoadOptions) -> Result<Self, Error> {
        let registry = if options.plugins.is_empty() {
            PluginRegistry::with_defaults()
        } else {
            PluginRegistry::from_names(&options.plugins)?
        };
        let oracle = LocaleTable::new().with_extra(options.extra_locales.iter().cloned());
        Ok(Self::with_parts(registry, oracle))
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn oracle(&self) -> &dyn LocaleOracle {
        self.oracle.as_ref()
    }

    /// Walks `path` recursively and returns its groups and subfolders.
    ///
    /// # Returns
    ///
    /// The folder's items, or an `Error` if any directory in the tree cannot be listed
    /// or one of its entries cannot be stat'ed. Unparseable files never fail the walk.
    pub async fn load_folder<P: AsRef<Path>>(&self, path: P) -> Result<Vec<LoadedNode>, Error> {
        walk(path.as_ref(), &self.registry, self.oracle.as_ref()).await
    }

    /// Parses one file, reporting why it could not be parsed.
    pub async fn try_parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Value, Error> {
        read_and_parse(&self.registry, path.as_ref()).await
    }

    /// Parses one file; any failure yields `None`.
    pub async fn parse_file<P: AsRef<Path>>(&self, path: P) -> Option<Value> {
        let path = path.as_ref();
        match self.try_parse_file(path).await {
            Ok(data) => Some(data),
            Err(e) => {
                debug!(file = %path.display(), error = %e, "parse failed");
                None
            }
        }
    }

    /// Merges `request.data` into the file's current content and writes it back.
    ///
    /// Nothing is written unless reading, parsing, merging and serializing all
    /// succeed and the serializer produced non-empty output.
    pub async fn try_save_file(&self, request: &SaveRequest) -> Result<(), Error> {
        let path = request.file_path.as_path();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;
        let plugin = self
            .registry
            .resolve(file_name)
            .ok_or_else(|| Error::NoPlugin(file_name.to_string()))?;

        let raw = tokio::fs::read_to_string(path).await?;
        let mut data = plugin.parse(&raw)?;
        deep_merge(&mut data, &request.data);

        let serialized = plugin.rewrite(&raw, &data)?;
        if serialized.trim().is_empty() {
            return Err(Error::EmptyOutput(path.to_path_buf()));
        }

        tokio::fs::write(path, serialized).await?;
        debug!(file = %path.display(), plugin = plugin.name(), "saved");
        Ok(())
    }

    /// Merge-saves one file; `false` on any failure.
    pub async fn save_file(&self, request: &SaveRequest) -> bool {
        match self.try_save_file(request).await {
            Ok(()) => true,
            Err(e) => {
                warn!(file = %request.file_path.display(), error = %e, "save failed");
                false
            }
        }
    }
}
