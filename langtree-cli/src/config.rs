use std::path::Path;

use langtree::LoadOptions;

/// Builds [`LoadOptions`] from an optional TOML config file plus command-line locales.
///
/// ```toml
/// extra_locales = ["en-XA"]
/// plugins = ["json", "yaml"]
/// ```
pub fn load_options(
    config_path: Option<&Path>,
    extra_locales: Vec<String>,
) -> Result<LoadOptions, String> {
    let options = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            toml::from_str::<LoadOptions>(&content)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?
        }
        None => LoadOptions::new(),
    };
    Ok(options.with_extra_locales(extra_locales))
}
