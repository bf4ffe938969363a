//! Infers a `(prefix, language)` pair from a bare filename.
//!
//! `greeting.en.json` belongs to group `greeting` in language `en`;
//! `messages_pt_BR.yaml` to group `messages` in `pt-BR`; `fr.json` is a whole-file
//! translation filed under [`DEFAULT_GROUP_NAME`]; `about.json` carries no language and
//! forms its own group.

use crate::traits::LocaleOracle;

/// Group name for files whose whole base name is a locale.
pub const DEFAULT_GROUP_NAME: &str = "Unknown Prefix";

const SEPARATORS: [char; 2] = ['.', '_'];

/// Result of running the filename heuristic on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameInfo {
    pub prefix: String,
    pub language: String,
}

/// Returns `file_name` without its last extension.
///
/// Names without an extension, and dotfiles such as `.env`, are returned unchanged.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Derives the group prefix and language for a plain file.
pub fn infer_name_info(file_name: &str, oracle: &dyn LocaleOracle) -> NameInfo {
    let base = strip_extension(file_name);

    if let Some(language) = oracle.locale(base) {
        return NameInfo {
            prefix: DEFAULT_GROUP_NAME.to_string(),
            language,
        };
    }

    // (byte offset, text) for every segment between separators
    let mut segments: Vec<(usize, &str)> = Vec::new();
    let mut start = 0;
    for (index, c) in base.char_indices() {
        if SEPARATORS.contains(&c) {
            segments.push((start, &base[start..index]));
            start = index + c.len_utf8();
        }
    }
    segments.push((start, &base[start..]));

    for i in 1..segments.len() {
        let candidate = segments[i..]
            .iter()
            .map(|(_, text)| *text)
            .collect::<Vec<_>>()
            .join("-");

        if let Some(language) = oracle.locale(&candidate) {
            // segment offsets always follow a one-byte separator
            let cut = segments[i].0 - 1;
            let prefix = if cut == 0 {
                DEFAULT_GROUP_NAME.to_string()
            } else {
                base[..cut].to_string()
            };
            return NameInfo { prefix, language };
        }
    }

    NameInfo {
        prefix: base.to_string(),
        language: base.to_string(),
    }
}
