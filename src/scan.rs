//! Directory classification.
//!
//! Splits one directory's entries into plain files, language folders (directories
//! whose own name is a locale) and plain subfolders. Any entry that cannot be
//! stat'ed fails the whole listing.

use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use tokio::fs;
use tracing::debug;

use crate::{
    error::Error,
    heuristic::{infer_name_info, strip_extension},
    traits::LocaleOracle,
    types::FileDescriptor,
};

/// An entry name with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

/// A directory named after a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFolder {
    pub name: String,
    pub locale: String,
}

/// The classified content of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub files: Vec<String>,
    pub language_folders: Vec<LanguageFolder>,
    pub subfolders: Vec<String>,
}

/// Lists `path` and determines each entry's kind, sorted by name.
///
/// Kinds follow symlinks, so a dangling link fails the listing.
pub async fn list_entries(path: &Path) -> Result<Vec<DirectoryEntry>, Error> {
    let mut reader = fs::read_dir(path).await?;
    let mut names = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| Error::InvalidPath(entry.path()))?;
        names.push(name);
    }
    names.sort();

    let kinds = try_join_all(names.iter().map(|name| {
        let entry_path = path.join(name);
        async move { fs::metadata(&entry_path).await.map(|meta| meta.is_dir()) }
    }))
    .await?;

    Ok(names
        .into_iter()
        .zip(kinds)
        .map(|(name, is_dir)| DirectoryEntry { name, is_dir })
        .collect())
}

/// Partitions a listing of one directory.
pub fn classify(entries: Vec<DirectoryEntry>, oracle: &dyn LocaleOracle) -> Classification {
    let mut classification = Classification::default();
    for entry in entries {
        if !entry.is_dir {
            classification.files.push(entry.name);
        } else if let Some(locale) = oracle.locale(&entry.name) {
            debug!(folder = %entry.name, %locale, "language folder");
            classification
                .language_folders
                .push(LanguageFolder {
                    name: entry.name,
                    locale,
                });
        } else {
            classification.subfolders.push(entry.name);
        }
    }
    classification
}

/// Lists and classifies `path`.
pub async fn classify_dir(path: &Path, oracle: &dyn LocaleOracle) -> Result<Classification, Error> {
    Ok(classify(list_entries(path).await?, oracle))
}

/// Descriptors for the plain files of a directory, via the filename heuristic.
pub fn plain_file_descriptors(
    dir: &Path,
    files: &[String],
    oracle: &dyn LocaleOracle,
) -> Vec<FileDescriptor> {
    files
        .iter()
        .map(|file_name| {
            let info = infer_name_info(file_name, oracle);
            FileDescriptor {
                file_name: file_name.clone(),
                file_path: dir.join(file_name),
                prefix: info.prefix,
                language: info.language,
            }
        })
        .collect()
}

/// Descriptors for every file directly inside the given language folders.
///
/// Folders are listed concurrently; the result follows folder order, then file order.
/// Nested directories inside a language folder are ignored. Each file's language is
/// the folder's normalized locale, so `pt_BR/` yields `pt-BR`.
pub async fn language_folder_descriptors(
    dir: &Path,
    folders: &[LanguageFolder],
) -> Result<Vec<FileDescriptor>, Error> {
    let listings = try_join_all(folders.iter().map(|folder| {
        let folder_path: PathBuf = dir.join(&folder.name);
        async move {
            let entries = list_entries(&folder_path).await?;
            Ok::<_, Error>((folder, folder_path, entries))
        }
    }))
    .await?;

    Ok(listings
        .into_iter()
        .flat_map(|(folder, folder_path, entries)| {
            entries
                .into_iter()
                .filter(|entry| !entry.is_dir)
                .map(move |entry| FileDescriptor {
                    prefix: strip_extension(&entry.name).to_string(),
                    file_path: folder_path.join(&entry.name),
                    language: folder.locale.clone(),
                    file_name: entry.name,
                })
        })
        .collect())
}
