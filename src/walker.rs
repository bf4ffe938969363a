//! Recursive folder walk.
//!
//! A folder's items are its file groups, then its language-folder groups, then one
//! [`FolderNode`] per plain subfolder. Sibling subfolders are walked concurrently;
//! one failing subfolder fails the whole walk. A subfolder that resolves to one of
//! the folders currently being walked (a symlink back up the tree) is skipped.

use std::path::{Path, PathBuf};

use futures_util::{
    FutureExt,
    future::{BoxFuture, try_join_all},
};
use tracing::debug;

use crate::{
    aggregate::aggregate,
    error::Error,
    plugins::PluginRegistry,
    scan::{classify_dir, language_folder_descriptors, plain_file_descriptors},
    traits::LocaleOracle,
    types::{FolderNode, LoadedNode},
};

/// Walks `path` and returns its items.
pub fn walk<'a>(
    path: &'a Path,
    registry: &'a PluginRegistry,
    oracle: &'a dyn LocaleOracle,
) -> BoxFuture<'a, Result<Vec<LoadedNode>, Error>> {
    walk_within(path, Vec::new(), registry, oracle)
}

/// `ancestors` holds the canonical paths of the folders above `path`.
fn walk_within<'a>(
    path: &'a Path,
    mut ancestors: Vec<PathBuf>,
    registry: &'a PluginRegistry,
    oracle: &'a dyn LocaleOracle,
) -> BoxFuture<'a, Result<Vec<LoadedNode>, Error>> {
    async move {
        debug!(folder = %path.display(), "walking");
        let classification = classify_dir(path, oracle).await?;
        ancestors.push(tokio::fs::canonicalize(path).await?);

        let file_descriptors = plain_file_descriptors(path, &classification.files, oracle);
        let file_groups = aggregate(registry, file_descriptors).await;

        let language_descriptors =
            language_folder_descriptors(path, &classification.language_folders).await?;
        let language_groups = aggregate(registry, language_descriptors).await;

        let ancestors = &ancestors;
        let subfolders = try_join_all(classification.subfolders.iter().map(|name| async move {
            let sub_path = path.join(name);
            let canonical = tokio::fs::canonicalize(&sub_path).await?;
            if ancestors.contains(&canonical) {
                debug!(folder = %sub_path.display(), "skipping folder that loops back");
                return Ok::<_, Error>(None);
            }
            let items = walk_within(&sub_path, ancestors.clone(), registry, oracle).await?;
            Ok(Some(FolderNode {
                name: name.clone(),
                items,
            }))
        }))
        .await?;

        Ok(file_groups
            .into_iter()
            .map(LoadedNode::FileGroup)
            .chain(language_groups.into_iter().map(LoadedNode::FileGroup))
            .chain(subfolders.into_iter().flatten().map(LoadedNode::Folder))
            .collect())
    }
    .boxed()
}
