//! Groups file descriptors by prefix and parses each member.
//!
//! Members whose file has no plugin or fails to parse are dropped, and a group left
//! with no members is dropped too. Groups keep the first-appearance order of their
//! prefix; members keep descriptor order.

use std::path::Path;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::{
    error::Error,
    plugins::PluginRegistry,
    types::{FileDescriptor, ParsedResource, ResourceGroup},
};

/// Groups descriptors by prefix in first-appearance order.
pub fn group_by_prefix(descriptors: Vec<FileDescriptor>) -> Vec<(String, Vec<FileDescriptor>)> {
    let mut groups: Vec<(String, Vec<FileDescriptor>)> = Vec::new();
    for descriptor in descriptors {
        match groups.iter_mut().find(|(prefix, _)| *prefix == descriptor.prefix) {
            Some((_, members)) => members.push(descriptor),
            None => groups.push((descriptor.prefix.clone(), vec![descriptor])),
        }
    }
    groups
}

/// Reads and parses one file with the plugin resolved from its name.
pub async fn read_and_parse(
    registry: &PluginRegistry,
    path: &Path,
) -> Result<serde_json::Value, Error> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;
    let plugin = registry
        .resolve(file_name)
        .ok_or_else(|| Error::NoPlugin(file_name.to_string()))?;
    let raw = tokio::fs::read_to_string(path).await?;
    plugin.parse(&raw)
}

async fn parse_descriptor(
    registry: &PluginRegistry,
    descriptor: FileDescriptor,
) -> Option<ParsedResource> {
    if registry.resolve(&descriptor.file_name).is_none() {
        debug!(file = %descriptor.file_path.display(), "no plugin, skipping");
        return None;
    }

    match read_and_parse(registry, &descriptor.file_path).await {
        Ok(data) => {
            let extension = descriptor
                .file_name
                .rsplit_once('.')
                .map(|(_, extension)| extension.to_string())
                .unwrap_or_default();
            Some(ParsedResource {
                descriptor,
                extension,
                data,
            })
        }
        Err(e) => {
            warn!(file = %descriptor.file_path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Groups `descriptors` by prefix and parses every member concurrently.
pub async fn aggregate(
    registry: &PluginRegistry,
    descriptors: Vec<FileDescriptor>,
) -> Vec<ResourceGroup> {
    let groups = join_all(group_by_prefix(descriptors).into_iter().map(
        |(name, members)| async move {
            let items = join_all(
                members
                    .into_iter()
                    .map(|descriptor| parse_descriptor(registry, descriptor)),
            )
            .await
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
            ResourceGroup { name, items }
        },
    ))
    .await;

    groups
        .into_iter()
        .filter(|group| {
            if group.items.is_empty() {
                debug!(group = %group.name, "dropping empty group");
            }
            !group.items.is_empty()
        })
        .collect()
}
