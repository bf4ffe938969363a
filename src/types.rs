//! Data model produced by a folder walk and consumed by a save.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

/// One discovered file, before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    /// Bare file name, extension included.
    pub file_name: String,
    pub file_path: PathBuf,
    /// Group key within one directory's grouping pass.
    pub prefix: String,
    pub language: String,
}

/// A descriptor whose content a format plugin parsed successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResource {
    #[serde(flatten)]
    pub descriptor: FileDescriptor,
    /// Extension without the dot (`json`), empty when the name has none.
    pub extension: String,
    pub data: Value,
}

/// Files sharing one prefix. `items` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceGroup {
    pub name: String,
    pub items: Vec<ParsedResource>,
}

/// A recursively walked plain subfolder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderNode {
    pub name: String,
    pub items: Vec<LoadedNode>,
}

/// An entry of a folder walk result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LoadedNode {
    FileGroup(ResourceGroup),
    Folder(FolderNode),
}

impl LoadedNode {
    pub fn name(&self) -> &str {
        match self {
            LoadedNode::FileGroup(group) => &group.name,
            LoadedNode::Folder(folder) => &folder.name,
        }
    }

    pub fn as_group(&self) -> Option<&ResourceGroup> {
        match self {
            LoadedNode::FileGroup(group) => Some(group),
            LoadedNode::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            LoadedNode::Folder(folder) => Some(folder),
            LoadedNode::FileGroup(_) => None,
        }
    }
}

impl ResourceGroup {
    /// Finds the member for `language`, if present.
    pub fn get_by_language(&self, language: &str) -> Option<&ParsedResource> {
        self.items
            .iter()
            .find(|item| item.descriptor.language == language)
    }

    pub fn languages(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.descriptor.language.as_str())
            .collect()
    }
}

/// A partial or full update destined for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub file_path: PathBuf,
    pub data: Value,
}

impl SaveRequest {
    pub fn new(file_path: impl Into<PathBuf>, data: Value) -> Self {
        Self {
            file_path: file_path.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group() -> ResourceGroup {
        let item = |language: &str| ParsedResource {
            descriptor: FileDescriptor {
                file_name: format!("greeting.{language}.json"),
                file_path: PathBuf::from(format!("greeting.{language}.json")),
                prefix: "greeting".to_string(),
                language: language.to_string(),
            },
            extension: "json".to_string(),
            data: json!({ "hello": language }),
        };
        ResourceGroup {
            name: "greeting".to_string(),
            items: vec![item("en"), item("fr")],
        }
    }

    #[test]
    fn test_group_lookup() {
        let group = group();
        assert_eq!(group.languages(), vec!["en", "fr"]);
        assert_eq!(group.get_by_language("fr").unwrap().data["hello"], "fr");
        assert!(group.get_by_language("de").is_none());
    }

    #[test]
    fn test_node_serialization_shape() {
        let node = LoadedNode::Folder(FolderNode {
            name: "app".to_string(),
            items: vec![LoadedNode::FileGroup(group())],
        });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "folder");
        assert_eq!(value["items"][0]["kind"], "file-group");
        assert_eq!(value["items"][0]["name"], "greeting");
        let member = &value["items"][0]["items"][0];
        assert_eq!(member["fileName"], "greeting.en.json");
        assert_eq!(member["language"], "en");
        assert_eq!(member["extension"], "json");
    }
}
