use langtree::{LoadedNode, NameInfo};

/// Renders a folder walk as an indented tree.
///
/// ```text
/// greeting [en, fr]
///   en: greeting.en.json
///   fr: greeting.fr.json
/// app/
///   menu [de]
///     de: menu.de.yaml
/// ```
pub fn render_tree(nodes: &[LoadedNode]) -> String {
    let mut out = String::new();
    render_level(nodes, 0, &mut out);
    out
}

fn render_level(nodes: &[LoadedNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            LoadedNode::FileGroup(group) => {
                out.push_str(&format!(
                    "{}{} [{}]\n",
                    indent,
                    group.name,
                    group.languages().join(", ")
                ));
                for item in &group.items {
                    out.push_str(&format!(
                        "{}  {}: {}\n",
                        indent, item.descriptor.language, item.descriptor.file_name
                    ));
                }
            }
            LoadedNode::Folder(folder) => {
                out.push_str(&format!("{}{}/\n", indent, folder.name));
                render_level(&folder.items, depth + 1, out);
            }
        }
    }
}

/// One line per file name: `name -> prefix=..., language=...`.
pub fn render_detection(file_name: &str, info: &NameInfo) -> String {
    format!(
        "{} -> prefix={}, language={}",
        file_name, info.prefix, info.language
    )
}
