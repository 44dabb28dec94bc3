//! Sidebar definition.
//!
//! The sidebar file holds an ordered list of items. Each item is either a
//! leaf referencing one document by identifier, a category with an explicit
//! child list, or a category whose children are auto-generated from a folder
//! under the docs directory:
//!
//! ```toml
//! [[sidebar]]
//! doc = "intro"
//!
//! [[sidebar]]
//! category = "Tutorials"
//! autogenerate = "Tutorials"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A node in the sidebar tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Leaf referencing one document by identifier.
    Doc { doc: String },

    /// Category with a label and either explicit children or an
    /// auto-generate folder (exactly one of the two).
    Category {
        category: String,

        #[serde(default)]
        items: Vec<SidebarItem>,

        #[serde(default)]
        autogenerate: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct SidebarFile {
    #[serde(default)]
    sidebar: Vec<SidebarItem>,
}

/// Load and validate a sidebar definition file.
pub fn load_sidebar(path: &Path) -> Result<Vec<SidebarItem>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: SidebarFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    validate_items(&file.sidebar)?;

    Ok(file.sidebar)
}

fn validate_items(items: &[SidebarItem]) -> Result<(), ConfigError> {
    for item in items {
        if let SidebarItem::Category {
            category,
            items,
            autogenerate,
        } = item
        {
            match (items.is_empty(), autogenerate) {
                (false, None) => validate_items(items)?,
                (true, Some(_)) => {}
                _ => {
                    return Err(ConfigError::CategoryChildren {
                        label: category.clone(),
                    })
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_sidebar(content: &str) -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("sidebar.toml"), content).unwrap();
        temp
    }

    #[test]
    fn loads_docs_and_categories() {
        let temp = write_sidebar(
            r#"
[[sidebar]]
doc = "intro"

[[sidebar]]
doc = "attribution"

[[sidebar]]
category = "Appendix"
autogenerate = "Appendix"

[[sidebar]]
category = "Tutorials"
autogenerate = "Tutorials"
"#,
        );

        let items = load_sidebar(&temp.path().join("sidebar.toml")).unwrap();

        assert_eq!(
            items,
            vec![
                SidebarItem::Doc {
                    doc: "intro".to_string()
                },
                SidebarItem::Doc {
                    doc: "attribution".to_string()
                },
                SidebarItem::Category {
                    category: "Appendix".to_string(),
                    items: vec![],
                    autogenerate: Some("Appendix".to_string()),
                },
                SidebarItem::Category {
                    category: "Tutorials".to_string(),
                    items: vec![],
                    autogenerate: Some("Tutorials".to_string()),
                },
            ]
        );
    }

    #[test]
    fn loads_nested_explicit_categories() {
        let temp = write_sidebar(
            r#"
[[sidebar]]
category = "Guides"
items = [
    { doc = "guides/first" },
    { category = "Advanced", items = [{ doc = "guides/advanced/tuning" }] },
]
"#,
        );

        let items = load_sidebar(&temp.path().join("sidebar.toml")).unwrap();

        match &items[0] {
            SidebarItem::Category { items, .. } => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[1], SidebarItem::Category { .. }));
            }
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn rejects_category_with_items_and_autogenerate() {
        let temp = write_sidebar(
            r#"
[[sidebar]]
category = "Broken"
items = [{ doc = "intro" }]
autogenerate = "Broken"
"#,
        );

        let err = load_sidebar(&temp.path().join("sidebar.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::CategoryChildren { .. }));
    }

    #[test]
    fn rejects_empty_category() {
        let temp = write_sidebar(
            r#"
[[sidebar]]
category = "Empty"
"#,
        );

        assert!(load_sidebar(&temp.path().join("sidebar.toml")).is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = tempfile::tempdir().unwrap();

        let err = load_sidebar(&temp.path().join("sidebar.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
