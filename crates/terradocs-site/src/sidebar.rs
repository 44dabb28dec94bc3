//! Sidebar resolution against the compiled document set.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use terradocs_config::{SidebarItem, SiteConfig};

use crate::builder::BuildError;
use crate::templates::NavItem;

/// Resolve a sidebar definition into a navigation tree.
///
/// Explicit doc identifiers must exist in `docs` (id to sidebar title);
/// auto-generated categories enumerate their folder in lexicographic
/// filename order, so navigation output is reproducible across builds.
pub fn resolve_sidebar(
    items: &[SidebarItem],
    docs: &BTreeMap<String, String>,
    docs_dir: &Path,
    config: &SiteConfig,
) -> Result<Vec<NavItem>, BuildError> {
    let mut nav = Vec::new();

    for item in items {
        match item {
            SidebarItem::Doc { doc } => {
                let title = docs
                    .get(doc)
                    .ok_or_else(|| BuildError::MissingSidebarDoc { id: doc.clone() })?;

                nav.push(NavItem {
                    title: title.clone(),
                    path: config.doc_route(doc),
                    children: vec![],
                });
            }

            SidebarItem::Category {
                category,
                items,
                autogenerate,
            } => {
                let children = match autogenerate {
                    Some(dir_name) => {
                        let dir = docs_dir.join(dir_name);
                        if !dir.is_dir() {
                            return Err(BuildError::MissingSidebarDir { path: dir });
                        }
                        autogen_children(&dir, dir_name, docs, config)?
                    }
                    None => resolve_sidebar(items, docs, docs_dir, config)?,
                };

                nav.push(NavItem {
                    title: category.clone(),
                    path: String::new(),
                    children,
                });
            }
        }
    }

    Ok(nav)
}

/// Enumerate a folder's documents and sub-folders, lexicographically.
fn autogen_children(
    dir: &Path,
    prefix: &str,
    docs: &BTreeMap<String, String>,
    config: &SiteConfig,
) -> Result<Vec<NavItem>, BuildError> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(|e| BuildError::Read(format!("{}: {}", dir.display(), e)))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    names.sort();

    let mut children = Vec::new();

    for name in names {
        let path = dir.join(&name);

        if path.is_dir() {
            let nested = autogen_children(&path, &format!("{}/{}", prefix, name), docs, config)?;
            if !nested.is_empty() {
                children.push(NavItem {
                    title: name,
                    path: String::new(),
                    children: nested,
                });
            }
            continue;
        }

        let Some(stem) = markdown_stem(&name) else {
            continue;
        };

        let id = format!("{}/{}", prefix, stem);
        let title = docs.get(&id).cloned().unwrap_or_else(|| stem.to_string());

        children.push(NavItem {
            title,
            path: config.doc_route(&id),
            children: vec![],
        });
    }

    Ok(children)
}

fn markdown_stem(name: &str) -> Option<&str> {
    name.strip_suffix(".md").or_else(|| name.strip_suffix(".mdx"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn doc_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(id, title)| (id.to_string(), title.to_string()))
            .collect()
    }

    #[test]
    fn resolves_explicit_docs() {
        let temp = tempdir().unwrap();
        let docs = doc_map(&[("intro", "Introduction"), ("attribution", "Attribution")]);

        let items = vec![
            SidebarItem::Doc {
                doc: "intro".to_string(),
            },
            SidebarItem::Doc {
                doc: "attribution".to_string(),
            },
        ];

        let nav = resolve_sidebar(&items, &docs, temp.path(), &SiteConfig::default()).unwrap();

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].title, "Introduction");
        assert_eq!(nav[0].path, "/docs/intro/");
    }

    #[test]
    fn missing_doc_error_names_the_identifier() {
        let temp = tempdir().unwrap();
        let docs = doc_map(&[]);

        let items = vec![SidebarItem::Doc {
            doc: "ghost".to_string(),
        }];

        let err = resolve_sidebar(&items, &docs, temp.path(), &SiteConfig::default()).unwrap_err();

        match err {
            BuildError::MissingSidebarDoc { id } => assert_eq!(id, "ghost"),
            other => panic!("expected MissingSidebarDoc, got {:?}", other),
        }
    }

    #[test]
    fn missing_autogen_dir_error_names_the_path() {
        let temp = tempdir().unwrap();
        let docs = doc_map(&[]);

        let items = vec![SidebarItem::Category {
            category: "Tutorials".to_string(),
            items: vec![],
            autogenerate: Some("Tutorials".to_string()),
        }];

        let err = resolve_sidebar(&items, &docs, temp.path(), &SiteConfig::default()).unwrap_err();

        match err {
            BuildError::MissingSidebarDir { path } => {
                assert_eq!(path, temp.path().join("Tutorials"))
            }
            other => panic!("expected MissingSidebarDir, got {:?}", other),
        }
    }

    #[test]
    fn autogen_lists_folder_in_lexicographic_order() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Tutorials");
        fs::create_dir_all(&dir).unwrap();

        // Created out of order on purpose
        fs::write(dir.join("03-classification.md"), "").unwrap();
        fs::write(dir.join("01-getting-started.md"), "").unwrap();
        fs::write(dir.join("02-spectral-indices.md"), "").unwrap();

        let docs = doc_map(&[
            ("Tutorials/01-getting-started", "Getting Started"),
            ("Tutorials/02-spectral-indices", "Spectral Indices"),
            ("Tutorials/03-classification", "Classification"),
        ]);

        let items = vec![SidebarItem::Category {
            category: "Tutorials".to_string(),
            items: vec![],
            autogenerate: Some("Tutorials".to_string()),
        }];

        let config = SiteConfig::default();

        let nav = resolve_sidebar(&items, &docs, temp.path(), &config).unwrap();
        let titles: Vec<&str> = nav[0].children.iter().map(|c| c.title.as_str()).collect();

        assert_eq!(
            titles,
            ["Getting Started", "Spectral Indices", "Classification"]
        );

        // Stable across repeated resolution
        let again = resolve_sidebar(&items, &docs, temp.path(), &config).unwrap();
        assert_eq!(nav, again);
    }

    #[test]
    fn autogen_nests_subfolders_as_categories() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Appendix");
        fs::create_dir_all(dir.join("Datasets")).unwrap();
        fs::write(dir.join("A01-glossary.md"), "").unwrap();
        fs::write(dir.join("Datasets/landsat.md"), "").unwrap();

        let docs = doc_map(&[
            ("Appendix/A01-glossary", "Glossary"),
            ("Appendix/Datasets/landsat", "Landsat"),
        ]);

        let items = vec![SidebarItem::Category {
            category: "Appendix".to_string(),
            items: vec![],
            autogenerate: Some("Appendix".to_string()),
        }];

        let nav = resolve_sidebar(&items, &docs, temp.path(), &SiteConfig::default()).unwrap();

        assert_eq!(nav[0].children.len(), 2);
        assert_eq!(nav[0].children[0].title, "Glossary");
        assert_eq!(nav[0].children[1].title, "Datasets");
        assert_eq!(nav[0].children[1].children[0].title, "Landsat");
    }

    #[test]
    fn autogen_skips_non_markdown_files() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Tutorials");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("01-intro.md"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let docs = doc_map(&[("Tutorials/01-intro", "Intro")]);

        let items = vec![SidebarItem::Category {
            category: "Tutorials".to_string(),
            items: vec![],
            autogenerate: Some("Tutorials".to_string()),
        }];

        let nav = resolve_sidebar(&items, &docs, temp.path(), &SiteConfig::default()).unwrap();

        assert_eq!(nav[0].children.len(), 1);
    }
}
