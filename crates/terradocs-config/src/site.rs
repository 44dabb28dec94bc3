//! Root site configuration (`site.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::footer::FooterConfig;
use crate::home::HomeConfig;
use crate::navbar::{NavTarget, NavbarConfig};
use crate::policy::LinkRules;

/// Root configuration structure representing `site.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site metadata
    #[serde(default)]
    pub site: SiteMeta,

    /// Navbar entries
    #[serde(default)]
    pub navbar: NavbarConfig,

    /// Footer link groups
    #[serde(default)]
    pub footer: FooterConfig,

    /// Broken-link policy
    #[serde(default)]
    pub links: LinkRules,

    /// Markdown pipeline toggles
    #[serde(default)]
    pub markdown: MarkdownSettings,

    /// Docs source and output locations
    #[serde(default)]
    pub docs: DocsConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildSettings,

    /// Dev server settings
    #[serde(default)]
    pub serve: ServeSettings,

    /// Landing page content
    #[serde(default)]
    pub home: HomeConfig,
}

/// The `[site]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteMeta {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub tagline: Option<String>,

    /// Deployment URL, used for sitemap entries
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub organization: Option<String>,

    #[serde(default)]
    pub project: Option<String>,

    /// Favicon path relative to the static dir
    #[serde(default)]
    pub favicon: Option<String>,

    /// Base URL for "edit this page" links
    #[serde(default)]
    pub edit_url: Option<String>,

    /// Extra stylesheets linked on every page (KaTeX lives here)
    #[serde(default)]
    pub stylesheets: Vec<Stylesheet>,
}

/// An external stylesheet reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stylesheet {
    pub href: String,

    #[serde(default)]
    pub integrity: Option<String>,

    #[serde(default)]
    pub crossorigin: Option<String>,
}

/// The `[markdown]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct MarkdownSettings {
    /// Emit KaTeX-compatible markup for `$...$` / `$$...$$` segments
    #[serde(default)]
    pub math: bool,
}

/// The `[docs]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsConfig {
    /// Source directory for markdown documents
    #[serde(default = "default_docs_dir")]
    pub dir: String,

    /// Output directory for the built site
    #[serde(default = "default_output")]
    pub output: String,

    /// Path to the sidebar definition file
    #[serde(default = "default_sidebar")]
    pub sidebar: String,

    /// URL prefix for doc pages
    #[serde(default = "default_route_base")]
    pub route_base: String,
}

/// The `[build]` section.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

/// The `[serve]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServeSettings {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_sidebar() -> String {
    "sidebar.toml".to_string()
}
fn default_route_base() -> String {
    "docs".to_string()
}
fn default_minify() -> bool {
    true
}
fn default_port() -> u16 {
    7777
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: None,
            url: None,
            base_url: default_base_url(),
            organization: None,
            project: None,
            favicon: None,
            edit_url: None,
            stylesheets: vec![],
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            sidebar: default_sidebar(),
            route_base: default_route_base(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// An internal doc reference declared in configuration, kept with the place
/// it was declared so link errors can name their source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    /// Referenced document identifier
    pub id: String,
    /// Human-readable source, e.g. `navbar item 'Tutorial'`
    pub referrer: String,
}

impl SiteConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SiteConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.navbar.validate()?;
        self.footer.validate()?;
        Ok(())
    }

    /// Every internal doc reference declared in the navbar and footer.
    pub fn doc_refs(&self) -> Vec<DocRef> {
        let mut refs = Vec::new();

        for item in &self.navbar.items {
            if let Ok(NavTarget::Doc(id)) = item.target() {
                refs.push(DocRef {
                    id: id.to_string(),
                    referrer: format!("navbar item '{}'", item.label),
                });
            }
        }

        for column in &self.footer.links {
            for item in &column.items {
                if let Some(id) = &item.to {
                    refs.push(DocRef {
                        id: id.clone(),
                        referrer: format!("footer item '{}'", item.label),
                    });
                }
            }
        }

        refs
    }

    /// URL of a doc page, e.g. `/docs/Tutorials/01-intro/`.
    pub fn doc_route(&self, id: &str) -> String {
        format!(
            "{}{}/{}/",
            self.site.base_url,
            self.docs.route_base.trim_matches('/'),
            id.trim_matches('/')
        )
    }

    /// Absolute path of the sidebar file, resolved next to the config file.
    pub fn sidebar_path(&self, config_path: &Path) -> PathBuf {
        let sidebar = Path::new(&self.docs.sidebar);
        if sidebar.is_absolute() {
            sidebar.to_path_buf()
        } else {
            config_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(sidebar)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navbar::NavPosition;
    use pretty_assertions::assert_eq;

    const SITE_TOML: &str = r#"
[site]
title = "Remote Sensing Documentation"
tagline = "Remote sensing and mapping with the Google Earth Engine"
url = "https://LozAnalytics.github.io"
base_url = "/"
organization = "LozAnalytics"
project = "remote-sensing"

[[site.stylesheets]]
href = "https://cdn.jsdelivr.net/npm/katex@0.13.24/dist/katex.min.css"
integrity = "sha384-odtC+0UGzzFL/6PNoE8rX/SPcQDXBJ+uRepguP4QkPCm2LBxH3FA3y+fKSiJ+AmM"
crossorigin = "anonymous"

[markdown]
math = true

[[navbar.items]]
label = "Tutorial"
doc = "intro"

[[navbar.items]]
label = "GitHub"
href = "https://github.com/LozAnalytics/remote-sensing"
position = "right"

[footer]
style = "dark"
copyright = "Copyright © Loz Analytics, LLC."

[[footer.links]]
title = "Docs"
items = [{ label = "Tutorial", to = "intro" }]

[links]
on_broken_links = "throw"
on_broken_markdown_links = "warn"
"#;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn loads_full_config() {
        let (_temp, path) = write_config(SITE_TOML);

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(config.site.title, "Remote Sensing Documentation");
        assert_eq!(config.site.organization.as_deref(), Some("LozAnalytics"));
        assert!(config.markdown.math);
        assert_eq!(config.navbar.items.len(), 2);
        assert_eq!(config.navbar.items[1].position, NavPosition::Right);
        assert_eq!(config.site.stylesheets.len(), 1);
        assert!(config.site.stylesheets[0].integrity.is_some());
    }

    #[test]
    fn collects_doc_refs_from_navbar_and_footer() {
        let (_temp, path) = write_config(SITE_TOML);
        let config = SiteConfig::load(&path).unwrap();

        let refs = config.doc_refs();

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].id, "intro");
        assert_eq!(refs[0].referrer, "navbar item 'Tutorial'");
        assert_eq!(refs[1].referrer, "footer item 'Tutorial'");
    }

    #[test]
    fn doc_route_joins_base_and_prefix() {
        let config = SiteConfig::default();

        assert_eq!(config.doc_route("intro"), "/docs/intro/");
        assert_eq!(
            config.doc_route("Tutorials/01-intro"),
            "/docs/Tutorials/01-intro/"
        );
    }

    #[test]
    fn rejects_unknown_top_level_keys() {
        let (_temp, path) = write_config("[unknown]\nkey = 1\n");

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_navbar_item_with_both_targets() {
        let (_temp, path) = write_config(
            r#"
[[navbar.items]]
label = "Bad"
doc = "intro"
href = "https://example.com"
"#,
        );

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NavbarTarget { .. }));
    }

    #[test]
    fn defaults_cover_missing_sections() {
        let (_temp, path) = write_config("");

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.docs.dir, "docs");
        assert_eq!(config.docs.output, "dist");
        assert!(config.build.minify);
        assert!(config.home.features.is_empty());
    }

    #[test]
    fn sidebar_path_resolves_relative_to_config() {
        let (_temp, path) = write_config("");
        let config = SiteConfig::load(&path).unwrap();

        let sidebar = config.sidebar_path(&path);
        assert_eq!(sidebar, path.parent().unwrap().join("sidebar.toml"));
    }
}
