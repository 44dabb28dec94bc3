//! Static site builder.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use terradocs_config::{load_sidebar, ConfigError, LinkPolicy, SidebarItem, SiteConfig};
use terradocs_markdown::{parse_doc, render_html, ParsedDoc};

use crate::assets::AssetPipeline;
use crate::features::render_features;
use crate::links::resolve_internal;
use crate::sidebar::resolve_sidebar;
use crate::templates::{render_sidebar, Chrome, DocPage, TemplateEngine, TocItem};

/// Where to find the project and what to override from the CLI.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root (where `site.toml` lives)
    pub root: PathBuf,

    /// Path to the config file
    pub config_path: PathBuf,

    /// Output directory override
    pub output: Option<PathBuf>,

    /// Minification override
    pub minify: Option<bool>,
}

impl BuildOptions {
    /// Options for a project rooted at `root`, config at `root/site.toml`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_path: root.join("site.toml"),
            root,
            output: None,
            minify: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated, homepage included
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,

    /// Non-fatal link warnings surfaced during the build
    pub warnings: Vec<String>,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read docs: {0}")]
    ReadError(String),

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Broken link in {referrer}: document '{id}' does not exist")]
    BrokenDocLink { id: String, referrer: String },

    #[error("Sidebar references missing document '{id}'")]
    MissingSidebarDoc { id: String },

    #[error("Sidebar autogenerate folder does not exist: {path}")]
    MissingSidebarDir { path: PathBuf },

    #[error("Broken markdown link in '{page}': {href}")]
    BrokenMarkdownLink { page: String, href: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Document identifier (relative path without extension)
    id: String,

    /// Path relative to the docs dir, extension kept
    relative_path: PathBuf,

    /// Output path
    output_path: PathBuf,

    /// Parsed document
    doc: ParsedDoc,
}

/// Static site builder.
pub struct SiteBuilder {
    config: SiteConfig,
    sidebar: Vec<SidebarItem>,
    root: PathBuf,
    docs_dir: PathBuf,
    static_dir: PathBuf,
    output_dir: PathBuf,
    minify: bool,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Load configuration and sidebar from disk and construct a builder.
    pub fn from_options(options: &BuildOptions) -> Result<Self, BuildError> {
        let config = SiteConfig::load(&options.config_path)?;
        let sidebar = load_sidebar(&config.sidebar_path(&options.config_path))?;
        Ok(Self::new(config, sidebar, options))
    }

    /// Construct a builder from already-loaded configuration.
    pub fn new(config: SiteConfig, sidebar: Vec<SidebarItem>, options: &BuildOptions) -> Self {
        let docs_dir = options.root.join(&config.docs.dir);
        let static_dir = options.root.join("static");
        let output_dir = options
            .output
            .clone()
            .unwrap_or_else(|| options.root.join(&config.docs.output));
        let minify = options.minify.unwrap_or(config.build.minify);

        Self {
            config,
            sidebar,
            root: options.root.clone(),
            docs_dir,
            static_dir,
            output_dir,
            minify,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // Discover and parse all documents
        let pages = self.discover_pages()?;

        // Sidebar titles by doc id, in deterministic order
        let titles: BTreeMap<String, String> = pages
            .iter()
            .map(|p| (p.id.clone(), p.sidebar_title()))
            .collect();

        // Resolve navigation; missing docs and folders abort here
        let nav = resolve_sidebar(&self.sidebar, &titles, &self.docs_dir, &self.config)?;
        let sidebar_html = render_sidebar(&nav);

        let mut warnings = Vec::new();

        // Configuration references (navbar, footer) under on_broken_links
        self.check_config_refs(&titles, &mut warnings)?;

        // Markdown prose links under on_broken_markdown_links
        let routes = self.known_routes(&pages);
        self.check_markdown_links(&pages, &routes, &mut warnings)?;

        let chrome = Chrome::from_config(&self.config);

        // Render pages in parallel
        let results: Vec<Result<(), BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &chrome, &sidebar_html))
            .collect();

        for result in results {
            result?;
        }

        self.build_homepage(&chrome)?;
        self.generate_assets()?;
        self.generate_search_index(&pages)?;
        self.generate_sitemap(&pages)?;

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len() + 1,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.output_dir.clone(),
            warnings,
        })
    }

    /// Discover all markdown pages in the docs directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        if !self.docs_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                self.docs_dir.display()
            )));
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(&self.docs_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "md" && ext != "mdx" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let doc = parse_doc(&content).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path
                .strip_prefix(&self.docs_dir)
                .unwrap_or(path)
                .to_path_buf();

            let id = doc_id(&relative_path);

            let output_path = self
                .output_dir
                .join(self.config.docs.route_base.trim_matches('/'))
                .join(&id)
                .join("index.html");

            pages.push(PageInfo {
                id,
                relative_path,
                output_path,
                doc,
            });
        }

        // Deterministic processing order
        pages.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(pages)
    }

    /// Every route a markdown link may legitimately target.
    fn known_routes(&self, pages: &[PageInfo]) -> HashSet<String> {
        let mut routes: HashSet<String> = pages
            .iter()
            .map(|p| self.config.doc_route(&p.id))
            .collect();
        routes.insert(self.config.site.base_url.clone());
        routes.insert("/".to_string());
        routes
    }

    /// Enforce `on_broken_links` over navbar and footer doc references.
    fn check_config_refs(
        &self,
        docs: &BTreeMap<String, String>,
        warnings: &mut Vec<String>,
    ) -> Result<(), BuildError> {
        for doc_ref in self.config.doc_refs() {
            if docs.contains_key(&doc_ref.id) {
                continue;
            }

            match self.config.links.on_broken_links {
                LinkPolicy::Throw => {
                    return Err(BuildError::BrokenDocLink {
                        id: doc_ref.id,
                        referrer: doc_ref.referrer,
                    })
                }
                LinkPolicy::Warn => warnings.push(format!(
                    "Broken link in {}: document '{}' does not exist",
                    doc_ref.referrer, doc_ref.id
                )),
                LinkPolicy::Ignore => {}
            }
        }

        Ok(())
    }

    /// Enforce `on_broken_markdown_links` over links in document content.
    fn check_markdown_links(
        &self,
        pages: &[PageInfo],
        routes: &HashSet<String>,
        warnings: &mut Vec<String>,
    ) -> Result<(), BuildError> {
        for page in pages {
            for link in page.doc.links.iter().filter(|l| l.is_internal()) {
                let Some(target) = resolve_internal(&page.id, &link.href, &self.config) else {
                    continue;
                };

                if routes.contains(&target) {
                    continue;
                }

                match self.config.links.on_broken_markdown_links {
                    LinkPolicy::Throw => {
                        return Err(BuildError::BrokenMarkdownLink {
                            page: page.id.clone(),
                            href: link.href.clone(),
                        })
                    }
                    LinkPolicy::Warn => warnings.push(format!(
                        "Broken markdown link in '{}': {} (resolved to {})",
                        page.id, link.href, target
                    )),
                    LinkPolicy::Ignore => {}
                }
            }
        }

        Ok(())
    }

    /// Build a single doc page.
    fn build_page(
        &self,
        page: &PageInfo,
        chrome: &Chrome,
        sidebar_html: &str,
    ) -> Result<(), BuildError> {
        let content = render_html(&page.doc.content, self.config.markdown.math);

        let fm = page.doc.frontmatter.as_ref();
        let title = fm
            .map(|f| f.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| page.stem().to_string());

        let toc: Vec<TocItem> = page
            .doc
            .toc
            .iter()
            .map(|e| TocItem {
                title: e.title.clone(),
                id: e.id.clone(),
                level: e.level,
            })
            .collect();

        let edit_url = self.config.site.edit_url.as_ref().map(|base| {
            format!(
                "{}/{}/{}",
                base.trim_end_matches('/'),
                self.config.docs.dir,
                page.relative_path.display()
            )
        });

        let doc_page = DocPage {
            title,
            description: fm.and_then(|f| f.description.clone()),
            content,
            sidebar_html: sidebar_html.to_string(),
            toc,
            edit_url,
        };

        let html = self
            .templates
            .render_doc(chrome, &doc_page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&page.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Build the landing page: hero plus the feature row.
    fn build_homepage(&self, chrome: &Chrome) -> Result<(), BuildError> {
        let features_html =
            render_features(&self.config.home.features, &self.config.site.base_url);

        let html = self
            .templates
            .render_home(chrome, &features_html)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        fs::write(self.output_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // Images, favicon, icons
        let copied = AssetPipeline::copy_static(&self.static_dir, &self.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        if copied > 0 {
            tracing::debug!("Copied {} static files", copied);
        }

        // Locally-hosted stylesheets from the config
        for stylesheet in &self.config.site.stylesheets {
            if is_remote(&stylesheet.href) {
                continue;
            }

            let source = self.root.join(&stylesheet.href);
            if source.exists() {
                let target = self.output_dir.join(&stylesheet.href);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| BuildError::WriteError(e.to_string()))?;
                }
                fs::copy(&source, &target).map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::info!("Copied stylesheet from {}", stylesheet.href);
            } else {
                tracing::warn!("Stylesheet not found: {}", stylesheet.href);
            }
        }

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, pages: &[PageInfo]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                let fm = page.doc.frontmatter.as_ref();

                let content = page
                    .doc
                    .content
                    .lines()
                    .filter(|l| !l.starts_with('#') && !l.starts_with("```"))
                    .take(10)
                    .collect::<Vec<_>>()
                    .join(" ");

                serde_json::json!({
                    "id": page.id,
                    "title": fm.map(|f| f.title.clone()).unwrap_or_default(),
                    "description": fm.and_then(|f| f.description.clone()).unwrap_or_default(),
                    "url": self.config.doc_route(&page.id),
                    "content": content,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, pages: &[PageInfo]) -> Result<(), BuildError> {
        let site_url = self
            .config
            .site
            .url
            .as_deref()
            .unwrap_or("")
            .trim_end_matches('/')
            .to_string();

        let mut urls: Vec<String> = vec![format!(
            "  <url>\n    <loc>{}{}</loc>\n  </url>",
            site_url, self.config.site.base_url
        )];
        urls.extend(pages.iter().map(|page| {
            format!(
                "  <url>\n    <loc>{}{}</loc>\n  </url>",
                site_url,
                self.config.doc_route(&page.id)
            )
        }));

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}{}sitemap.xml",
            site_url, self.config.site.base_url
        );
        fs::write(self.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

impl PageInfo {
    /// File stem of the source document.
    fn stem(&self) -> &str {
        self.relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
    }

    /// Title shown in the sidebar for this page.
    fn sidebar_title(&self) -> String {
        let fm = self.doc.frontmatter.as_ref();
        fm.and_then(|f| f.sidebar_label.clone())
            .or_else(|| fm.map(|f| f.title.clone()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| self.stem().to_string())
    }
}

/// Doc identifier: relative path without extension, `/`-separated.
fn doc_id(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_remote(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}
