//! Template engine for rendering documentation pages.

use minijinja::{context, Environment};
use serde::Serialize;

use terradocs_config::{NavPosition, NavTarget, SiteConfig};

/// A resolved sidebar node: either a doc link (no children) or a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path; empty for categories
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
}

/// A table of contents entry.
#[derive(Debug, Clone, Serialize)]
pub struct TocItem {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// A resolved navbar or footer link (doc targets already turned into routes).
#[derive(Debug, Clone, Serialize)]
pub struct SiteLink {
    pub label: String,
    pub href: String,
}

/// A footer column with resolved links.
#[derive(Debug, Clone, Serialize)]
pub struct FooterColumnLinks {
    pub title: String,
    pub items: Vec<SiteLink>,
}

/// An external stylesheet link.
#[derive(Debug, Clone, Serialize)]
pub struct StylesheetLink {
    pub href: String,
    pub integrity: Option<String>,
    pub crossorigin: Option<String>,
}

/// Site-wide chrome shared by every page: navbar, footer, stylesheets.
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub title: String,
    pub tagline: Option<String>,
    pub base_url: String,
    pub favicon: Option<String>,
    pub logo_src: Option<String>,
    pub logo_alt: Option<String>,
    pub stylesheets: Vec<StylesheetLink>,
    pub navbar_left: Vec<SiteLink>,
    pub navbar_right: Vec<SiteLink>,
    pub footer_style: Option<String>,
    pub footer_copyright: Option<String>,
    pub footer_columns: Vec<FooterColumnLinks>,
}

impl Chrome {
    /// Resolve configuration into renderable chrome. Doc references become
    /// routes; callers must have link-checked them already.
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut navbar_left = Vec::new();
        let mut navbar_right = Vec::new();

        for item in &config.navbar.items {
            let href = match item.target() {
                Ok(NavTarget::Doc(id)) => config.doc_route(id),
                Ok(NavTarget::Href(href)) => href.to_string(),
                Err(_) => continue,
            };
            let link = SiteLink {
                label: item.label.clone(),
                href,
            };
            match item.position {
                NavPosition::Left => navbar_left.push(link),
                NavPosition::Right => navbar_right.push(link),
            }
        }

        let footer_columns = config
            .footer
            .links
            .iter()
            .map(|column| FooterColumnLinks {
                title: column.title.clone(),
                items: column
                    .items
                    .iter()
                    .map(|item| SiteLink {
                        label: item.label.clone(),
                        href: match (&item.to, &item.href) {
                            (Some(id), _) => config.doc_route(id),
                            (None, Some(href)) => href.clone(),
                            (None, None) => String::new(),
                        },
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: config.site.title.clone(),
            tagline: config.site.tagline.clone(),
            base_url: config.site.base_url.clone(),
            favicon: config
                .site
                .favicon
                .as_ref()
                .map(|f| format!("{}{}", config.site.base_url, f)),
            logo_src: config
                .navbar
                .logo
                .as_ref()
                .map(|l| format!("{}{}", config.site.base_url, l.src)),
            logo_alt: config.navbar.logo.as_ref().and_then(|l| l.alt.clone()),
            stylesheets: config
                .site
                .stylesheets
                .iter()
                .map(|s| StylesheetLink {
                    // Locally-hosted sheets are copied into the output and
                    // served under the base URL
                    href: if is_remote(&s.href) {
                        s.href.clone()
                    } else {
                        format!("{}{}", config.site.base_url, s.href)
                    },
                    integrity: s.integrity.clone(),
                    crossorigin: s.crossorigin.clone(),
                })
                .collect(),
            navbar_left,
            navbar_right,
            footer_style: config.footer.style.clone(),
            footer_copyright: config.footer.copyright.clone(),
            footer_columns,
        }
    }
}

/// Context for rendering a doc page.
#[derive(Debug, Clone, Serialize)]
pub struct DocPage {
    /// Page title
    pub title: String,
    /// Page description for the meta tag
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    /// Rendered sidebar HTML
    pub sidebar_html: String,
    /// Table of contents
    pub toc: Vec<TocItem>,
    /// "Edit this page" URL
    pub edit_url: Option<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("doc.html".to_string(), DOC_TEMPLATE.to_string())
            .expect("Failed to add doc template");

        env.add_template_owned("home.html".to_string(), HOME_TEMPLATE.to_string())
            .expect("Failed to add home template");

        Self { env }
    }

    /// Render a doc page.
    pub fn render_doc(&self, site: &Chrome, page: &DocPage) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("doc.html")?;
        tmpl.render(context! {
            site => site,
            page => page,
            title => &page.title,
        })
    }

    /// Render the homepage with a pre-rendered feature row.
    pub fn render_home(
        &self,
        site: &Chrome,
        features_html: &str,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("home.html")?;
        tmpl.render(context! {
            site => site,
            features_html => features_html,
            title => &site.title,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a sidebar tree to nested list markup.
pub fn render_sidebar(items: &[NavItem]) -> String {
    let mut out = String::from("<ul class=\"nav-list\">");
    push_items(&mut out, items);
    out.push_str("</ul>");
    out
}

fn push_items(out: &mut String, items: &[NavItem]) {
    for item in items {
        if item.path.is_empty() {
            out.push_str("<li class=\"nav-item\"><span class=\"nav-category\">");
            out.push_str(&escape_html(&item.title));
            out.push_str("</span><ul class=\"nav-children\">");
            push_items(out, &item.children);
            out.push_str("</ul></li>");
        } else {
            out.push_str("<li class=\"nav-item\"><a href=\"");
            out.push_str(&escape_html(&item.path));
            out.push_str("\">");
            out.push_str(&escape_html(&item.title));
            out.push_str("</a></li>");
        }
    }
}

fn is_remote(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}{% if title != site.title %} - {{ site.title }}{% endif %}</title>
  {% if page.description %}<meta name="description" content="{{ page.description }}">
  {% endif %}{% if site.favicon %}<link rel="icon" href="{{ site.favicon }}">
  {% endif %}{% for s in site.stylesheets %}<link rel="stylesheet" href="{{ s.href }}"{% if s.integrity %} integrity="{{ s.integrity }}"{% endif %}{% if s.crossorigin %} crossorigin="{{ s.crossorigin }}"{% endif %}>
  {% endfor %}<link rel="stylesheet" href="{{ site.base_url }}assets/main.css">
</head>
<body>
  <nav class="navbar">
    <a href="{{ site.base_url }}" class="navbar-brand">
      {% if site.logo_src %}<img src="{{ site.logo_src }}" alt="{{ site.logo_alt or '' }}">{% endif %}
      {{ site.title }}
    </a>
    <ul class="navbar-items">
      {% for item in site.navbar_left %}<li><a href="{{ item.href }}">{{ item.label }}</a></li>
      {% endfor %}{% for item in site.navbar_right %}<li><a href="{{ item.href }}">{{ item.label }}</a></li>
      {% endfor %}
    </ul>
  </nav>
  {% block content %}{% endblock %}
  {% if site.footer_columns or site.footer_copyright %}
  <footer class="footer{% if site.footer_style == 'dark' %} footer-dark{% endif %}">
    <div class="footer-columns">
      {% for column in site.footer_columns %}
      <div>
        <h4>{{ column.title }}</h4>
        <ul>
          {% for item in column.items %}<li><a href="{{ item.href }}">{{ item.label }}</a></li>
          {% endfor %}
        </ul>
      </div>
      {% endfor %}
    </div>
    {% if site.footer_copyright %}<div class="footer-copyright">{{ site.footer_copyright }}</div>{% endif %}
  </footer>
  {% endif %}
  <script src="{{ site.base_url }}assets/main.js"></script>
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="layout">
  <nav class="sidebar">
    {{ page.sidebar_html | safe }}
  </nav>
  <main class="main">
    <article class="doc">
      <div class="content">
        {{ page.content | safe }}
      </div>
      {% if page.edit_url %}<p class="edit-link"><a href="{{ page.edit_url }}">Edit this page</a></p>{% endif %}
    </article>

    {% if page.toc %}
    <aside class="toc">
      <h2>On this page</h2>
      <ul>
      {% for entry in page.toc %}
        <li class="toc-level-{{ entry.level }}">
          <a href="#{{ entry.id }}">{{ entry.title }}</a>
        </li>
      {% endfor %}
      </ul>
    </aside>
    {% endif %}
  </main>
</div>
{% endblock %}"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<header class="hero">
  <h1>{{ site.title }}</h1>
  {% if site.tagline %}<p>{{ site.tagline }}</p>{% endif %}
</header>
<main>
  {{ features_html | safe }}
</main>
{% endblock %}"##;
