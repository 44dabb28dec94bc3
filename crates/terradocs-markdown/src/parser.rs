//! Markdown document parser and HTML renderer.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::math::{extract_math, reinsert_math};

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,

    /// Link targets found in the content
    pub links: Vec<LinkRef>,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// A link target found in markdown content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Raw destination as written
    pub href: String,
}

impl LinkRef {
    /// Whether this link points inside the site (subject to the
    /// broken-markdown-link policy) rather than at an external resource.
    pub fn is_internal(&self) -> bool {
        let href = self.href.as_str();
        !(href.starts_with("http://")
            || href.starts_with("https://")
            || href.starts_with("//")
            || href.starts_with("mailto:")
            || href.starts_with('#')
            || href.is_empty())
    }
}

/// Errors that can occur when parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse a markdown document.
///
/// Extracts frontmatter, collects a table of contents, and records every
/// link target for the broken-link checker.
pub fn parse_doc(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let mut toc = Vec::new();
    let mut links = Vec::new();
    let mut current_heading: Option<(u8, String)> = None;

    for event in Parser::new_ext(content, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, heading_text)) = current_heading.as_mut() {
                    heading_text.push_str(&text);
                }
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current_heading.take() {
                    let id = slugify(&title);
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                links.push(LinkRef {
                    href: dest_url.to_string(),
                });
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        toc,
        links,
    })
}

/// Render markdown content to HTML.
///
/// Headings get slugified anchor IDs so TOC links resolve. With `math`
/// enabled, `$...$` / `$$...$$` segments come back as KaTeX-compatible
/// classed markup.
pub fn render_html(content: &str, math: bool) -> String {
    let (content, segments) = if math {
        extract_math(content)
    } else {
        (content.to_string(), Vec::new())
    };

    let mut events: Vec<Event> = Parser::new_ext(&content, markdown_options()).collect();
    assign_heading_ids(&mut events);

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    if segments.is_empty() {
        html_output
    } else {
        reinsert_math(&html_output, &segments)
    }
}

/// Give every heading without an explicit ID a slugified one.
fn assign_heading_ids(events: &mut [Event]) {
    let mut i = 0;
    while i < events.len() {
        let needs_id = matches!(&events[i], Event::Start(Tag::Heading { id: None, .. }));

        if needs_id {
            let mut text = String::new();
            let mut j = i + 1;
            while j < events.len() && !matches!(events[j], Event::End(TagEnd::Heading(_))) {
                if let Event::Text(t) | Event::Code(t) = &events[j] {
                    text.push_str(t);
                }
                j += 1;
            }

            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(slugify(&text)));
            }
        }

        i += 1;
    }
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_document() {
        let source = r#"---
title: Spectral Indices
description: Band math for vegetation analysis
---

# Spectral Indices

See the [attribution](/docs/attribution/) page and the
[Earth Engine docs](https://developers.google.com/earth-engine).

## NDVI

Band ratios.
"#;

        let doc = parse_doc(source).unwrap();

        let fm = doc.frontmatter.unwrap();
        assert_eq!(fm.title, "Spectral Indices");
        assert_eq!(
            fm.description,
            Some("Band math for vegetation analysis".to_string())
        );

        assert_eq!(doc.toc.len(), 2);
        assert_eq!(doc.toc[0].title, "Spectral Indices");
        assert_eq!(doc.toc[0].id, "spectral-indices");
        assert_eq!(doc.toc[0].level, 1);
        assert_eq!(doc.toc[1].title, "NDVI");
        assert_eq!(doc.toc[1].level, 2);

        assert_eq!(doc.links.len(), 2);
        assert!(doc.links[0].is_internal());
        assert!(!doc.links[1].is_internal());
    }

    #[test]
    fn parses_without_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter.";

        let doc = parse_doc(source).unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.toc.len(), 1);
        assert_eq!(doc.toc[0].title, "Just Markdown");
    }

    #[test]
    fn classifies_link_targets() {
        for (href, internal) in [
            ("/docs/intro/", true),
            ("../attribution", true),
            ("Tutorials/01-intro", true),
            ("https://example.com", false),
            ("mailto:hello@example.com", false),
            ("#ndvi", false),
        ] {
            let link = LinkRef {
                href: href.to_string(),
            };
            assert_eq!(link.is_internal(), internal, "href: {}", href);
        }
    }

    #[test]
    fn renders_headings_with_anchor_ids() {
        let html = render_html("## Cloud Masking", false);

        assert!(html.contains("<h2 id=\"cloud-masking\">Cloud Masking</h2>"));
    }

    #[test]
    fn renders_math_when_enabled() {
        let html = render_html("NDVI is $\\frac{NIR - Red}{NIR + Red}$.", true);

        assert!(html.contains("math math-inline"));
        assert!(html.contains("\\(\\frac{NIR - Red}{NIR + Red}\\)"));
    }

    #[test]
    fn leaves_dollar_signs_alone_when_math_disabled() {
        let html = render_html("It costs $x$ dollars.", false);

        assert!(!html.contains("math math-inline"));
        assert!(html.contains("$x$"));
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Image Classification"), "image-classification");
        assert_eq!(slugify("NDVI (Vegetation)"), "ndvi-vegetation");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
