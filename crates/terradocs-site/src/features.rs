//! Homepage feature list renderer.

use terradocs_config::FeatureEntry;
use terradocs_markdown::render_html;

use crate::templates::escape_html;

/// Render the landing-page feature row.
///
/// A pure function from the ordered feature list to one block per entry,
/// preserving declaration order. Zero entries produce an empty row.
pub fn render_features(features: &[FeatureEntry], base_url: &str) -> String {
    let mut row = String::new();

    for feature in features {
        row.push_str("<div class=\"feature\">");

        if let Some(icon) = &feature.icon {
            row.push_str("<img src=\"");
            row.push_str(&escape_html(base_url));
            row.push_str(&escape_html(icon));
            row.push_str("\" role=\"img\" alt=\"\">");
        }

        row.push_str("<h3>");
        row.push_str(&escape_html(&feature.title));
        row.push_str("</h3>");

        // Descriptions are markdown fragments
        row.push_str(&render_html(&feature.description, false));

        row.push_str("</div>");
    }

    format!(
        "<section class=\"features\"><div class=\"row\">{}</div></section>",
        row
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_features() -> Vec<FeatureEntry> {
        vec![
            FeatureEntry {
                title: "Comprehensive Workflow Coverage".to_string(),
                icon: Some("img/icon_tractor.svg".to_string()),
                description: "Tutorials provide an end-to-end guide through the entire \
                              remote sensing workflow."
                    .to_string(),
            },
            FeatureEntry {
                title: "In-Depth Tutorials".to_string(),
                icon: Some("img/icon_earth.svg".to_string()),
                description: "Dive deep into the functionalities of Google Earth Engine."
                    .to_string(),
            },
            FeatureEntry {
                title: "Hands-On Learning".to_string(),
                icon: Some("img/icon_satellite.svg".to_string()),
                description: "Engage with practical examples and hands-on exercises."
                    .to_string(),
            },
        ]
    }

    #[test]
    fn renders_three_blocks_in_declaration_order() {
        let html = render_features(&canonical_features(), "/");

        assert_eq!(html.matches("<div class=\"feature\">").count(), 3);

        let first = html.find("Comprehensive Workflow Coverage").unwrap();
        let second = html.find("In-Depth Tutorials").unwrap();
        let third = html.find("Hands-On Learning").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn renders_empty_row_for_no_entries() {
        let html = render_features(&[], "/");

        assert_eq!(
            html,
            "<section class=\"features\"><div class=\"row\"></div></section>"
        );
    }

    #[test]
    fn prefixes_icons_with_base_url() {
        let html = render_features(&canonical_features(), "/remote-sensing/");

        assert!(html.contains("src=\"/remote-sensing/img/icon_tractor.svg\""));
    }

    #[test]
    fn skips_icon_when_absent() {
        let features = vec![FeatureEntry {
            title: "No Icon".to_string(),
            icon: None,
            description: "Plain block.".to_string(),
        }];

        let html = render_features(&features, "/");

        assert!(!html.contains("<img"));
        assert!(html.contains("<h3>No Icon</h3>"));
    }

    #[test]
    fn renders_description_markdown() {
        let features = vec![FeatureEntry {
            title: "Markdown".to_string(),
            icon: None,
            description: "Learn **Earth Engine** basics.".to_string(),
        }];

        let html = render_features(&features, "/");

        assert!(html.contains("<strong>Earth Engine</strong>"));
    }
}
