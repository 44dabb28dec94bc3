//! Footer configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The `[footer]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FooterConfig {
    /// Visual style hint passed through to the template ("dark", "light").
    #[serde(default)]
    pub style: Option<String>,

    /// Copyright line.
    #[serde(default)]
    pub copyright: Option<String>,

    /// Link columns in declaration order.
    #[serde(default)]
    pub links: Vec<FooterColumn>,
}

/// One column of footer links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FooterColumn {
    /// Column heading
    pub title: String,

    #[serde(default)]
    pub items: Vec<FooterItem>,
}

/// A footer link. Exactly one of `to` (internal doc) or `href` (external).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FooterItem {
    /// Display label
    pub label: String,

    /// Internal document identifier
    #[serde(default)]
    pub to: Option<String>,

    /// External URL
    #[serde(default)]
    pub href: Option<String>,
}

impl FooterConfig {
    /// Check every link has a well-formed target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for column in &self.links {
            for item in &column.items {
                match (&item.to, &item.href) {
                    (Some(_), None) | (None, Some(_)) => {}
                    _ => {
                        return Err(ConfigError::FooterTarget {
                            label: item.label.clone(),
                        })
                    }
                }
            }
        }
        Ok(())
    }
}
