//! Navbar configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The `[navbar]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NavbarConfig {
    /// Optional logo shown next to the site title.
    #[serde(default)]
    pub logo: Option<Logo>,

    /// Navbar entries in declaration order.
    #[serde(default)]
    pub items: Vec<NavbarItem>,
}

/// Navbar logo reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logo {
    /// Image path relative to the static dir.
    pub src: String,

    /// Alt text.
    #[serde(default)]
    pub alt: Option<String>,
}

/// A single navbar entry. Exactly one of `doc` or `href` must be set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavbarItem {
    /// Display label
    pub label: String,

    /// Internal document identifier
    #[serde(default)]
    pub doc: Option<String>,

    /// External URL
    #[serde(default)]
    pub href: Option<String>,

    /// Which side of the navbar the entry sits on
    #[serde(default)]
    pub position: NavPosition,
}

/// Navbar placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavPosition {
    #[default]
    Left,
    Right,
}

/// Resolved navbar target, after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget<'a> {
    /// Internal document identifier
    Doc(&'a str),
    /// External URL
    Href(&'a str),
}

impl NavbarItem {
    /// The entry's target. Errors unless exactly one of `doc`/`href` is set.
    pub fn target(&self) -> Result<NavTarget<'_>, ConfigError> {
        match (self.doc.as_deref(), self.href.as_deref()) {
            (Some(doc), None) => Ok(NavTarget::Doc(doc)),
            (None, Some(href)) => Ok(NavTarget::Href(href)),
            _ => Err(ConfigError::NavbarTarget {
                label: self.label.clone(),
            }),
        }
    }
}

impl NavbarConfig {
    /// Check every entry has a well-formed target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for item in &self.items {
            item.target()?;
        }
        Ok(())
    }
}
