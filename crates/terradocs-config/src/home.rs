//! Homepage configuration.

use serde::{Deserialize, Serialize};

/// The `[home]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HomeConfig {
    /// Feature entries rendered on the landing page, in declaration order.
    #[serde(default)]
    pub features: Vec<FeatureEntry>,
}

/// One landing-page feature block.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureEntry {
    /// Block heading
    pub title: String,

    /// Icon path relative to the static dir
    #[serde(default)]
    pub icon: Option<String>,

    /// Markdown fragment shown under the heading
    pub description: String,
}
