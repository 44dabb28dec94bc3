//! Broken-link policy.

use serde::{Deserialize, Serialize};

/// What to do when an internal reference cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Say nothing and keep building.
    Ignore,
    /// Surface a warning and keep building.
    Warn,
    /// Abort the build.
    Throw,
}

/// The `[links]` section: one policy for configuration references
/// (navbar, footer, sidebar), one for links inside markdown prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkRules {
    /// Applies to doc references declared in configuration. Default: throw.
    #[serde(default = "default_throw")]
    pub on_broken_links: LinkPolicy,

    /// Applies to links written in markdown content. Default: warn.
    #[serde(default = "default_warn")]
    pub on_broken_markdown_links: LinkPolicy,
}

fn default_throw() -> LinkPolicy {
    LinkPolicy::Throw
}

fn default_warn() -> LinkPolicy {
    LinkPolicy::Warn
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            on_broken_links: LinkPolicy::Throw,
            on_broken_markdown_links: LinkPolicy::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_throw_and_warn() {
        let rules = LinkRules::default();

        assert_eq!(rules.on_broken_links, LinkPolicy::Throw);
        assert_eq!(rules.on_broken_markdown_links, LinkPolicy::Warn);
    }

    #[test]
    fn parses_lowercase_values() {
        let rules: LinkRules = toml::from_str(
            r#"
on_broken_links = "warn"
on_broken_markdown_links = "ignore"
"#,
        )
        .unwrap();

        assert_eq!(rules.on_broken_links, LinkPolicy::Warn);
        assert_eq!(rules.on_broken_markdown_links, LinkPolicy::Ignore);
    }
}
