//! Configuration loading and validation errors.

use std::path::PathBuf;

/// Errors raised while loading or validating site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Navbar item '{label}' must set exactly one of `doc` or `href`")]
    NavbarTarget { label: String },

    #[error("Footer item '{label}' must set exactly one of `to` or `href`")]
    FooterTarget { label: String },

    #[error("Sidebar category '{label}' must set exactly one of `items` or `autogenerate`")]
    CategoryChildren { label: String },
}
