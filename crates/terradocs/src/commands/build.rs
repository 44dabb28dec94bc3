//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use terradocs_site::{BuildOptions, SiteBuilder};

/// Run the build command.
pub async fn run(
    config_path: PathBuf,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut options = BuildOptions::new(root);
    options.config_path = config_path;
    options.output = output;
    options.minify = minify;

    let result = SiteBuilder::from_options(&options)?.build().await?;

    if !result.warnings.is_empty() {
        tracing::warn!("{} link warning(s), see above", result.warnings.len());
    }

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
