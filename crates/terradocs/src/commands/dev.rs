//! Development server command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use terradocs_config::SiteConfig;
use terradocs_server::{DevServer, DevServerConfig};

/// Run the dev server.
pub async fn run(config_path: PathBuf, port: Option<u16>, open: bool) -> Result<()> {
    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    // CLI flags override the [serve] section
    let site = SiteConfig::load(&config_path)?;
    let port = port.unwrap_or(site.serve.port);

    tracing::info!("Starting development server on port {}", port);

    let config = DevServerConfig {
        root,
        config_path,
        port,
        host: site.serve.host,
        open,
    };

    DevServer::new(config).start().await?;

    Ok(())
}
