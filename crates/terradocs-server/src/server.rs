//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use terradocs_config::SiteConfig;
use terradocs_site::{BuildOptions, SiteBuilder};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{reload_client_script, ReloadHub, ReloadMessage};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Project root (where site.toml lives)
    pub root: PathBuf,

    /// Path to the config file
    pub config_path: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config_path: PathBuf::from("site.toml"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Build error: {0}")]
    BuildError(String),
}

/// Shared server state.
struct ServerState {
    hub: ReloadHub,
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .expect("Invalid address");

        // Initial build; failing here is an operator error worth surfacing
        let output_dir = rebuild(&self.config)
            .await
            .map_err(ServerError::BuildError)?;

        let state = Arc::new(ServerState {
            hub: ReloadHub::new(),
        });

        // Watch sources only, never the output dir, or every rebuild would
        // trigger the next one
        let site = SiteConfig::load(&self.config.config_path)
            .map_err(|e| ServerError::BuildError(e.to_string()))?;
        let watch_paths = vec![
            self.config.root.join(&site.docs.dir),
            self.config.config_path.clone(),
            site.sidebar_path(&self.config.config_path),
            self.config.root.join("static"),
        ];

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        // Spawn file watch handler
        let state_clone = Arc::clone(&state);
        let server_config = self.config.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, &server_config, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        // Build router
        let app = Router::new()
            .route("/__reload", get(ws_handler))
            .route("/__reload.js", get(reload_script_handler))
            .fallback_service(ServeDir::new(&output_dir))
            .with_state(state);

        tracing::info!("Starting dev server at http://{}", addr);

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        // Start server
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handle file watch events.
async fn handle_watch_event(
    state: &Arc<ServerState>,
    config: &DevServerConfig,
    event: WatchEvent,
) {
    match &event {
        WatchEvent::DocModified(path) => tracing::info!("Doc modified: {}", path.display()),
        WatchEvent::ConfigModified(path) => tracing::info!("Config modified: {}", path.display()),
        WatchEvent::Created(path) => tracing::info!("Created: {}", path.display()),
        WatchEvent::Deleted(path) => tracing::info!("Deleted: {}", path.display()),
        WatchEvent::Modified(path) => tracing::debug!("Modified: {}", path.display()),
    }

    match rebuild(config).await {
        Ok(_) => state.hub.send(ReloadMessage::Reload),
        Err(message) => {
            tracing::error!("Rebuild failed: {}", message);
            state.hub.send(ReloadMessage::BuildFailed { message });
        }
    }
}

/// Build the site and attach the reload client to its runtime script.
async fn rebuild(config: &DevServerConfig) -> Result<PathBuf, String> {
    let mut options = BuildOptions::new(&config.root);
    options.config_path = config.config_path.clone();
    // Dev builds skip minification
    options.minify = Some(false);

    let builder = SiteBuilder::from_options(&options).map_err(|e| e.to_string())?;
    let result = builder.build().await.map_err(|e| e.to_string())?;

    let main_js = result.output_dir.join("assets/main.js");
    match std::fs::read_to_string(&main_js) {
        Ok(mut js) => {
            js.push_str(&reload_client_script("/__reload"));
            std::fs::write(&main_js, js).map_err(|e| e.to_string())?;
        }
        Err(e) => return Err(format!("missing runtime script: {}", e)),
    }

    tracing::info!("Rebuilt {} pages in {}ms", result.pages, result.duration_ms);

    Ok(result.output_dir)
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hub.subscribe();

    // Send connected message
    let msg = serde_json::to_string(&ReloadMessage::Connected).unwrap();
    if socket.send(Message::Text(msg.into())).await.is_err() {
        return;
    }

    // Forward reload messages to the client
    while let Ok(reload_msg) = rx.recv().await {
        let json = serde_json::to_string(&reload_msg).unwrap();
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }
}

/// Handler for the reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    let script = reload_client_script("/__reload");
    ([("content-type", "application/javascript")], script)
}
