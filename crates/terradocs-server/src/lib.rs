//! Development server with live reload for terradocs sites.
//!
//! Rebuilds the site when sources change and notifies connected browsers
//! over a WebSocket channel.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{reload_client_script, ReloadHub, ReloadMessage};
