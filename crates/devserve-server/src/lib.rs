//! HTTP server core for devserve.
//!
//! A development server that serves static files from a root directory and
//! pushes reload notifications to connected browser tabs when files change:
//! - Static files with path resolution confined to the server root
//! - Live reload over server-sent events at `/__livereload`
//! - Reload client script injected into served HTML
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use devserve_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 5173,
//!         root: PathBuf::from("."),
//!         live_reload_enabled: true,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router
//!                        │
//!                        ├─► GET /__livereload ──► SSE stream
//!                        │                            ▲
//!                        │                  broadcast │
//!                        │                            │
//!                        │         debouncer ◄── notify watcher
//!                        │
//!                        └─► GET /<path> ──► static responder
//!                                               │
//!                                               └─► reload injector (HTML)
//! ```

mod app;
mod error;
mod inject;
mod live_reload;
mod resolve;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::broadcast;

use live_reload::{LiveReloadManager, ReloadEvent};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory to serve files from.
    pub root: PathBuf,
    /// Enable live reload.
    pub live_reload_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5173,
            root: PathBuf::from("."),
            live_reload_enabled: true,
        }
    }
}

/// Run the server until interrupted.
///
/// Failure to establish the file watch is a degraded mode, logged once;
/// files are still served without live reload. Failure to bind the listener
/// or to resolve the root directory is fatal.
///
/// # Errors
///
/// Returns an error if the root directory cannot be resolved or the server
/// fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let root = tokio::fs::canonicalize(&config.root).await?;

    let (notifier, _receiver) = broadcast::channel::<ReloadEvent>(100);
    let mut live_reload = LiveReloadManager::new(root.clone(), notifier);
    if config.live_reload_enabled
        && let Err(err) = live_reload.start()
    {
        tracing::warn!(error = %err, "file watching unavailable; continuing without live reload");
    }

    let state = Arc::new(AppState { root, live_reload });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
