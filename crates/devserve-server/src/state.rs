//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use crate::live_reload::LiveReloadManager;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Canonicalized server root; every served file lives under it.
    pub root: PathBuf,
    /// Live reload manager. Present even when watching is unavailable so
    /// that `/__livereload` clients can always subscribe.
    pub live_reload: LiveReloadManager,
}
