//! Live reload manager.
//!
//! Coordinates file watching, trigger filtering, and notification fan-out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use super::debouncer;

/// Notification sent to connected clients when files change.
///
/// Carries no payload; clients reload the whole page.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ReloadEvent;

/// Default coalescing window in milliseconds.
///
/// Sized to absorb the event burst of a single editor save (write temp +
/// rename) into one reload.
const DEFAULT_DEBOUNCE_MS: u64 = 80;

/// Directory names whose changes never trigger a reload.
///
/// Dependency caches and version-control metadata churn constantly and are
/// irrelevant to the served content.
const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Manages file watching and broadcasting reload notifications.
pub(crate) struct LiveReloadManager {
    root: PathBuf,
    notifier: broadcast::Sender<ReloadEvent>,
    watcher: Option<RecommendedWatcher>,
    debounce_ms: u64,
}

impl LiveReloadManager {
    /// Create a new live reload manager watching `root`.
    #[must_use]
    pub(crate) fn new(root: PathBuf, notifier: broadcast::Sender<ReloadEvent>) -> Self {
        Self {
            root,
            notifier,
            watcher: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Start the recursive file watcher and the coalescing task.
    ///
    /// Filtering runs in the watch callback, before coalescing, so ignored
    /// paths never arm the reload timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the watch cannot be established (some platforms
    /// lack recursive watching); the caller treats this as a degraded mode,
    /// not a failure.
    pub(crate) fn start(&mut self) -> Result<(), notify::Error> {
        let (trigger_tx, trigger_rx) = mpsc::channel::<()>(100);
        let root = self.root.clone();

        // Callback is sync, hence blocking_send.
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res
                && is_reload_trigger(&event, &root)
            {
                let _ = trigger_tx.blocking_send(());
            }
        })?;

        watcher.watch(&self.root, RecursiveMode::Recursive)?;
        self.watcher = Some(watcher);

        tokio::spawn(debouncer::run(
            trigger_rx,
            Duration::from_millis(self.debounce_ms),
            self.notifier.clone(),
        ));

        Ok(())
    }

    /// Get a receiver for reload notifications.
    #[must_use]
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.notifier.subscribe()
    }
}

/// Check whether a filesystem event qualifies as a reload trigger.
///
/// Create, modify, and remove events qualify; access and other noise does
/// not. At least one event path must lie under the root outside the ignored
/// directories.
fn is_reload_trigger(event: &Event, root: &Path) -> bool {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return false,
    }

    event.paths.iter().any(|path| !is_ignored_path(path, root))
}

/// Check whether a changed path should be ignored.
///
/// Paths outside the root are ignored, as is anything under a dependency
/// cache or version-control metadata directory at any depth.
fn is_ignored_path(path: &Path, root: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return true;
    };

    relative.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
    })
}
