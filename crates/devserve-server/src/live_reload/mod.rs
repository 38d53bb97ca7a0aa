//! Live reload system.
//!
//! Watches the server root for changes, coalesces bursts of filesystem
//! events into single notifications, and fans them out to connected
//! browser tabs over server-sent events.

mod debouncer;
mod manager;
mod sse;

pub(crate) use manager::{LiveReloadManager, ReloadEvent};
pub(crate) use sse::sse_handler;
