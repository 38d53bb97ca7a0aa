//! Trigger coalescing for live reload.
//!
//! A single logical edit (editor save, temp-write-and-rename) produces a
//! burst of filesystem events. The debouncer absorbs each burst into one
//! reload notification, fired once the stream of triggers pauses.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use super::manager::ReloadEvent;

/// Coalesce qualifying change triggers into single reload notifications.
///
/// Two states: idle (no notification scheduled) and armed (deadline set).
/// The first trigger arms a deadline of `delay` from now; every further
/// trigger slides the deadline forward, so a steady stream of triggers
/// defers the notification until the stream pauses. When the deadline
/// expires, exactly one [`ReloadEvent`] is broadcast to all current
/// subscribers and the state returns to idle.
///
/// All mutable state lives in this task; callers communicate only through
/// the channels, so no locking is involved.
pub(super) async fn run(
    mut triggers: mpsc::Receiver<()>,
    delay: Duration,
    notifier: broadcast::Sender<ReloadEvent>,
) {
    loop {
        // Idle: wait for the first trigger.
        if triggers.recv().await.is_none() {
            return;
        }

        // Armed: each further trigger restarts the coalescing window.
        let mut deadline = Instant::now() + delay;
        loop {
            tokio::select! {
                () = tokio::time::sleep_until(deadline) => break,
                trigger = triggers.recv() => match trigger {
                    Some(()) => deadline = Instant::now() + delay,
                    None => return,
                },
            }
        }

        // Broadcasting to zero subscribers is a no-op.
        if notifier.send(ReloadEvent).is_ok() {
            tracing::debug!("reload notification broadcast");
        }
    }
}
