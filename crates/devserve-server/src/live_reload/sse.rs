//! Server-sent events handler for live reload.
//!
//! Each connected tab holds one long-lived `text/event-stream` response and
//! receives every reload notification independently. Dropping the connection
//! drops its broadcast receiver, so dead subscribers clean themselves up
//! without touching anyone else.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, StreamExt};
use tokio::sync::broadcast;

use crate::state::AppState;

/// Handle `GET /__livereload`.
///
/// Sends a comment frame immediately so the client sees the stream open,
/// then one `data: reload` event per notification. The connection never
/// closes on its own; keepalive comments cover idle periods.
pub(crate) async fn sse_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let receiver = state.live_reload.subscribe();

    let notifications = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(_) => return Some((Event::default().data("reload"), receiver)),
                // Missed notifications collapse into the next reload anyway.
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    let stream = stream::once(async { Event::default().comment("connected") })
        .chain(notifications)
        .map(Ok::<_, Infallible>);

    (
        [
            (header::CONNECTION, "keep-alive"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
}
