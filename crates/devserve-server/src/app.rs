//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::live_reload;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// `/__livereload` is the push channel; everything else falls through to
/// the static responder. Caching is disabled across the board so the
/// browser always refetches after a reload.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/__livereload", get(live_reload::sse_handler))
        .fallback(static_files::serve_path)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache"),
                )),
        )
        .with_state(state)
}
