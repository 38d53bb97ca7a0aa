//! Error types for the HTTP server.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Server error type.
///
/// Missing and unreadable files are deliberately not distinguished; both
/// surface as 404.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Requested path resolves outside the server root.
    #[error("Path outside server root: {0}")]
    PathRejected(String),

    /// File not found or unreadable at the given path.
    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PathRejected(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
        };

        (status, body).into_response()
    }
}
