//! Static file serving.
//!
//! Resolves request paths against the server root, reads files, and serves
//! them with a content type from the MIME table. HTML passes through the
//! reload injector on the way out.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::error::ServerError;
use crate::inject::inject_reload_script;
use crate::resolve::resolve_request_path;
use crate::state::AppState;

/// Serve the file at the resolved request path.
///
/// Directory paths serve their `index.html`. Path resolution happens before
/// any filesystem access; rejected paths are never statted or read. Stat and
/// read failures are all 404; absent and unreadable files are deliberately
/// not distinguished.
pub(crate) async fn serve_path(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let decoded = percent_decode_str(uri.path())
        .decode_utf8()
        .map_err(|_| ServerError::PathRejected(uri.path().to_owned()))?;

    let Some(mut path) = resolve_request_path(&state.root, &decoded) else {
        return Err(ServerError::PathRejected(decoded.into_owned()));
    };

    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|_| ServerError::NotFound(path.clone()))?;
    if metadata.is_dir() {
        path.push("index.html");
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ServerError::NotFound(path.clone()))?;

    let is_html = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));

    let response = if is_html {
        let html = inject_reload_script(&String::from_utf8_lossy(&bytes));
        (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned())],
            html,
        )
            .into_response()
    } else {
        ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response()
    };

    Ok(response)
}

/// Look up the content type for a file, falling back to a generic binary
/// type for unmapped extensions.
fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use crate::app::create_router;
    use crate::live_reload::LiveReloadManager;
    use tokio::sync::broadcast;

    fn test_router(root: PathBuf) -> axum::Router {
        let (notifier, _receiver) = broadcast::channel(16);
        let state = Arc::new(AppState {
            root: root.clone(),
            live_reload: LiveReloadManager::new(root, notifier),
        });
        create_router(state)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_html_with_injected_script() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("index.html"), "<html><body>Hi</body></html>").unwrap();
        let router = test_router(root.path().to_path_buf());

        let response = router.oneshot(request("/index.html")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");

        let body = body_text(response).await;
        assert!(body.contains("Hi"));
        let script_at = body.find("<script>").unwrap();
        let body_close_at = body.find("</body>").unwrap();
        assert!(script_at < body_close_at);
    }

    #[tokio::test]
    async fn test_traversal_is_forbidden() {
        let root = tempfile::tempdir().unwrap();
        let router = test_router(root.path().to_path_buf());

        let response = router
            .oneshot(request("/../../etc/passwd"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(response).await, "Forbidden");
    }

    #[tokio::test]
    async fn test_percent_encoded_traversal_is_forbidden() {
        let root = tempfile::tempdir().unwrap();
        let router = test_router(root.path().to_path_buf());

        let response = router
            .oneshot(request("/%2e%2e/%2e%2e/etc/passwd"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_directory_serves_its_index() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("docs")).unwrap();
        std::fs::write(
            root.path().join("docs/index.html"),
            "<html><body>docs</body></html>",
        )
        .unwrap();
        let router = test_router(root.path().to_path_buf());

        let response = router.oneshot(request("/docs/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("docs"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        let router = test_router(root.path().to_path_buf());

        let response = router.oneshot(request("/missing.html")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not found");
    }

    #[tokio::test]
    async fn test_non_html_served_unmodified() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("app.css"), "body { color: red }").unwrap();
        let router = test_router(root.path().to_path_buf());

        let response = router.oneshot(request("/app.css")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
        assert_eq!(body_text(response).await, "body { color: red }");
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("data.xyz123"), [0u8, 1, 2]).unwrap();
        let router = test_router(root.path().to_path_buf());

        let response = router.oneshot(request("/data.xyz123")).await.unwrap();

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
    }

    #[test]
    fn test_content_type_lookup() {
        assert_eq!(content_type(Path::new("a.css")), "text/css");
        assert_eq!(content_type(Path::new("a.png")), "image/png");
        assert_eq!(content_type(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(content_type(Path::new("a.bin")), "application/octet-stream");
    }
}
