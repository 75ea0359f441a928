//! The handler that runs after the listing declines a request: plain file
//! serving from the root via `ServeDir`.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::error_page::not_found_page;
use crate::config::ListingConfig;
use crate::domain::BasePath;

/// Serve `request` from the configured root.
///
/// `ServeDir` sees the URI with the base path removed; redirects it issues
/// are mounted back under the base path. Directory requests without a
/// trailing slash always get a redirect, whatever `auto_index` says: the
/// router has already decided between listing and `index.html` for paths
/// that end in `/`.
pub async fn serve_next(config: &ListingConfig, request: Request) -> Response {
    let (mut parts, body) = request.into_parts();
    let original_path = parts.uri.path().to_string();
    let Some(uri) = unmounted_uri(&config.base_path, &parts.uri) else {
        return not_found_page(&original_path);
    };
    parts.uri = uri;

    let service = ServeDir::new(&config.root).append_index_html_on_directories(true);

    match service.oneshot(Request::from_parts(parts, body)).await {
        Ok(mut response) => {
            if response.status() == StatusCode::NOT_FOUND {
                return not_found_page(&original_path);
            }
            if response.status().is_redirection() {
                remount_location(&config.base_path, response.headers_mut());
            }
            response.into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response(),
    }
}

/// `uri` relative to the mount point, query kept. `None` outside the mount.
fn unmounted_uri(base_path: &BasePath, uri: &Uri) -> Option<Uri> {
    let path = base_path.strip(uri.path())?;
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };
    path_and_query.parse().ok()
}

/// Put an absolute-path `Location` back under the mount point.
fn remount_location(base_path: &BasePath, headers: &mut HeaderMap) {
    let Some(location) = headers
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .filter(|location| location.starts_with('/'))
    else {
        return;
    };

    if let Ok(value) = HeaderValue::from_str(&base_path.prefix(location)) {
        headers.insert(header::LOCATION, value);
    }
}

pub fn redirect_to(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(location) => (
            StatusCode::TEMPORARY_REDIRECT,
            [(header::LOCATION, location)],
        )
            .into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use std::fs;

    fn files() -> BasePath {
        BasePath::new("/files").unwrap()
    }

    #[test]
    fn test_unmounted_uri_keeps_query() {
        let uri: Uri = "/files/docs/a.txt?v=2".parse().unwrap();
        assert_eq!(unmounted_uri(&files(), &uri).unwrap(), "/docs/a.txt?v=2");

        let bare: Uri = "/files".parse().unwrap();
        assert_eq!(unmounted_uri(&files(), &bare).unwrap(), "/");
    }

    #[test]
    fn test_unmounted_uri_outside_mount() {
        let uri: Uri = "/filesystem/a".parse().unwrap();
        assert!(unmounted_uri(&files(), &uri).is_none());
    }

    #[test]
    fn test_remount_location() {
        let mut headers = HeaderMap::new();
        headers.insert(header::LOCATION, HeaderValue::from_static("/docs/"));
        remount_location(&files(), &mut headers);
        assert_eq!(headers[header::LOCATION], "/files/docs/");

        let mut external = HeaderMap::new();
        external.insert(header::LOCATION, HeaderValue::from_static("https://example.com/"));
        remount_location(&files(), &mut external);
        assert_eq!(external[header::LOCATION], "https://example.com/");

        let mut root = HeaderMap::new();
        root.insert(header::LOCATION, HeaderValue::from_static("/docs/"));
        remount_location(&BasePath::root(), &mut root);
        assert_eq!(root[header::LOCATION], "/docs/");
    }

    #[test]
    fn test_redirect_to() {
        let response = redirect_to("/files/?a=1");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/files/?a=1");
    }

    #[tokio::test]
    async fn test_serve_next_serves_file_under_base() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("hello.txt"), "hello").unwrap();

        let mut config = ListingConfig::new(tmp.path());
        config.base_path = files();
        config.validate().unwrap();

        let request = Request::builder()
            .uri("/files/hello.txt")
            .body(Body::empty())
            .unwrap();
        let response = serve_next(&config, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_serve_next_redirects_directory_without_auto_index() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let mut config = ListingConfig::new(tmp.path());
        config.base_path = files();
        config.auto_index = false;
        config.validate().unwrap();

        let request = Request::builder()
            .uri("/files/sub")
            .body(Body::empty())
            .unwrap();
        let response = serve_next(&config, request).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/files/sub/");
    }

    #[tokio::test]
    async fn test_serve_next_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = ListingConfig::new(tmp.path());
        config.validate().unwrap();

        let request = Request::builder()
            .uri("/missing.txt")
            .body(Body::empty())
            .unwrap();
        let response = serve_next(&config, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
