//! HTML directory listings.
//!
//! [`DirectoryListing::render`] runs the whole pipeline for one request:
//! resolve the URL onto the root, stat and read the directory, bucket and
//! sort the entries, and render the page with its caching headers. Any
//! filesystem failure comes back as a [`ListingError`] so the caller can
//! apply the configured [`ErrorPolicy`](crate::domain::ErrorPolicy) in one
//! place.

pub mod classify;
pub mod format;
pub mod page;
pub(crate) mod path_utils;
pub mod row;
pub mod sort;
pub mod styles;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::config::ListingConfig;
use classify::{DirEntry, FileStat, classify};
use page::{PageContext, render_page};
use path_utils::{parent_within_root, percent_decode, resolve_path};
use row::RowOptions;
use sort::sort_buckets;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Request path is outside the base path: {0}")]
    OutsideBase(String),

    #[error("Failed to stat {path}: {source}")]
    Stat { path: PathBuf, source: io::Error },

    #[error("Failed to read directory {path}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("Failed to stat parent directory {path}: {source}")]
    ParentStat { path: PathBuf, source: io::Error },
}

/// The request data a listing depends on.
#[derive(Debug, Clone, Copy)]
pub struct ListingRequest<'a> {
    /// Path as received, percent-encoded.
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub host: Option<&'a str>,
}

impl<'a> ListingRequest<'a> {
    pub fn from_parts(uri: &'a Uri, headers: &'a HeaderMap) -> Self {
        Self {
            path: uri.path(),
            query: uri.query(),
            host: headers.get(header::HOST).and_then(|h| h.to_str().ok()),
        }
    }
}

/// Stateless listing handler bound to one configuration.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    config: Arc<ListingConfig>,
}

impl DirectoryListing {
    pub fn new(config: Arc<ListingConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Filesystem directory a raw request path maps to.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        resolve_path(
            &self.config.root,
            &self.config.base_path,
            &percent_decode(request_path),
        )
    }

    /// Build the listing response for `request`.
    pub async fn render(&self, request: &ListingRequest<'_>) -> Result<Response, ListingError> {
        let config = &*self.config;
        let display_path = percent_decode(request.path);
        let dir = resolve_path(&config.root, &config.base_path, &display_path)
            .ok_or_else(|| ListingError::OutsideBase(display_path.clone()))?;

        debug!(path = %display_path, dir = %dir.display(), "Rendering directory listing");

        let metadata = fs::metadata(&dir).await.map_err(|source| ListingError::Stat {
            path: dir.clone(),
            source,
        })?;
        let dir_stat = FileStat::from(&metadata);

        let mut names = read_names(&dir)
            .await
            .map_err(|source| ListingError::ReadDir {
                path: dir.clone(),
                source,
            })?;

        if !config.show_dotfiles {
            names.retain(|name| !name.starts_with('.'));
        }

        let mut buckets = classify(dir.clone(), names).await;

        if let Some(parent) = parent_within_root(&dir, &config.root) {
            let entry = parent_entry(&parent, fs::metadata(&parent).await)?;
            buckets.directories.insert(0, entry);
        }

        sort_buckets(&mut buckets);

        let ctx = PageContext {
            display_path: &display_path,
            host: request.host,
            row: RowOptions {
                request_path: request.path,
                query: request.query,
                hide_permissions: config.hide_permissions,
                human_readable: config.human_readable,
                si: config.si,
            },
        };
        let html = render_page(&buckets, &ctx);

        debug!(
            path = %display_path,
            entries = buckets.len(),
            "Directory listing rendered"
        );

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("text/html")),
                (header::CACHE_CONTROL, config.cache_control.clone()),
            ],
            [
                (header::ETAG, format::etag(&dir_stat, config.weak_etags)),
                (header::LAST_MODIFIED, format::http_date(dir_stat.modified)),
            ],
            html,
        )
            .into_response())
    }
}

/// The `..` row, or the error that aborts the listing when the parent
/// cannot be stat'ed.
fn parent_entry(
    parent: &Path,
    metadata: io::Result<std::fs::Metadata>,
) -> Result<DirEntry, ListingError> {
    match metadata {
        Ok(metadata) => Ok(DirEntry::new("..", FileStat::from(&metadata))),
        Err(source) => Err(ListingError::ParentStat {
            path: parent.to_path_buf(),
            source,
        }),
    }
}

async fn read_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BasePath;
    use std::fs as stdfs;

    fn listing(root: &Path) -> DirectoryListing {
        let mut config = ListingConfig::new(root);
        config.validate().unwrap();
        DirectoryListing::new(Arc::new(config))
    }

    fn request(path: &str) -> ListingRequest<'_> {
        ListingRequest {
            path,
            query: None,
            host: Some("localhost"),
        }
    }

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_render_root_listing() {
        let tmp = tempfile::tempdir().unwrap();
        stdfs::write(tmp.path().join("file.txt"), "content").unwrap();
        stdfs::create_dir(tmp.path().join("sub")).unwrap();

        let response = listing(tmp.path()).render(&request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/html");
        assert_eq!(headers[header::CACHE_CONTROL], "max-age=3600");
        assert!(headers[header::ETAG].to_str().unwrap().starts_with("W/\""));
        assert!(headers[header::LAST_MODIFIED].to_str().unwrap().ends_with(" GMT"));

        let body = body_of(response).await;
        assert!(body.contains(">sub/</a>"));
        assert!(body.contains(">file.txt</a>"));
        assert!(!body.contains(">../</a>"));
    }

    #[tokio::test]
    async fn test_subdirectory_has_parent_link_first() {
        let tmp = tempfile::tempdir().unwrap();
        stdfs::create_dir_all(tmp.path().join("a").join("inner")).unwrap();

        let response = listing(tmp.path()).render(&request("/a/")).await.unwrap();
        let body = body_of(response).await;

        let parent = body.find("<a href=\"/a/../\">../</a>").unwrap();
        let inner = body.find(">inner/</a>").unwrap();
        assert!(parent < inner);
    }

    #[tokio::test]
    async fn test_traversal_stays_at_root() {
        let tmp = tempfile::tempdir().unwrap();
        stdfs::write(tmp.path().join("here.txt"), "x").unwrap();

        let response = listing(tmp.path())
            .render(&request("/../../"))
            .await
            .unwrap();
        let body = body_of(response).await;
        assert!(body.contains(">here.txt</a>"));
        assert!(!body.contains(">../</a>"));
    }

    #[tokio::test]
    async fn test_dotfiles_hidden_when_configured() {
        let tmp = tempfile::tempdir().unwrap();
        stdfs::create_dir(tmp.path().join(".git")).unwrap();
        stdfs::write(tmp.path().join(".env"), "x").unwrap();
        stdfs::write(tmp.path().join("visible.txt"), "x").unwrap();

        let shown = body_of(listing(tmp.path()).render(&request("/")).await.unwrap()).await;
        assert!(shown.contains(">.git/</a>"));
        assert!(shown.contains(">.env</a>"));

        let mut config = ListingConfig::new(tmp.path());
        config.show_dotfiles = false;
        config.validate().unwrap();
        let hiding = DirectoryListing::new(Arc::new(config));

        let hidden = body_of(hiding.render(&request("/")).await.unwrap()).await;
        assert!(!hidden.contains(".git"));
        assert!(!hidden.contains(".env"));
        assert!(hidden.contains(">visible.txt</a>"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_stat_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = listing(tmp.path()).render(&request("/nope/")).await;
        assert!(matches!(result, Err(ListingError::Stat { .. })));
    }

    #[tokio::test]
    async fn test_file_is_read_error() {
        let tmp = tempfile::tempdir().unwrap();
        stdfs::write(tmp.path().join("file.txt"), "x").unwrap();

        let result = listing(tmp.path()).render(&request("/file.txt/")).await;
        assert!(matches!(result, Err(ListingError::ReadDir { .. })));
    }

    #[test]
    fn test_parent_stat_failure_aborts_listing() {
        let parent = Path::new("/srv/files");
        let failed = io::Error::new(io::ErrorKind::PermissionDenied, "denied");

        match parent_entry(parent, Err(failed)) {
            Err(ListingError::ParentStat { path, source }) => {
                assert_eq!(path, parent);
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected ParentStat, got {other:?}"),
        }
    }

    #[test]
    fn test_parent_entry_is_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let entry = parent_entry(tmp.path(), stdfs::metadata(tmp.path())).unwrap();
        assert_eq!(entry.name, "..");
        assert!(entry.is_dir());
    }

    #[tokio::test]
    async fn test_outside_base_path() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = ListingConfig::new(tmp.path());
        config.base_path = BasePath::new("/files").unwrap();
        config.validate().unwrap();

        let result = DirectoryListing::new(Arc::new(config))
            .render(&request("/other/"))
            .await;
        assert!(matches!(result, Err(ListingError::OutsideBase(_))));
    }

    #[tokio::test]
    async fn test_headers_follow_directory_not_children() {
        let tmp = tempfile::tempdir().unwrap();
        stdfs::create_dir(tmp.path().join("d")).unwrap();
        let expected = FileStat::from(&stdfs::metadata(tmp.path().join("d")).unwrap());

        let listing = listing(tmp.path());
        let first = listing.render(&request("/d/")).await.unwrap();
        assert_eq!(first.headers()[header::ETAG], format::etag(&expected, true));
        assert_eq!(
            first.headers()[header::LAST_MODIFIED],
            format::http_date(expected.modified)
        );
    }

    #[tokio::test]
    async fn test_rendering_twice_is_identical() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["2.txt", "10.txt", "1.txt", "pic.png"] {
            stdfs::write(tmp.path().join(name), "x").unwrap();
        }

        let listing = listing(tmp.path());
        let first = body_of(listing.render(&request("/")).await.unwrap()).await;
        let second = body_of(listing.render(&request("/")).await.unwrap()).await;
        assert_eq!(first, second);

        let one = first.find(">1.txt</a>").unwrap();
        let two = first.find(">2.txt</a>").unwrap();
        let ten = first.find(">10.txt</a>").unwrap();
        assert!(one < two && two < ten);
    }
}
