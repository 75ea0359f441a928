use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::Response,
    routing::any,
};
use tokio::fs;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use super::error_page::{ErrorResponder, StatusPage, not_found_page};
use super::static_files::{redirect_to, serve_next};
use crate::config::ListingConfig;
use crate::domain::ErrorPolicy;
use crate::listing::{DirectoryListing, ListingRequest};

/// Shared state for the router
pub struct AppState {
    pub listing: DirectoryListing,
    pub errors: Arc<dyn ErrorResponder>,
}

impl AppState {
    pub fn new(config: ListingConfig) -> Self {
        Self {
            listing: DirectoryListing::new(Arc::new(config)),
            errors: Arc::new(StatusPage),
        }
    }

    pub fn with_error_responder(mut self, errors: Arc<dyn ErrorResponder>) -> Self {
        self.errors = errors;
        self
    }
}

/// Create the main router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/{*path}", any(handle_request))
        .route("/", any(handle_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle all incoming requests
async fn handle_request(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let config = state.listing.config();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if !config.base_path.matches(&path) {
        info!(path = %path, base = %config.base_path, "Path outside base path");
        return not_found_page(&path);
    }

    let is_read = method == Method::GET || method == Method::HEAD;

    // A mount point should be addressed as a directory.
    if is_read && !config.base_path.is_root() && path == config.base_path.as_str() {
        let location = match request.uri().query() {
            Some(query) => format!("{path}/?{query}"),
            None => format!("{path}/"),
        };
        return redirect_to(&location);
    }

    if !is_read || !path.ends_with('/') || has_index_page(&state.listing, &path).await {
        debug!(method = %method, path = %path, "Passing request to file handler");
        return serve_next(config, request).await;
    }

    let (parts, body) = request.into_parts();
    let result = state
        .listing
        .render(&ListingRequest::from_parts(&parts.uri, &parts.headers))
        .await;

    let error = match result {
        Ok(response) => {
            info!(path = %path, status = response.status().as_u16(), "Listing served");
            return response;
        }
        Err(error) => error,
    };

    warn!(
        path = %path,
        error = %error,
        policy = %config.error_policy,
        "Directory listing failed"
    );

    match config.error_policy {
        ErrorPolicy::Respond => state
            .errors
            .respond(StatusCode::INTERNAL_SERVER_ERROR, &error),
        ErrorPolicy::Delegate => serve_next(config, Request::from_parts(parts, body)).await,
    }
}

/// Whether the directory behind `path` should be served by its `index.html`
/// instead of being listed.
async fn has_index_page(listing: &DirectoryListing, path: &str) -> bool {
    if !listing.config().auto_index {
        return false;
    }
    let Some(dir) = listing.resolve(path) else {
        return false;
    };

    fs::metadata(dir.join("index.html"))
        .await
        .is_ok_and(|m| m.is_file())
}
