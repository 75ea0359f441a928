pub mod error_page;
pub mod router;
pub mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ListingConfig;
pub use error_page::{ErrorResponder, StatusPage};
pub use router::{AppState, create_router};

pub struct Server {
    state: Arc<AppState>,
    bind: SocketAddr,
}

impl Server {
    pub fn new(config: ListingConfig, bind: SocketAddr) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
            bind,
        }
    }

    pub async fn run(self) -> Result<()> {
        let config = self.state.listing.config();
        info!(
            root = %config.root.display(),
            base_path = %config.base_path,
            error_policy = %config.error_policy,
            "Serving directory"
        );

        let listener = TcpListener::bind(self.bind).await.context(format!(
            "Failed to bind to {}. Is another service using it?",
            self.bind
        ))?;

        info!("HTTP server listening on {}", self.bind);
        println!("Serving {} on http://{}", config.root.display(), self.bind);

        let router = create_router(self.state.clone());
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("Server stopped");
        Ok(())
    }
}

/// Run the server until Ctrl+C.
#[tokio::main]
pub async fn run(config: ListingConfig, bind: SocketAddr) -> Result<()> {
    Server::new(config, bind).run().await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
