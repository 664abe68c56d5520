//! HTTP Server
//!
//! Binds the listen address and serves the admin router until shutdown.

use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{self, ServerState};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::store::Store;

/// HTTP server for BucketView
pub struct Server {
    config: Config,
    state: Arc<ServerState>,
}

impl Server {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: Arc<Store>) -> Self {
        Self {
            config,
            state: Arc::new(ServerState::new(store)),
        }
    }

    /// The API routes plus the static asset fallback
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.state), &self.config.static_dir)
    }

    /// Serve until `/exit` is called or Ctrl+C is received
    pub async fn run(&self) -> Result<()> {
        let addr: SocketAddr = self.config.listen_addr.parse().map_err(|e| {
            StoreError::Config(format!("invalid listen address {}: {}", self.config.listen_addr, e))
        })?;

        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;
        let builder = axum::Server::from_tcp(listener)
            .map_err(|e| StoreError::Network(format!("failed to serve on {}: {}", local_addr, e)))?;

        tracing::info!("Listening on http://{}", local_addr);
        tracing::info!("Serving static files from {}", self.config.static_dir.display());

        let shutdown = Arc::clone(&self.state.shutdown);
        builder
            .serve(self.router().into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.notified() => {}
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Received Ctrl+C, initiating shutdown...");
                    }
                }
            })
            .await
            .map_err(|e| StoreError::Network(e.to_string()))
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.state.shutdown.notify_one();
    }
}

/// Build the admin router over `state`
pub fn router(state: Arc<ServerState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/getBuckets", get(handlers::get_buckets))
        .route("/getEntries", get(handlers::get_entries))
        .route("/setBucket", get(handlers::set_bucket).post(handlers::set_bucket))
        .route("/delBucket", get(handlers::del_bucket).post(handlers::del_bucket))
        .route("/setEntry", get(handlers::set_entry).post(handlers::set_entry))
        .route("/delEntry", get(handlers::del_entry).post(handlers::del_entry))
        .route("/exit", get(handlers::exit).post(handlers::exit))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
