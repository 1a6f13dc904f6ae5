//! Network module with deferred startup lifecycle.
//!
//! Implements the deferred startup pattern: `new()` captures configuration
//! and preview state, `start()` binds the TCP listener, and `serve()` starts
//! accepting connections. Binding separately lets callers learn the
//! OS-assigned port before traffic flows.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::config::NetworkConfig;
use super::middleware::with_http_layers;
use crate::preview::{preview_router, PreviewState};

/// Manages the HTTP server lifecycle for the preview handler.
///
/// Follows the deferred startup pattern:
/// 1. `new()` -- stores configuration and the shared preview state
/// 2. `start()` -- binds TCP listener to the configured address
/// 3. `serve()` -- begins accepting connections until shutdown is signalled
pub struct NetworkModule {
    config: NetworkConfig,
    state: PreviewState,
    listener: Option<TcpListener>,
}

impl NetworkModule {
    /// Creates a new network module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, state: PreviewState) -> Self {
        Self {
            config,
            state,
            listener: None,
        }
    }

    /// Assembles the axum router with the preview handler and middleware.
    ///
    /// Every path is handed to the preview handler, which decides between
    /// the index, a framed preview, a raw part, and a 404.
    pub fn build_router(&self) -> Router {
        with_http_layers(preview_router(self.state.clone()), &self.config)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the configured
    /// port when port 0 is used (OS-assigned ephemeral port).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Starts serving connections until the shutdown signal fires.
    ///
    /// Consumes `self` because the listener is moved into the server.
    /// In-flight requests are allowed to finish after the signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the server encounters a fatal I/O error.
    ///
    /// # Panics
    ///
    /// Panics if `start()` was not called before `serve()`.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .take()
            .expect("start() must be called before serve()");

        info!(
            mount = %self.state.mount(),
            actions = self.state.action_count(),
            "Serving mail previews"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Preview server stopped");
        Ok(())
    }
}
