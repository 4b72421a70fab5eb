//! HTTP server for the passdrop daemon API

use crate::config::HttpConfig;
use crate::{DaemonError, Result};

use axum::Router;
use passdrop_http::AppState;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use utoipa_scalar::{Scalar, Servable};

/// HTTP server for the passdrop daemon
pub struct HttpServer {
    config: HttpConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server around the given API state
    pub fn new(config: HttpConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until the task is dropped
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails
    pub async fn start(&self) -> Result<()> {
        let app = self.create_app();

        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(|e| {
                DaemonError::Http(format!("Failed to bind to {}: {e}", self.config.bind_addr))
            })?;

        info!("HTTP server listening on {}", self.config.bind_addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| DaemonError::Http(format!("HTTP server error: {e}")))?;

        Ok(())
    }

    /// Create the Axum application with routes and middleware
    fn create_app(&self) -> Router {
        let (router, api) = passdrop_http::routes::router().split_for_parts();
        let mut app = router
            .with_state(self.state.clone())
            .merge(Scalar::with_url("/docs", api));

        let service_builder = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                self.config.timeout_secs,
            )));
        app = app.layer(service_builder);

        if self.config.cors_enabled {
            app = app.layer(CorsLayer::permissive());
        }

        app
    }
}
