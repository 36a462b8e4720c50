//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::client::FetchError;
use crate::config::ExporterConfig;
use crate::http::handlers::{healthz_handler, metrics_handler, probe_handler};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::probe::ProbeEngine;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ProbeEngine>,
    pub scrape_timeout_offset: Duration,
    pub metrics: Option<PrometheusHandle>,
}

/// HTTP server for the exporter.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server. `metrics` is the process-wide recorder
    /// handle served on `/metrics`, if one is installed.
    pub fn new(config: ExporterConfig, metrics: Option<PrometheusHandle>) -> Result<Self, FetchError> {
        let engine = Arc::new(ProbeEngine::new(&config)?);

        let state = AppState {
            engine,
            scrape_timeout_offset: Duration::from_millis(config.server.scrape_timeout_offset_ms),
            metrics,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ExporterConfig, state: AppState) -> Router {
        Router::new()
            .route("/probe", get(probe_handler))
            .route("/healthz", get(healthz_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then stop accepting and drain
    /// in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
