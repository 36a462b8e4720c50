//! Status Page Exporter Library
//!
//! Probes a public status page on every scrape and exposes its overall and
//! per-component health as Prometheus gauges scoped to that one request.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /probe?target=..    ┌──────────┐    ┌──────────────┐    ┌───────────┐
//!     ───────────────────────▶│   http   │───▶│    probe     │───▶│  client   │───▶ status page
//!                             │ handlers │    │    engine    │    │ + retries │
//!                             └────┬─────┘    └──────┬───────┘    └───────────┘
//!                                  │                 │ StatusDocument
//!                                  │                 ▼
//!     exposition text              │          ┌──────────────┐
//!     ◀────────────────────────────┴──────────│  projector → │
//!                                             │ ProbeRegistry│ (fresh per request)
//!                                             └──────────────┘
//! ```

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod resilience;
pub mod status;

pub use config::schema::ExporterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use probe::{ProbeEngine, ProbeError, ProbeRegistry};
pub use status::StatusCode;
