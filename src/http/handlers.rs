//! Route handlers.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio::time::Instant;

use crate::http::request::request_id;
use crate::http::response::exposition;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Header carrying the scraper's own timeout.
pub const SCRAPE_TIMEOUT_HEADER: &str = "x-prometheus-scrape-timeout-seconds";

#[derive(Debug, Default, Deserialize)]
pub struct ProbeParams {
    #[serde(default)]
    pub target: Option<String>,
}

/// `GET /probe?target=<url>`
pub async fn probe_handler(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers).to_string();
    let raw_target = params.target.unwrap_or_default();
    let deadline = scrape_budget(&headers, state.scrape_timeout_offset)
        .map(|budget| Instant::now() + budget);

    match state.engine.probe_until(&raw_target, deadline).await {
        Ok(registry) => {
            metrics::record_probe("success");
            exposition(registry.render())
        }
        Err(err) => {
            metrics::record_probe(err.kind());
            if err.status_code().is_client_error() {
                tracing::debug!(request_id = %request_id, target_url = %raw_target, error = %err, "Rejected probe request");
            } else {
                tracing::warn!(request_id = %request_id, target_url = %raw_target, error = %err, "Probe failed");
            }
            err.into_response()
        }
    }
}

/// `GET /healthz`
pub async fn healthz_handler() -> &'static str {
    "ok"
}

/// `GET /metrics`: process-wide metrics only.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let body = state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();
    exposition(body)
}

/// Time the probe may take, derived from the scraper's timeout header minus
/// `offset`. Falls back to the full advertised timeout when the offset would
/// consume all of it.
pub fn scrape_budget(headers: &HeaderMap, offset: Duration) -> Option<Duration> {
    let secs: f64 = headers
        .get(SCRAPE_TIMEOUT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    let advertised = Duration::try_from_secs_f64(secs).ok().filter(|d| !d.is_zero())?;

    match advertised.checked_sub(offset) {
        Some(budget) if !budget.is_zero() => Some(budget),
        _ => Some(advertised),
    }
}
