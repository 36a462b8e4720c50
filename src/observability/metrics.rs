//! Process-wide metrics.
//!
//! # Metrics
//! - `statuspage_exporter_build_info` (gauge): always 1, labelled with version
//! - `statuspage_exporter_probes_total` (counter): probes by outcome
//!
//! Per-probe status families never reach this recorder; they live in a
//! `ProbeRegistry` for the lifetime of one request.

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const BUILD_INFO: &str = "statuspage_exporter_build_info";
pub const PROBES_TOTAL: &str = "statuspage_exporter_probes_total";

/// Install the global recorder and publish build info.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_gauge!(BUILD_INFO, "Build information of the exporter");
    describe_counter!(PROBES_TOTAL, "Number of probes served, by outcome");
    gauge!(BUILD_INFO, "version" => env!("CARGO_PKG_VERSION")).set(1.0);

    tracing::debug!("Process metrics recorder installed");
    Ok(handle)
}

/// Count one probe. `outcome` is `success` or a `ProbeError::kind`.
pub fn record_probe(outcome: &'static str) {
    counter!(PROBES_TOTAL, "outcome" => outcome).increment(1);
}
