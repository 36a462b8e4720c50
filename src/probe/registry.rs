//! Request-scoped metric registry.
//!
//! Every probe gets its own `PrometheusRecorder`. The recorder is never
//! installed as the global recorder: writes go through
//! [`metrics::with_local_recorder`], so two probes running at the same time
//! cannot see each other's series and nothing outlives the response.

use std::fmt;
use std::time::Duration;

use metrics::{describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusRecorder};

use crate::probe::projector::StatusSink;
use crate::status::StatusCode;

/// `statuspage_component{service, status_page_url, component}`
pub const COMPONENT_STATUS: &str = "statuspage_component";
/// `statuspage_overall{service, status_page_url}`
pub const OVERALL_STATUS: &str = "statuspage_overall";
/// `service_status_fetch_duration_seconds{status_page_url}`
pub const FETCH_DURATION: &str = "service_status_fetch_duration_seconds";

/// The three metric families of one probe.
pub struct ProbeRegistry {
    recorder: PrometheusRecorder,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        metrics::with_local_recorder(&recorder, || {
            describe_gauge!(
                COMPONENT_STATUS,
                format!("Status of a service component: {}", StatusCode::HELP)
            );
            describe_gauge!(
                OVERALL_STATUS,
                format!("Overall status of a service: {}", StatusCode::HELP)
            );
            describe_gauge!(
                FETCH_DURATION,
                "Returns how long the service status fetch took to complete in seconds"
            );
        });
        Self { recorder }
    }

    /// Record the time spent fetching, retries included.
    pub fn record_fetch_duration(&mut self, status_page_url: &str, elapsed: Duration) {
        metrics::with_local_recorder(&self.recorder, || {
            gauge!(FETCH_DURATION, "status_page_url" => status_page_url.to_string())
                .set(elapsed.as_secs_f64());
        });
    }

    /// Serialize in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.recorder.handle().render()
    }
}

impl Default for ProbeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeRegistry").finish_non_exhaustive()
    }
}

impl StatusSink for ProbeRegistry {
    fn overall(&mut self, service: &str, status_page_url: &str, status: StatusCode) {
        metrics::with_local_recorder(&self.recorder, || {
            gauge!(
                OVERALL_STATUS,
                "service" => service.to_string(),
                "status_page_url" => status_page_url.to_string()
            )
            .set(f64::from(status.code()));
        });
    }

    fn component(
        &mut self,
        service: &str,
        status_page_url: &str,
        component: &str,
        status: StatusCode,
    ) {
        metrics::with_local_recorder(&self.recorder, || {
            gauge!(
                COMPONENT_STATUS,
                "service" => service.to_string(),
                "status_page_url" => status_page_url.to_string(),
                "component" => component.to_string()
            )
            .set(f64::from(status.code()));
        });
    }
}
