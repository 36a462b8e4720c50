//! Probe engine: resolve → fetch (with retry) → project → registry.

use tokio::time::Instant;
use url::Url;

use crate::client::{FetchError, StatusPageClient};
use crate::config::ExporterConfig;
use crate::probe::error::ProbeError;
use crate::probe::projector::project;
use crate::probe::registry::ProbeRegistry;
use crate::probe::target::{resolve, summary_url};

/// Runs probes. Holds only read-only configuration and the shared HTTP
/// client, so one engine serves any number of concurrent probes.
#[derive(Debug, Clone)]
pub struct ProbeEngine {
    client: StatusPageClient,
    summary_path: String,
}

impl ProbeEngine {
    pub fn new(config: &ExporterConfig) -> Result<Self, FetchError> {
        let client = StatusPageClient::new(&config.client)?;
        Ok(Self::with_client(client, config.client.summary_path.clone()))
    }

    pub fn with_client(client: StatusPageClient, summary_path: impl Into<String>) -> Self {
        Self {
            client,
            summary_path: summary_path.into(),
        }
    }

    /// Probe `raw_target` with no deadline beyond the configured retry budget.
    pub async fn probe(&self, raw_target: &str) -> Result<ProbeRegistry, ProbeError> {
        self.probe_until(raw_target, None).await
    }

    /// Probe `raw_target`, giving up once `deadline` passes.
    ///
    /// Either every family is populated or an error is returned; a partially
    /// filled registry never escapes.
    pub async fn probe_until(
        &self,
        raw_target: &str,
        deadline: Option<Instant>,
    ) -> Result<ProbeRegistry, ProbeError> {
        let target = resolve(raw_target)?;
        let status_page_url = target.to_string();
        let fetch_url = summary_url(&target, &self.summary_path);

        let mut registry = ProbeRegistry::new();

        let start = Instant::now();
        let doc = self
            .client
            .fetch(&fetch_url, deadline)
            .await
            .map_err(|e| ProbeError::from_fetch(&status_page_url, e))?;

        let service = doc
            .service
            .clone()
            .unwrap_or_else(|| service_from_url(&target));
        let overall = project(&doc, &service, &status_page_url, &mut registry);

        let elapsed = start.elapsed();
        registry.record_fetch_duration(&status_page_url, elapsed);

        tracing::debug!(
            target_url = %status_page_url,
            service = %service,
            overall = %overall,
            components = doc.components.len(),
            elapsed = ?elapsed,
            "Probe complete"
        );

        Ok(registry)
    }
}

/// Service label used when the page does not name itself.
fn service_from_url(url: &Url) -> String {
    url.host_str()
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string())
}
