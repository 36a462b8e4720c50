//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the exporter.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default port of the exporter's HTTP listener.
pub const DEFAULT_HTTP_PORT: u16 = 9747;

/// Root configuration for the exporter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ExporterConfig {
    /// Port the HTTP server listens on.
    pub http_port: u16,

    /// Interface the HTTP server binds to.
    pub bind_address: String,

    /// Outbound status page client settings.
    pub client: ClientConfig,

    /// Inbound server settings.
    pub server: ServerConfig,

    /// Logging settings.
    pub log: LogConfig,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            bind_address: "0.0.0.0".to_string(),
            client: ClientConfig::default(),
            server: ServerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ExporterConfig {
    /// `host:port` the listener binds to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.http_port)
    }
}

/// Status page client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Timeout of a single fetch attempt in seconds.
    pub timeout_secs: f64,

    /// Additional attempts after the first one on transient failure.
    pub retry_count: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub backoff_base_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub backoff_max_ms: u64,

    /// Path appended to targets that name only a host.
    pub summary_path: String,

    /// User-Agent sent to status pages.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10.0,
            retry_count: 3,
            backoff_base_ms: 100,
            backoff_max_ms: 2000,
            summary_path: "/api/v2/summary.json".to_string(),
            user_agent: concat!("statuspage-exporter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Per-attempt timeout. Values a `Duration` cannot hold collapse to zero;
    /// validation rejects them.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::ZERO)
    }
}

/// Inbound HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Hard limit on handling one request, in seconds.
    pub request_timeout_secs: u64,

    /// Safety margin subtracted from the scraper's advertised timeout, in
    /// milliseconds.
    pub scrape_timeout_offset_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 120,
            scrape_timeout_offset_ms: 500,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected text or json)", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExporterConfig::default();
        assert_eq!(config.http_port, 9747);
        assert_eq!(config.client.timeout(), Duration::from_secs(10));
        assert_eq!(config.client.retry_count, 3);
        assert_eq!(config.listen_address(), "0.0.0.0:9747");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ExporterConfig = toml::from_str(
            r#"
            http_port = 9000

            [client]
            timeout_secs = 2.5

            [log]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.http_port, 9000);
        assert_eq!(config.client.timeout(), Duration::from_millis(2500));
        assert_eq!(config.client.retry_count, 3);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_invalid_timeout_collapses_to_zero() {
        let client = ClientConfig {
            timeout_secs: -1.0,
            ..ClientConfig::default()
        };
        assert_eq!(client.timeout(), Duration::ZERO);
    }
}
