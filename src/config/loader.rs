//! Configuration loading from disk and the command line.
//!
//! Precedence, highest first: command-line flag or environment variable,
//! config file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::schema::{ExporterConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// File name searched for in the working directory and the home directory.
pub const CONFIG_FILE_NAME: &str = ".statuspage-exporter.toml";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "IO error reading {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Command-line flags. Each override can also come from the environment.
#[derive(Debug, Default, Parser)]
#[command(name = "statuspage-exporter")]
#[command(about = "Prometheus exporter for public status pages", version)]
pub struct CliArgs {
    /// Path to a TOML config file.
    #[arg(short, long, env = "STATUSPAGE_EXPORTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port of the HTTP listener.
    #[arg(long, env = "HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Per-attempt timeout of status page fetches, in seconds.
    #[arg(long, env = "CLIENT_TIMEOUT_SECS")]
    pub client_timeout_secs: Option<f64>,

    /// Per-attempt timeout as a duration (`10s`, `1500ms`, `1m30s`). Ignored
    /// when `--client-timeout-secs` is given.
    #[arg(long, env = "CLIENT_TIMEOUT", value_parser = parse_duration_secs)]
    pub client_timeout: Option<f64>,

    /// Retries after a failed fetch attempt.
    #[arg(long, env = "RETRY_COUNT")]
    pub retry_count: Option<u32>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format (text or json).
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl CliArgs {
    /// Overlay explicitly given flags on a loaded configuration.
    pub fn apply(&self, config: &mut ExporterConfig) {
        if let Some(port) = self.http_port {
            config.http_port = port;
        }
        if let Some(timeout) = self.client_timeout_secs.or(self.client_timeout) {
            config.client.timeout_secs = timeout;
        }
        if let Some(retries) = self.retry_count {
            config.client.retry_count = retries;
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }
    }
}

/// Parse a duration such as `10s`, `250ms` or `1h2m3.5s` into seconds. A bare
/// number is taken as seconds.
pub fn parse_duration_secs(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<f64>() {
        return Ok(secs);
    }

    let mut rest = raw;
    let mut total = 0.0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration '{}'", raw))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        total += match unit {
            "ns" => value / 1e9,
            "us" | "µs" => value / 1e6,
            "ms" => value / 1e3,
            "s" => value,
            "m" => value * 60.0,
            "h" => value * 3600.0,
            _ => return Err(format!("invalid duration '{}': unknown unit '{}'", raw, unit)),
        };
        rest = tail;
    }

    if raw.is_empty() {
        return Err("empty duration".to_string());
    }
    Ok(total)
}

/// Parse a TOML file without validating it.
fn read_config(path: &Path) -> Result<ExporterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Locate the config file: an explicit path, else `./.statuspage-exporter.toml`,
/// else `$HOME/.statuspage-exporter.toml`.
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Build the effective configuration from the command line, optional file
/// and defaults. Returns the path of the file used, if any.
pub fn resolve_config(args: &CliArgs) -> Result<(ExporterConfig, Option<PathBuf>), ConfigError> {
    let path = find_config_file(args.config.as_deref());
    let mut config = match &path {
        Some(path) => read_config(path)?,
        None => ExporterConfig::default(),
    };

    args.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok((config, path))
}
