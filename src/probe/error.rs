//! Probe error taxonomy and its HTTP mapping.

use axum::http::StatusCode as HttpStatus;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::client::FetchError;
use crate::status::DecodeError;

/// Why a probe produced no metrics.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("target is required")]
    MissingTarget,

    #[error("failed to parse target url: {0}")]
    InvalidTarget(String),

    #[error("failed to fetch status for {target}: {source}")]
    FetchFailed {
        target: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to parse status for {target}: {source}")]
    ParseFailed {
        target: String,
        #[source]
        source: DecodeError,
    },
}

impl ProbeError {
    /// Split a client failure into a parse or a fetch failure.
    pub(crate) fn from_fetch(target: &str, err: FetchError) -> Self {
        match err {
            FetchError::Parse(source) => ProbeError::ParseFailed {
                target: target.to_string(),
                source,
            },
            source => ProbeError::FetchFailed {
                target: target.to_string(),
                source,
            },
        }
    }

    /// Caller-caused problems are 400, everything downstream is 500.
    pub fn status_code(&self) -> HttpStatus {
        match self {
            ProbeError::MissingTarget | ProbeError::InvalidTarget(_) => HttpStatus::BAD_REQUEST,
            ProbeError::FetchFailed { .. } | ProbeError::ParseFailed { .. } => {
                HttpStatus::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label for self-metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::MissingTarget => "missing_target",
            ProbeError::InvalidTarget(_) => "invalid_target",
            ProbeError::FetchFailed { .. } => "fetch_failed",
            ProbeError::ParseFailed { .. } => "parse_failed",
        }
    }
}

impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
