//! Error types and handling for the `meteogate` service

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the `meteogate` service
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream replied with a non-success status
    #[error("Upstream forecast API returned status {status}")]
    UpstreamStatus { status: u16 },

    /// Outbound call exceeded the configured timeout
    #[error("Upstream forecast API timed out")]
    UpstreamTimeout,

    /// Connect or transport failure reaching the upstream
    #[error("Upstream forecast API unreachable: {message}")]
    UpstreamUnreachable { message: String },

    /// Upstream body could not be parsed as JSON
    #[error("Upstream forecast API returned an invalid body: {message}")]
    UpstreamBody { message: String },
}

/// Machine-readable error body returned to callers
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl GatewayError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short stable identifier for the error kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Config { .. } => "config",
            GatewayError::UpstreamStatus { .. } => "upstream_status",
            GatewayError::UpstreamTimeout => "upstream_timeout",
            GatewayError::UpstreamUnreachable { .. } => "upstream_unreachable",
            GatewayError::UpstreamBody { .. } => "upstream_body",
        }
    }

    /// HTTP status surfaced to the caller for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::UpstreamStatus { .. }
            | GatewayError::UpstreamUnreachable { .. }
            | GatewayError::UpstreamBody { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::UpstreamTimeout
        } else if err.is_decode() {
            Self::UpstreamBody {
                message: err.to_string(),
            }
        } else {
            Self::UpstreamUnreachable {
                message: err.to_string(),
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
