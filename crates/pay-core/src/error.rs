//! # Relay Error Types
//!
//! Typed error handling for the payment relay.
//! Every gateway call returns `Result<T, RelayError>`.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing env vars, unusable values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid client request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Credential or token request rejected by the gateway
    #[error("Access token request failed [{provider}]: HTTP {status}")]
    AuthFailure {
        provider: String,
        status: u16,
        body: String,
    },

    /// Network/HTTP error communicating with the gateway
    #[error("Upstream call failed [{provider}]: {message}")]
    UpstreamFailure { provider: String, message: String },

    /// Gateway answered with a body that is not JSON
    #[error("Invalid JSON response from {provider}: {message}")]
    ParseFailure {
        provider: String,
        message: String,
        raw: String,
    },
}

impl RelayError {
    pub fn upstream(provider: impl Into<String>, err: impl std::fmt::Display) -> Self {
        RelayError::UpstreamFailure {
            provider: provider.into(),
            message: err.to_string(),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::InvalidRequest(_) => 400,
            RelayError::Configuration(_)
            | RelayError::AuthFailure { .. }
            | RelayError::UpstreamFailure { .. }
            | RelayError::ParseFailure { .. } => 500,
        }
    }

    /// Stable tag used in error envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => "configuration",
            RelayError::InvalidRequest(_) => "invalid_request",
            RelayError::AuthFailure { .. } => "auth_failure",
            RelayError::UpstreamFailure { .. } => "upstream_failure",
            RelayError::ParseFailure { .. } => "parse_failure",
        }
    }

    /// Raw upstream text carried by the error, if any
    pub fn raw(&self) -> Option<&str> {
        match self {
            RelayError::AuthFailure { body, .. } => Some(body),
            RelayError::ParseFailure { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::InvalidRequest("bad".into()).status_code(), 400);
        assert_eq!(
            RelayError::AuthFailure {
                provider: "mpesa".into(),
                status: 401,
                body: "denied".into(),
            }
            .status_code(),
            500
        );
        assert_eq!(RelayError::upstream("paystack", "reset").status_code(), 500);
    }

    #[test]
    fn test_kind_and_raw() {
        let err = RelayError::ParseFailure {
            provider: "mpesa".into(),
            message: "expected value".into(),
            raw: "<html>busy</html>".into(),
        };
        assert_eq!(err.kind(), "parse_failure");
        assert_eq!(err.raw(), Some("<html>busy</html>"));

        let err = RelayError::upstream("mpesa", "connection refused");
        assert_eq!(err.kind(), "upstream_failure");
        assert!(err.raw().is_none());
        assert_eq!(
            err.to_string(),
            "Upstream call failed [mpesa]: connection refused"
        );
    }

    #[test]
    fn test_auth_failure_display() {
        let err = RelayError::AuthFailure {
            provider: "mpesa".into(),
            status: 400,
            body: "{}".into(),
        };
        assert_eq!(
            err.to_string(),
            "Access token request failed [mpesa]: HTTP 400"
        );
    }
}
