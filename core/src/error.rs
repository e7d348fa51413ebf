//! Error types for the todo API client.
//!
//! # Design
//! Every operation ends in one `ApiClientError` variant on failure. Only a
//! 404 on a by-id lookup gets its own variant; every other unexpected status
//! collapses into `UnknownError`, which keeps the raw code for callers that
//! need finer handling. Failures before any response was received are
//! `NetworkError` and carry the transport's own classification.

use thiserror::Error;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

/// Errors returned by `TodoApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// No HTTP response was obtained.
    #[error("network error: {0}")]
    NetworkError(#[from] TransportError),

    /// The server returned 404 for a by-id lookup.
    #[error("task not found: {}", .id.as_deref().unwrap_or("<unknown>"))]
    ItemNotFound { id: Option<String> },

    /// Any other status the operation does not accept.
    #[error("unexpected HTTP status {status}")]
    UnknownError { status: u16, body: String },

    /// The status was accepted but the body is not a valid task payload.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),

    /// The request payload could not be encoded as JSON.
    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

/// Failures raised by a `Transport` before a response is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer could not be reached (refused, reset, unknown host).
    #[error("connection error: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        use std::io::ErrorKind;

        match err {
            ureq::Error::Timeout(_) => TransportError::Timeout,
            ureq::Error::HostNotFound => TransportError::Connection(err.to_string()),
            ureq::Error::Io(io_err) => match io_err.kind() {
                ErrorKind::TimedOut => TransportError::Timeout,
                ErrorKind::ConnectionRefused
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::NotConnected => TransportError::Connection(io_err.to_string()),
                _ => TransportError::Io(io_err),
            },
            other => TransportError::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_not_found_display() {
        let err = ApiClientError::ItemNotFound {
            id: Some("1000".to_string()),
        };
        assert_eq!(err.to_string(), "task not found: 1000");

        let err = ApiClientError::ItemNotFound { id: None };
        assert_eq!(err.to_string(), "task not found: <unknown>");
    }

    #[test]
    fn unknown_error_display() {
        let err = ApiClientError::UnknownError {
            status: 418,
            body: "I'm a teapot".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected HTTP status 418");
    }

    #[test]
    fn transport_error_converts_to_network_error() {
        let err: ApiClientError = TransportError::Timeout.into();
        assert!(matches!(err, ApiClientError::NetworkError(TransportError::Timeout)));
        assert_eq!(err.to_string(), "network error: request timed out");
    }

    #[test]
    fn refused_io_error_is_a_connection_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: TransportError = ureq::Error::Io(io_err).into();
        assert!(matches!(err, TransportError::Connection(_)));
    }

    #[test]
    fn other_io_errors_are_kept() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: TransportError = ureq::Error::Io(io_err).into();
        assert!(matches!(err, TransportError::Io(_)));
    }
}
