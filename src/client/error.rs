//! Error types raised while talking to the quiz backend.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`ClientError`] failures.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures that can occur while calling the quiz HTTP API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        /// Underlying `reqwest` failure.
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or no response arrived.
    #[error("failed to send request to `{path}`")]
    RequestSend {
        /// Endpoint path relative to the base URL.
        path: &'static str,
        /// Underlying `reqwest` failure.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    #[error("{message}")]
    RequestStatus {
        /// Endpoint path relative to the base URL.
        path: &'static str,
        /// Status returned by the backend.
        status: StatusCode,
        /// `message` field of the error body, or the status reason.
        message: String,
    },
    /// The response body was not the expected JSON.
    #[error("failed to decode response from `{path}`")]
    DecodeResponse {
        /// Endpoint path relative to the base URL.
        path: &'static str,
        /// Underlying `reqwest` failure.
        #[source]
        source: reqwest::Error,
    },
    /// The payload decoded but breaks a domain rule.
    #[error("invalid payload from `{path}`: {message}")]
    InvalidPayload {
        /// Endpoint path relative to the base URL.
        path: &'static str,
        /// Broken rule.
        message: String,
    },
}
