//! Error types for API calls.
//!
//! Provides structured error classification, retry eligibility, and the
//! mapping from HTTP status to the short messages shown to the user.

use std::time::Duration;
use thiserror::Error;

/// Fallback shown for timeouts and transport failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection";

/// Errors that can occur while talking to the mock API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("API Error {status}: {reason}. {body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
        endpoint: String,
    },

    /// A single attempt exceeded the per-request timeout
    #[error("Request to '{endpoint}' timed out after {}ms", .timeout.as_millis())]
    Timeout { endpoint: String, timeout: Duration },

    /// Connection or transfer failure
    #[error("Network error on '{endpoint}': {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response without a usable JSON body
    #[error("Invalid JSON response from '{endpoint}': {reason}")]
    InvalidJson { endpoint: String, reason: String },

    /// Caller-side guard failed before any request was sent
    #[error("{0}")]
    InvalidArgument(String),

    /// Base URL and endpoint did not form a valid URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client itself could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// Only transport-level failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Timeout { .. } | ApiError::Network { .. })
    }

    /// HTTP status, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Endpoint (path and query) the failing request targeted.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Http { endpoint, .. }
            | ApiError::Timeout { endpoint, .. }
            | ApiError::Network { endpoint, .. }
            | ApiError::InvalidJson { endpoint, .. } => Some(endpoint),
            ApiError::InvalidUrl { url, .. } => Some(url),
            ApiError::InvalidArgument(_) | ApiError::Client(_) => None,
        }
    }

    /// Short message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status, .. } => status_message(*status)
                .map(str::to_string)
                .unwrap_or_else(|| self.to_string()),
            ApiError::Timeout { .. } | ApiError::Network { .. } | ApiError::Client(_) => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Status buckets with a dedicated user-facing message.
pub fn status_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Invalid request data"),
        401 => Some("Authentication required"),
        403 => Some("Access denied"),
        404 => Some("Resource not found"),
        429 => Some("Too many requests. Please try again later"),
        500 => Some("Server error. Please try again later"),
        _ => None,
    }
}
