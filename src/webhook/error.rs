//! Error types for payload building, HTTP transport, and delivery.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level without dictating
/// recovery strategy. The delivery engine never retries these.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// proxy failures, and errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header value could not be encoded.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// The underlying HTTP client could not be constructed
    /// (for example, an unusable proxy URL).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for building a multipart request body.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The attachment could not be opened or read.
    #[error("Failed to read attachment '{}': {source}", path.display())]
    FileAccess {
        /// Path of the attachment
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The message payload could not be encoded as JSON.
    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type for a complete send operation.
///
/// Rate limiting (HTTP 429) is handled inside the delivery loop and only
/// surfaces as [`WebhookError::RateLimitExhausted`] when a retry cap is
/// configured.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request body could not be built.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The request could not be delivered at the transport level.
    #[error("Failed to send request: {0}")]
    Transport(#[from] HttpError),

    /// The server answered with a status that is neither success nor 429.
    #[error("Webhook failed with status: {status}{}", format_body(.body))]
    Status {
        /// HTTP status code
        status: http::StatusCode,
        /// Response body (if valid UTF-8 and non-empty)
        body: Option<String>,
    },

    /// The send was cancelled before it completed.
    #[error("Send cancelled")]
    Cancelled,

    /// The server kept rate limiting past the configured retry cap.
    #[error("Still rate limited after {attempts} attempts")]
    RateLimitExhausted {
        /// Number of attempts made (initial attempt plus retries)
        attempts: u32,
    },
}

impl WebhookError {
    /// Returns the HTTP status for [`WebhookError::Status`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_body(body: &Option<String>) -> String {
    body.as_deref()
        .filter(|b| !b.is_empty())
        .map(|b| format!(" ({b})"))
        .unwrap_or_default()
}
