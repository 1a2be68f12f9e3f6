//! Error types for the frontend crate.

use std::time::Duration;

/// Failures talking to the backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UpstreamError {
    /// The configured backend URL cannot be used.
    #[error("invalid backend URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// TCP connection to the backend failed.
    #[error("connect to {addr}: {reason}")]
    Connect { addr: String, reason: String },

    /// The HTTP exchange failed after connecting.
    #[error("HTTP exchange failed: {0}")]
    Http(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx with a body that is not JSON.
    #[error("backend response is not JSON: {0}")]
    Decode(String),

    /// No complete response within the deadline.
    #[error("backend did not respond within {0:?}")]
    Timeout(Duration),
}
