//! Error taxonomy for backend API calls.

use thiserror::Error;

/// Errors that can occur when calling the minimarket backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing of a response body failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend denied an authorized request (expired token or
    /// insufficient role). By the time a caller sees this, the denial
    /// hook has already fired.
    #[error("Authorization denied (HTTP {status})")]
    AuthDenied {
        /// The HTTP status the backend answered with (401 or 403).
        status: u16,
    },

    /// The backend rejected the request as invalid (e.g., duplicate name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An order was rejected because requested stock is no longer
    /// available. Kept separate from [`ApiError::Validation`] so checkout
    /// can tell "sold out under you" apart from other rejections.
    #[error("Stock conflict: {0}")]
    StockConflict(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The backend answered with a status this client has no mapping for.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: u16,
        /// Truncated response body for diagnostics.
        body: String,
    },
}

impl ApiError {
    /// Whether this error is an authorization denial.
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::AuthDenied { .. })
    }
}

/// Hook invoked from the client's dispatch path whenever an authorized
/// request comes back 401 or 403.
///
/// The session store registers itself here so that denial handling happens
/// in exactly one place: the hook invalidates the session, and the typed
/// [`ApiError::AuthDenied`] still propagates to the caller.
pub trait DenialHook: Send + Sync {
    /// Called before the denial error is returned to the caller.
    fn on_denied(&self, status: u16);
}
