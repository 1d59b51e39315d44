//! Back-office error taxonomy.

use minimarket_api::ApiError;
use minimarket_core::Role;
use thiserror::Error;

/// Errors raised by back-office operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No session; the caller must sign in first.
    #[error("not signed in")]
    NotSignedIn,

    /// The signed-in role failed the screen's policy. Raised locally,
    /// without a request.
    #[error("{role} is not allowed to {action}")]
    Forbidden { role: Role, action: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Reading an upload or writing a download failed.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdminError {
    /// Whether the backend denied the request outright. When this is
    /// true the denial hook has already cleared the session.
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Api(ApiError::AuthDenied { .. }))
    }
}
