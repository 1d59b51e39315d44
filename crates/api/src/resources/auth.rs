//! Authentication operations.
//!
//! Login and register go out without a bearer token. A 401 from them means
//! bad credentials rather than an expired session, so they never trip the
//! denial hook.

use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

impl ApiClient {
    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] with the backend's message on bad
    /// credentials, or another variant if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_public_json("auth/login", &body).await
    }

    /// Create a customer account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// submitted data.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_public_json("auth/register", request).await
    }
}
