//! HTTP client for the minimarket backend.
//!
//! Uses `reqwest` 0.13. Every request flows through one dispatch path that
//! attaches the bearer token, maps HTTP statuses onto [`ApiError`], and
//! notifies the registered [`DenialHook`] on 401/403.

use std::sync::{Arc, Weak};

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiError, DenialHook};

/// How much of an error body to keep for logs and error messages.
const BODY_SNIPPET_LEN: usize = 500;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the minimarket REST API.
///
/// Cheap to clone; all clones share the same HTTP connection pool, bearer
/// token slot, and denial hook.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    /// In-memory token slot; the session store persists the token itself.
    bearer: RwLock<Option<SecretString>>,
    denial_hook: RwLock<Option<Weak<dyn DenialHook>>>,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                bearer: RwLock::new(None),
                denial_hook: RwLock::new(None),
            }),
        }
    }

    // =========================================================================
    // Token and hook management
    // =========================================================================

    /// Install the bearer token attached to subsequent requests.
    pub async fn set_bearer_token(&self, token: SecretString) {
        *self.inner.bearer.write().await = Some(token);
    }

    /// Remove the bearer token; subsequent requests go out unauthenticated.
    pub async fn clear_bearer_token(&self) {
        *self.inner.bearer.write().await = None;
    }

    /// Check whether a bearer token is currently installed.
    pub async fn has_bearer_token(&self) -> bool {
        self.inner.bearer.read().await.is_some()
    }

    /// Register the single denial hook.
    ///
    /// Held weakly so the hook owner (the session store, which itself owns
    /// this client) does not form a reference cycle.
    pub async fn set_denial_hook(&self, hook: Weak<dyn DenialHook>) {
        *self.inner.denial_hook.write().await = Some(hook);
    }

    async fn notify_denied(&self, status: u16) {
        let hook = self
            .inner
            .denial_hook
            .read()
            .await
            .as_ref()
            .and_then(Weak::upgrade);
        if let Some(hook) = hook {
            hook.on_denied(status);
        }
    }

    // =========================================================================
    // Request construction
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::Validation(format!("invalid request path {path:?}: {e}")))
    }

    /// Build a request carrying the bearer token when one is installed.
    /// Returns the builder and whether the request is authorized, which
    /// decides if a later denial fires the hook.
    async fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(reqwest::RequestBuilder, bool), ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.inner.client.request(method, url);
        let bearer = self.inner.bearer.read().await;
        match bearer.as_ref() {
            Some(token) => Ok((builder.bearer_auth(token.expose_secret()), true)),
            None => Ok((builder, false)),
        }
    }

    /// Build a request that never carries the bearer token. Used by the
    /// auth endpoints so a failed re-login cannot trip denial handling.
    fn request_public(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        Ok(self.inner.client.request(method, url))
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Send a request and map non-success statuses onto [`ApiError`].
    ///
    /// This is the single interceptor: a 401/403 on an authorized request
    /// drops the now-useless bearer token and notifies the denial hook
    /// before the error is returned.
    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
        authorized: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if authorized {
                self.clear_bearer_token().await;
                self.notify_denied(status.as_u16()).await;
                return Err(ApiError::AuthDenied {
                    status: status.as_u16(),
                });
            }
            // A 401/403 on a tokenless request is bad credentials, not a
            // dead session; it takes the validation mapping below.
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        if status == StatusCode::CONFLICT {
            let body = response.text().await?;
            return Err(ApiError::StockConflict(extract_message(&body)));
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!(
                status = %status,
                path = %path,
                body = %snippet(&body),
                "API returned non-success status"
            );
            if status.is_client_error() {
                return Err(ApiError::Validation(extract_message(&body)));
            }
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        Ok(response)
    }

    async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %snippet(&text),
                    "Failed to parse API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Typed helpers used by the resource modules
    // =========================================================================

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (request, authorized) = self.request(Method::GET, path).await?;
        let response = self.dispatch(request, path, authorized).await?;
        Self::parse_body(response).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let (request, authorized) = self.request(Method::GET, path).await?;
        let response = self.dispatch(request, path, authorized).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (request, authorized) = self.request(Method::POST, path).await?;
        let response = self.dispatch(request.json(body), path, authorized).await?;
        Self::parse_body(response).await
    }

    /// POST whose response body the caller does not consume; callers
    /// refetch the listing instead.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let (request, authorized) = self.request(Method::POST, path).await?;
        self.dispatch(request.json(body), path, authorized).await?;
        Ok(())
    }

    /// POST without the bearer token (login, register).
    pub(crate) async fn post_public_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request_public(Method::POST, path)?;
        let response = self.dispatch(request.json(body), path, false).await?;
        Self::parse_body(response).await
    }

    pub(crate) async fn post_multipart_text(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<String, ApiError> {
        let (request, authorized) = self.request(Method::POST, path).await?;
        let response = self
            .dispatch(request.multipart(form), path, authorized)
            .await?;
        Ok(response.text().await?.trim().to_string())
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (request, authorized) = self.request(Method::PUT, path).await?;
        let response = self.dispatch(request.json(body), path, authorized).await?;
        Self::parse_body(response).await
    }

    pub(crate) async fn put_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let (request, authorized) = self.request(Method::PUT, path).await?;
        self.dispatch(request.json(body), path, authorized).await?;
        Ok(())
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let (request, authorized) = self.request(Method::DELETE, path).await?;
        self.dispatch(request, path, authorized).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let has_bearer = self
            .inner
            .bearer
            .try_read()
            .map(|guard| guard.is_some())
            .unwrap_or(false);
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("has_bearer_token", &has_bearer)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

/// Pull a human-readable message out of an error body. The backend answers
/// with `{"message": "..."}` or `{"error": "..."}`; anything else is used
/// verbatim.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "(no error details provided)".to_string()
    } else {
        snippet(trimmed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_message_key() {
        assert_eq!(
            extract_message(r#"{"message": "nombre duplicado"}"#),
            "nombre duplicado"
        );
    }

    #[test]
    fn test_extract_message_from_error_key() {
        assert_eq!(extract_message(r#"{"error": "sin stock"}"#), "sin stock");
    }

    #[test]
    fn test_extract_message_plain_body() {
        assert_eq!(extract_message("algo salió mal"), "algo salió mal");
    }

    #[test]
    fn test_extract_message_empty_body() {
        assert_eq!(extract_message(""), "(no error details provided)");
    }

    #[tokio::test]
    async fn test_client_tracks_bearer_token() {
        let config = ApiConfig::from_base_url("http://localhost:8080/api").unwrap();
        let client = ApiClient::new(&config);
        assert!(!client.has_bearer_token().await);
        client.set_bearer_token(SecretString::from("token-123")).await;
        assert!(client.has_bearer_token().await);
        client.clear_bearer_token().await;
        assert!(!client.has_bearer_token().await);
    }

    #[tokio::test]
    async fn test_debug_does_not_leak_token() {
        let config = ApiConfig::from_base_url("http://localhost:8080/api").unwrap();
        let client = ApiClient::new(&config);
        client
            .set_bearer_token(SecretString::from("super-secret-token"))
            .await;
        let debug_output = format!("{client:?}");
        assert!(!debug_output.contains("super-secret-token"));
        assert!(debug_output.contains("has_bearer_token"));
    }
}
