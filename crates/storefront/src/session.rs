//! Session lifecycle: login, registration, restore, and forced logout.
//!
//! The session document (account plus bearer token) is persisted locally
//! and replayed on startup without revalidation; the first authorized
//! request decides whether the token is still good. The store registers
//! itself as the client's denial hook, so a 401/403 on any authorized
//! request tears the session down in one place.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use minimarket_api::models::{
    AuthResponse, CUSTOMER_ROLE_ID, ProfileUpdate, RegisterRequest, User,
};
use minimarket_api::{ApiClient, ApiError, DenialHook};
use minimarket_core::{Email, EmailError, Role};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{Storage, StorageError};

const SESSION_KEY: &str = "session";

/// Avatar filename assigned when registration does not upload one.
const DEFAULT_AVATAR: &str = "default.png";

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Registration password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The email address is structurally invalid. Raised before any
    /// request goes out.
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A signed-in account plus its bearer token, as persisted locally.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Registration form input. Self-registration always creates a customer
/// account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Profile edit form input. The signed-in user's id and role are filled
/// in from the current session.
#[derive(Debug, Clone)]
pub struct ProfileEdit {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
    pub phone: String,
    pub password: String,
    pub image: Option<String>,
}

struct SessionStoreInner {
    client: ApiClient,
    storage: Storage,
    session: RwLock<Option<Session>>,
}

impl DenialHook for SessionStoreInner {
    fn on_denied(&self, status: u16) {
        // The client has already dropped the bearer token by the time the
        // hook fires; only local session state is left to clean up.
        let had_session = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
        if had_session {
            tracing::warn!(status, "Session invalidated by backend denial");
        }
    }
}

/// Shared session store.
///
/// Cheap to clone; all clones observe the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create the session store, register it as `client`'s denial hook,
    /// and replay any persisted session into the client.
    pub async fn new(client: ApiClient, storage: Storage) -> Self {
        let inner = Arc::new(SessionStoreInner {
            client,
            storage,
            session: RwLock::new(None),
        });
        let hook: Weak<SessionStoreInner> = Arc::downgrade(&inner);
        inner.client.set_denial_hook(hook).await;

        let store = Self { inner };
        store.restore().await;
        store
    }

    async fn restore(&self) {
        let persisted = match self.inner.storage.load::<Session>(SESSION_KEY) {
            Ok(Some(session)) => session,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to restore persisted session");
                return;
            }
        };
        self.inner
            .client
            .set_bearer_token(SecretString::from(persisted.token.clone()))
            .await;
        tracing::debug!(user = %persisted.user.id, "Restored persisted session");
        *self.write() = Some(persisted);
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adopt a fresh session: persist it, hand the token to the client,
    /// then publish it in memory. A persistence failure leaves the
    /// previous session in place.
    ///
    /// [`login`](Self::login) and [`register`](Self::register) adopt
    /// their responses automatically; this is public for shells that
    /// obtain an [`AuthResponse`] some other way.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the session cannot be
    /// persisted.
    pub async fn adopt(&self, response: AuthResponse) -> Result<User, SessionError> {
        let session = Session {
            user: response.user,
            token: response.token,
        };
        self.inner.storage.save(SESSION_KEY, &session)?;
        self.inner
            .client
            .set_bearer_token(SecretString::from(session.token.clone()))
            .await;
        let user = session.user.clone();
        *self.write() = Some(session);
        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidEmail`] before any request when the
    /// email is malformed, [`SessionError::Api`] when the backend rejects
    /// the credentials, and [`SessionError::Storage`] when the fresh
    /// session cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let email = Email::parse(email)?;
        let response = self.inner.client.login(email.as_str(), password).await?;
        self.adopt(response).await
    }

    /// Create a customer account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PasswordMismatch`] or
    /// [`SessionError::InvalidEmail`] before any request when the form is
    /// bad; otherwise as [`login`](Self::login).
    pub async fn register(&self, account: NewAccount) -> Result<User, SessionError> {
        if account.password != account.confirm_password {
            return Err(SessionError::PasswordMismatch);
        }
        Email::parse(&account.email)?;
        let request = RegisterRequest {
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            dni: account.dni,
            phone: account.phone,
            password: account.password,
            role_id: CUSTOMER_ROLE_ID,
            image: DEFAULT_AVATAR.to_string(),
        };
        let response = self.inner.client.register(&request).await?;
        self.adopt(response).await
    }

    /// Update the signed-in user's profile and adopt the fresh session
    /// the backend answers with.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] before any request when
    /// no one is signed in; otherwise as [`login`](Self::login).
    pub async fn update_profile(&self, edit: ProfileEdit) -> Result<User, SessionError> {
        let user = self.current_user().ok_or(SessionError::NotAuthenticated)?;
        Email::parse(&edit.email)?;
        let update = ProfileUpdate {
            id: user.id,
            first_name: edit.first_name,
            last_name: edit.last_name,
            email: edit.email,
            role_id: user.role.id,
            password: edit.password,
            dni: edit.dni,
            phone: edit.phone,
            image: edit.image,
        };
        let response = self.inner.client.update_profile(&update).await?;
        self.adopt(response).await
    }

    /// Sign out unconditionally: drop the in-memory session, the client's
    /// bearer token, and the persisted document. Callers that also want
    /// an empty cart clear it themselves.
    pub async fn logout(&self) {
        *self.write() = None;
        self.inner.client.clear_bearer_token().await;
        if let Err(e) = self.inner.storage.remove(SESSION_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
    }

    /// The signed-in account, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.read().as_ref().map(|session| session.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// The signed-in account's permission tier, if its role maps to one.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read()
            .as_ref()
            .and_then(|session| session.user.role.as_role())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimarket_api::ApiConfig;
    use minimarket_api::models::RoleRecord;
    use minimarket_core::{RoleId, UserId};

    use super::*;

    fn dead_client() -> ApiClient {
        // Nothing listens on port 1; requests fail at connect time.
        ApiClient::new(&ApiConfig::from_base_url("http://127.0.0.1:1/api").unwrap())
    }

    fn scratch_storage() -> Storage {
        let dir = std::env::temp_dir().join(format!("minimarket-session-{}", uuid::Uuid::new_v4()));
        Storage::new(dir)
    }

    fn customer() -> User {
        User {
            id: UserId::new(5),
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa@example.com".to_string(),
            dni: "45678912".to_string(),
            phone: "987654321".to_string(),
            image: None,
            role: RoleRecord {
                id: RoleId::new(2),
                name: "CLIENTE".to_string(),
            },
        }
    }

    fn persist_session(storage: &Storage) {
        let session = Session {
            user: customer(),
            token: "tok-123".to_string(),
        };
        storage.save(SESSION_KEY, &session).unwrap();
    }

    #[tokio::test]
    async fn test_restores_persisted_session_without_revalidation() {
        let storage = scratch_storage();
        persist_session(&storage);
        let client = dead_client();

        let store = SessionStore::new(client.clone(), storage).await;

        assert!(store.is_authenticated());
        assert_eq!(store.current_user().unwrap().first_name, "Rosa");
        assert_eq!(store.role(), Some(Role::Customer));
        assert!(client.has_bearer_token().await);
    }

    #[tokio::test]
    async fn test_starts_anonymous_without_persisted_session() {
        let client = dead_client();
        let store = SessionStore::new(client.clone(), scratch_storage()).await;

        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert!(!client.has_bearer_token().await);
    }

    #[tokio::test]
    async fn test_stale_session_shape_starts_anonymous() {
        let storage = scratch_storage();
        storage.save(SESSION_KEY, &vec![1, 2, 3]).unwrap();

        let store = SessionStore::new(dead_client(), storage).await;

        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email_before_any_request() {
        let store = SessionStore::new(dead_client(), scratch_storage()).await;

        // A dead client would answer with an Api error, so InvalidEmail
        // proves no request was attempted.
        let result = store.login("sin-arroba", "secreta").await;

        assert!(matches!(result, Err(SessionError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords_before_any_request() {
        let store = SessionStore::new(dead_client(), scratch_storage()).await;
        let account = NewAccount {
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa@example.com".to_string(),
            dni: "45678912".to_string(),
            phone: "987654321".to_string(),
            password: "una".to_string(),
            confirm_password: "otra".to_string(),
        };

        // A dead client would answer with an Api error, so PasswordMismatch
        // proves no request was attempted.
        let result = store.register(account).await;

        assert!(matches!(result, Err(SessionError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_update_profile_requires_session() {
        let store = SessionStore::new(dead_client(), scratch_storage()).await;
        let edit = ProfileEdit {
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa@example.com".to_string(),
            dni: "45678912".to_string(),
            phone: "987654321".to_string(),
            password: "secreta".to_string(),
            image: None,
        };

        let result = store.update_profile(edit).await;

        assert!(matches!(result, Err(SessionError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_logout_clears_memory_token_and_storage() {
        let storage = scratch_storage();
        persist_session(&storage);
        let client = dead_client();
        let store = SessionStore::new(client.clone(), storage.clone()).await;

        store.logout().await;

        assert!(!store.is_authenticated());
        assert!(!client.has_bearer_token().await);
        assert!(!storage.contains(SESSION_KEY));
    }

    #[tokio::test]
    async fn test_denial_hook_drops_session_state() {
        let storage = scratch_storage();
        persist_session(&storage);
        let store = SessionStore::new(dead_client(), storage.clone()).await;

        store.inner.on_denied(403);

        assert!(!store.is_authenticated());
        assert!(!storage.contains(SESSION_KEY));
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session {
            user: customer(),
            token: "super-secret-token".to_string(),
        };

        let output = format!("{session:?}");

        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("super-secret-token"));
    }
}
