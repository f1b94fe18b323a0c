//! Identity Toolkit REST client.
//!
//! Speaks the v1 `accounts:*` endpoints the hosted SDK uses under the hood.
//! The signed-in user is persisted through a [`KeyValueStore`] so the session
//! survives page loads, as the SDK does with browser storage.
//!
//! ERROR HANDLING
//! ==============
//! REST failures come back as `{"error": {"message": "EMAIL_EXISTS"}}`.
//! They are translated to the SDK's `auth/...` codes and message wording so
//! flows see the same errors whichever provider backs them.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::provider::{IdentityProvider, ProviderError, Session, SessionListener, SessionListeners, Subscription, codes};
use crate::config::ProviderConfig;
use crate::state::storage::{KeyValueStore, load_json, save_json};

/// Signed-in user plus the opaque tokens the service issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub session: Session,
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn endpoint(config: &ProviderConfig, method: &str) -> String {
    format!("{}/v1/accounts:{method}?key={}", config.identity_base_url, config.api_key)
}

/// Storage key of the persisted user for this app.
#[must_use]
pub fn session_storage_key(api_key: &str) -> String {
    format!("authgate:authUser:{api_key}:[DEFAULT]")
}

/// SDK code for a REST error reason such as `EMAIL_EXISTS`.
#[must_use]
pub fn code_for_reason(reason: &str) -> &'static str {
    match reason {
        "EMAIL_EXISTS" => codes::EMAIL_ALREADY_IN_USE,
        "INVALID_EMAIL" | "MISSING_EMAIL" => codes::INVALID_EMAIL,
        "EMAIL_NOT_FOUND" => codes::USER_NOT_FOUND,
        "INVALID_PASSWORD" => codes::WRONG_PASSWORD,
        "INVALID_LOGIN_CREDENTIALS" => codes::INVALID_CREDENTIAL,
        "USER_DISABLED" => codes::USER_DISABLED,
        "WEAK_PASSWORD" => codes::WEAK_PASSWORD,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => codes::TOO_MANY_REQUESTS,
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => codes::OPERATION_NOT_ALLOWED,
        "INVALID_API_KEY" | "API_KEY_INVALID" => codes::INVALID_API_KEY,
        _ => codes::INTERNAL_ERROR,
    }
}

/// Translate a REST error body into a [`ProviderError`].
///
/// The reason may carry detail after ` : `, e.g.
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
#[must_use]
pub fn error_from_body(status: u16, body: &str) -> ProviderError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        tracing::warn!(status, "unparseable identity error body");
        return ProviderError::from_code(codes::INTERNAL_ERROR);
    };
    let raw = envelope.error.message;
    let (reason, detail) = match raw.split_once(" : ") {
        Some((reason, detail)) => (reason.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };
    let code = code_for_reason(reason);
    if code == codes::INTERNAL_ERROR {
        tracing::warn!(status, reason, "unmapped identity error");
    }
    match detail {
        Some(detail) if !detail.is_empty() => ProviderError::with_detail(code, detail),
        _ => ProviderError::from_code(code),
    }
}

fn network_error(err: &reqwest::Error) -> ProviderError {
    tracing::warn!(error = %err, "identity request failed");
    ProviderError::from_code(codes::NETWORK_REQUEST_FAILED)
}

/// [`IdentityProvider`] backed by the Identity Toolkit REST API.
pub struct RestIdentityProvider {
    http: reqwest::Client,
    config: ProviderConfig,
    store: Rc<dyn KeyValueStore>,
    current: RefCell<Option<StoredUser>>,
    listeners: SessionListeners,
}

impl RestIdentityProvider {
    /// Build a client and restore any user persisted in `store`.
    pub fn new(config: ProviderConfig, store: Rc<dyn KeyValueStore>) -> Self {
        let current = load_json::<StoredUser>(store.as_ref(), &session_storage_key(&config.api_key));
        if let Some(user) = &current {
            tracing::debug!(uid = %user.session.uid, "restored persisted session");
        }
        Self {
            http: reqwest::Client::new(),
            config,
            store,
            current: RefCell::new(current),
            listeners: SessionListeners::new(),
        }
    }

    /// Persisted user record, tokens included.
    #[must_use]
    pub fn stored_user(&self) -> Option<StoredUser> {
        self.current.borrow().clone()
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<StoredUser, ProviderError> {
        let request = PasswordRequest { email, password, return_secure_token: true };
        let resp = self
            .http
            .post(endpoint(&self.config, method))
            .json(&request)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }
        let body: AuthResponse = resp.json().await.map_err(|e| {
            tracing::warn!(error = %e, method, "identity response parse failed");
            ProviderError::from_code(codes::INTERNAL_ERROR)
        })?;

        let email = if body.email.is_empty() { email.to_owned() } else { body.email };
        Ok(StoredUser {
            session: Session {
                uid: body.local_id,
                email,
                display_name: body.display_name.filter(|n| !n.is_empty()),
            },
            id_token: body.id_token,
            refresh_token: body.refresh_token,
        })
    }

    /// Swap the signed-in user and notify listeners.
    ///
    /// A store that refuses the record leaves the session live for this page
    /// only; the next load starts signed out.
    fn set_current(&self, user: Option<StoredUser>) {
        let key = session_storage_key(&self.config.api_key);
        let persisted = match &user {
            Some(user) => save_json(self.store.as_ref(), &key, user),
            None => self.store.remove(&key),
        };
        if let Err(e) = persisted {
            tracing::warn!(error = %e, "session not persisted");
        }
        let session = user.as_ref().map(|u| u.session.clone());
        self.current.replace(user);
        self.listeners.notify(session.as_ref());
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for RestIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let user = self.password_call("signUp", email, password).await?;
        tracing::info!(uid = %user.session.uid, "account created");
        let session = user.session.clone();
        self.set_current(Some(user));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let user = self.password_call("signInWithPassword", email, password).await?;
        tracing::info!(uid = %user.session.uid, "signed in");
        let session = user.session.clone();
        self.set_current(Some(user));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.set_current(None);
        tracing::info!("signed out");
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.current.borrow().as_ref().map(|u| u.session.clone())
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        let current = self.current_session();
        self.listeners.subscribe(current.as_ref(), listener)
    }
}
