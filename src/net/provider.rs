//! Contract with the external identity provider.
//!
//! The provider owns the session. Flows call it to create accounts, sign in,
//! and sign out; everything else learns about the session through
//! [`IdentityProvider::on_session_change`].

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// SDK-style error codes the flows care about.
pub mod codes {
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const USER_DISABLED: &str = "auth/user-disabled";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
    pub const INVALID_API_KEY: &str = "auth/invalid-api-key";
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
    pub const INTERNAL_ERROR: &str = "auth/internal-error";
}

/// An authenticated user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Provider rejection: a stable `code` plus a human-readable `message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: String,
    pub message: String,
}

impl ProviderError {
    /// Error for `code` with the SDK's default wording.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self { code: code.to_owned(), message: format!("Firebase: Error ({code}).") }
    }

    /// Error for `code` carrying provider detail text.
    #[must_use]
    pub fn with_detail(code: &str, detail: &str) -> Self {
        Self { code: code.to_owned(), message: format!("Firebase: {detail} ({code}).") }
    }
}

pub type SessionListener = Rc<dyn Fn(Option<&Session>)>;

type ListenerList = RefCell<Vec<(u64, SessionListener)>>;

/// Registry of session-change listeners, for provider implementations.
#[derive(Default)]
pub struct SessionListeners {
    next_id: Cell<u64>,
    listeners: Rc<ListenerList>,
}

impl SessionListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and call it right away with `current`.
    pub fn subscribe(&self, current: Option<&Session>, listener: SessionListener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener.clone()));
        listener(current);
        Subscription { id, listeners: Rc::downgrade(&self.listeners) }
    }

    /// Deliver `session` to every listener.
    ///
    /// Listeners run against a snapshot, so they may subscribe or
    /// unsubscribe while being notified.
    pub fn notify(&self, session: Option<&Session>) {
        let snapshot: Vec<SessionListener> = self.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in snapshot {
            listener(session);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

/// Live session-change registration. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Remote identity service.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    /// Create an account. On success the new user is also signed in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;

    fn current_session(&self) -> Option<Session>;

    /// Push subscription: fires now with the current state, then on every
    /// sign-in or sign-out.
    fn on_session_change(&self, listener: SessionListener) -> Subscription;
}
