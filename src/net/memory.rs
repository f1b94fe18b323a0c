//! In-process identity provider.
//!
//! Keeps accounts in a map and mirrors the hosted service's observable
//! behavior: account creation signs the user in, errors carry SDK codes, and
//! every sign-in or sign-out is pushed to session listeners.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

use super::provider::{IdentityProvider, ProviderError, Session, SessionListener, SessionListeners, Subscription, codes};
use crate::util::validate::is_valid_email_format;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
    display_name: Option<String>,
}

/// Call counts per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create_account: usize,
    pub sign_in: usize,
    pub sign_out: usize,
}

#[derive(Default)]
pub struct InMemoryProvider {
    accounts: RefCell<HashMap<String, Account>>,
    current: RefCell<Option<Session>>,
    listeners: SessionListeners,
    failures: RefCell<VecDeque<ProviderError>>,
    calls: Cell<CallCounts>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account directly. Returns its uid.
    pub fn add_account(&self, email: &str, password: &str, display_name: Option<&str>) -> String {
        let uid = Uuid::new_v4().simple().to_string();
        self.accounts.borrow_mut().insert(
            email.to_ascii_lowercase(),
            Account { uid: uid.clone(), password: password.to_owned(), display_name: display_name.map(str::to_owned) },
        );
        uid
    }

    /// Make the next remote call fail with `error`.
    pub fn fail_next(&self, error: ProviderError) {
        self.failures.borrow_mut().push_back(error);
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.calls.get()
    }

    fn count(&self, f: impl FnOnce(&mut CallCounts)) {
        let mut calls = self.calls.get();
        f(&mut calls);
        self.calls.set(calls);
    }

    fn take_failure(&self) -> Result<(), ProviderError> {
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn set_current(&self, session: Option<Session>) {
        self.current.replace(session.clone());
        self.listeners.notify(session.as_ref());
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for InMemoryProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        self.count(|c| c.create_account += 1);
        self.take_failure()?;
        if !is_valid_email_format(email) {
            return Err(ProviderError::from_code(codes::INVALID_EMAIL));
        }
        let key = email.to_ascii_lowercase();
        if self.accounts.borrow().contains_key(&key) {
            return Err(ProviderError::from_code(codes::EMAIL_ALREADY_IN_USE));
        }
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(ProviderError::with_detail(codes::WEAK_PASSWORD, "Password should be at least 6 characters"));
        }
        let uid = self.add_account(email, password, None);
        let session = Session { uid, email: key, display_name: None };
        tracing::info!(uid = %session.uid, "account created");
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        self.count(|c| c.sign_in += 1);
        self.take_failure()?;
        if !is_valid_email_format(email) {
            return Err(ProviderError::from_code(codes::INVALID_EMAIL));
        }
        let key = email.to_ascii_lowercase();
        let account = self.accounts.borrow().get(&key).cloned();
        let Some(account) = account.filter(|a| a.password == password) else {
            return Err(ProviderError::from_code(codes::INVALID_CREDENTIAL));
        };
        let session = Session { uid: account.uid, email: key, display_name: account.display_name };
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.count(|c| c.sign_out += 1);
        self.take_failure()?;
        self.set_current(None);
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        let current = self.current_session();
        self.listeners.subscribe(current.as_ref(), listener)
    }
}

impl std::fmt::Debug for InMemoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryProvider")
            .field("accounts", &self.accounts.borrow().len())
            .field("current", &self.current.borrow())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

