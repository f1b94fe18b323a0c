//! Session-driven page sync and redirection.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only place that enforces "signed-in users see the welcome
//! page, everyone else sees login or signup". It runs on every provider push,
//! after and independently of the flows' own post-action navigation.

#[cfg(test)]
#[path = "session_observer_test.rs"]
mod session_observer_test;

use std::rc::Rc;

use crate::net::provider::{IdentityProvider, Session, Subscription};
use crate::pages::profile_image;
use crate::state::route::{Redirector, Route};
use crate::state::storage::KeyValueStore;
use crate::ui::dom::{Document, ids};

/// Name shown for `session`: its display name, else the email local part.
#[must_use]
pub fn display_name(session: &Session) -> &str {
    match session.display_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => session.email.split('@').next().unwrap_or_default(),
    }
}

#[derive(Clone)]
pub struct SessionObserver {
    doc: Rc<dyn Document>,
    store: Rc<dyn KeyValueStore>,
    redirector: Redirector,
}

impl SessionObserver {
    pub fn new(doc: Rc<dyn Document>, store: Rc<dyn KeyValueStore>, redirector: Redirector) -> Self {
        Self { doc, store, redirector }
    }

    /// Register with `provider`. The observer runs immediately with the
    /// current session and then on every change until the subscription is
    /// dropped.
    pub fn subscribe(self, provider: &dyn IdentityProvider) -> Subscription {
        provider.on_session_change(Rc::new(move |session: Option<&Session>| self.on_change(session)))
    }

    /// React to one session notification.
    pub fn on_change(&self, session: Option<&Session>) {
        match session {
            Some(session) => self.signed_in(session),
            None => self.signed_out(),
        }
    }

    fn signed_in(&self, session: &Session) {
        tracing::info!(email = %session.email, "user is signed in");

        if self.doc.has_element(ids::USERNAME_DISPLAY) {
            self.doc.set_text(ids::USERNAME_DISPLAY, display_name(session));
        }
        if let Some(data_url) = profile_image::load(self.store.as_ref(), &session.uid) {
            profile_image::show_image(self.doc.as_ref(), &data_url);
        }
        self.redirector.go(Route::Welcome);
    }

    fn signed_out(&self) {
        tracing::info!("user is signed out");
        if !self.redirector.is_on_any(&[Route::Login, Route::Signup]) {
            self.redirector.go(Route::Login);
        }
    }
}
