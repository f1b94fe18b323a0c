//! Application root: builds every component over shared seams.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::provider::{IdentityProvider, Subscription};
use crate::pages::auth_flow::AuthFlows;
use crate::pages::profile_image::ProfileImageStore;
use crate::pages::session_observer::SessionObserver;
use crate::state::route::{Navigator, Redirector};
use crate::state::storage::KeyValueStore;
use crate::ui::dom::Document;
use crate::ui::message::MessagePresenter;

/// One page's worth of wiring.
///
/// Event sources (browser listeners, the terminal driver) call into
/// [`App::flows`] and [`App::profile_images`]; [`App::mount`] attaches the
/// session observer to the provider.
pub struct App {
    provider: Rc<dyn IdentityProvider>,
    presenter: MessagePresenter,
    flows: AuthFlows,
    images: ProfileImageStore,
    observer: SessionObserver,
    subscription: RefCell<Option<Subscription>>,
}

impl App {
    pub fn new(
        provider: Rc<dyn IdentityProvider>,
        doc: Rc<dyn Document>,
        store: Rc<dyn KeyValueStore>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let presenter = MessagePresenter::new(doc.clone());
        let redirector = Redirector::new(navigator);
        let flows = AuthFlows::new(provider.clone(), doc.clone(), presenter.clone(), redirector.clone());
        let images = ProfileImageStore::new(provider.clone(), store.clone(), doc.clone(), presenter.clone());
        let observer = SessionObserver::new(doc, store, redirector);
        Self { provider, presenter, flows, images, observer, subscription: RefCell::new(None) }
    }

    /// Subscribe the session observer. Only the first call subscribes.
    ///
    /// Returns `true` if this call subscribed.
    pub fn mount(&self) -> bool {
        if self.subscription.borrow().is_some() {
            tracing::debug!("session observer already mounted");
            return false;
        }
        let subscription = self.observer.clone().subscribe(self.provider.as_ref());
        *self.subscription.borrow_mut() = Some(subscription);
        true
    }

    /// Detach the session observer.
    pub fn unmount(&self) {
        self.subscription.borrow_mut().take();
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    #[must_use]
    pub fn flows(&self) -> &AuthFlows {
        &self.flows
    }

    #[must_use]
    pub fn profile_images(&self) -> &ProfileImageStore {
        &self.images
    }

    #[must_use]
    pub fn presenter(&self) -> &MessagePresenter {
        &self.presenter
    }

    #[must_use]
    pub fn provider(&self) -> &Rc<dyn IdentityProvider> {
        &self.provider
    }
}
