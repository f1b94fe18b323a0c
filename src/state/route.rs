//! Known pages and redirection between them.
//!
//! Two paths redirect on the same transition: each flow navigates directly
//! once the provider answers, and the session observer redirects again when
//! the provider pushes the new state. [`Redirector`] makes the pair
//! idempotent.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Welcome,
    Login,
    Signup,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Welcome => "welcome.html",
            Self::Login => "login.html",
            Self::Signup => "signup.html",
        }
    }

    /// Whether the page at `current_path` is this route.
    #[must_use]
    pub fn matches(self, current_path: &str) -> bool {
        current_path.ends_with(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("navigation to {path} failed: {reason}")]
pub struct NavigationError {
    pub path: String,
    pub reason: String,
}

/// Where the page is, and how to leave it.
pub trait Navigator {
    fn current_path(&self) -> String;

    /// Start loading `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] if the navigation could not be started.
    fn assign(&self, path: &str) -> Result<(), NavigationError>;
}

/// Navigator that records assignments and moves to them immediately.
#[derive(Debug)]
pub struct MemoryNavigator {
    path: RefCell<String>,
    history: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn at(path: &str) -> Self {
        Self { path: RefCell::new(path.to_owned()), history: RefCell::new(Vec::new()) }
    }

    /// Every path assigned so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn assign(&self, path: &str) -> Result<(), NavigationError> {
        path.clone_into(&mut self.path.borrow_mut());
        self.history.borrow_mut().push(path.to_owned());
        Ok(())
    }
}

/// Idempotent navigation to a [`Route`].
#[derive(Clone)]
pub struct Redirector {
    navigator: Rc<dyn Navigator>,
    pending: Rc<Cell<Option<Route>>>,
}

impl Redirector {
    pub fn new(navigator: Rc<dyn Navigator>) -> Self {
        Self { navigator, pending: Rc::new(Cell::new(None)) }
    }

    #[must_use]
    pub fn current_path(&self) -> String {
        self.navigator.current_path()
    }

    /// Whether the current page is any of `routes`.
    #[must_use]
    pub fn is_on_any(&self, routes: &[Route]) -> bool {
        let path = self.navigator.current_path();
        routes.iter().any(|route| route.matches(&path))
    }

    /// Navigate to `route` unless already there or already on the way.
    ///
    /// Returns `true` when a navigation was issued. A navigation that fails
    /// to start is not left pending, so the next request retries it.
    pub fn go(&self, route: Route) -> bool {
        let current = self.navigator.current_path();
        if self.pending.get().is_some_and(|pending| pending.matches(&current)) {
            self.pending.set(None);
        }
        if route.matches(&current) {
            tracing::debug!(route = route.path(), "already on route");
            return false;
        }
        if self.pending.get() == Some(route) {
            tracing::debug!(route = route.path(), "redirect already pending");
            return false;
        }
        tracing::info!(route = route.path(), "redirecting");
        self.pending.set(Some(route));
        if let Err(e) = self.navigator.assign(route.path()) {
            tracing::warn!(route = route.path(), error = %e, "redirect did not start");
            self.pending.set(None);
            return false;
        }
        true
    }
}
