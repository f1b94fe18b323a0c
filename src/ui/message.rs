//! Status, error, and loading text in the `message` region.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use std::fmt;
use std::rc::Rc;

use crate::ui::dom::{Document, ids};

/// Styling tag applied to the message region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Error,
    Success,
    /// In-progress status; neither outcome yet.
    Loading,
}

impl MessageKind {
    #[must_use]
    pub fn as_class(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Loading => "loading",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_class())
    }
}

/// Class string for the message region. The `loading` class appears at most
/// once.
#[must_use]
pub fn message_class(kind: MessageKind, loading: bool) -> String {
    if loading && kind != MessageKind::Loading { format!("message {kind} loading") } else { format!("message {kind}") }
}

/// Renders flow outcomes into the page.
#[derive(Clone)]
pub struct MessagePresenter {
    doc: Rc<dyn Document>,
}

impl MessagePresenter {
    pub fn new(doc: Rc<dyn Document>) -> Self {
        Self { doc }
    }

    /// Write `message` into the region tagged with `kind`.
    ///
    /// While `loading`, the region shows its spinner and the signup submit
    /// button is disabled. Without a message region the text goes to the log.
    pub fn show(&self, message: &str, kind: MessageKind, loading: bool) {
        if !self.doc.has_element(ids::MESSAGE) {
            tracing::error!(message, "message element not found");
            return;
        }
        self.doc.set_text(ids::MESSAGE, message);
        self.doc.set_class_name(ids::MESSAGE, &message_class(kind, loading));
        if self.doc.has_element(ids::SIGNUP_FORM) {
            self.doc.set_submit_disabled(ids::SIGNUP_FORM, loading);
        }
    }

    pub fn error(&self, message: &str) {
        self.show(message, MessageKind::Error, false);
    }

    pub fn success(&self, message: &str) {
        self.show(message, MessageKind::Success, false);
    }

    pub fn loading(&self, message: &str) {
        self.show(message, MessageKind::Loading, true);
    }

    /// Empty the region and drop any loading state.
    pub fn clear(&self) {
        self.show("", MessageKind::Error, false);
    }
}
