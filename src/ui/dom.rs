//! Page seam: elements addressed by stable id.
//!
//! SYSTEM CONTEXT
//! ==============
//! Flows only ever read form fields and write text, classes, image sources,
//! and visibility. [`Document`] captures exactly that surface;
//! `browser::dom` backs it with `web-sys`, [`MemoryDocument`] with a map.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

/// Element ids the pages are expected to carry.
pub mod ids {
    pub const MESSAGE: &str = "message";
    pub const SIGNUP_FORM: &str = "signup-form";
    pub const SIGNIN_FORM: &str = "signin-form";
    pub const SIGNOUT_BUTTON: &str = "signout-button";
    pub const USERNAME_DISPLAY: &str = "username-display";
    pub const IMAGE_PREVIEW: &str = "image-preview";
    pub const LOGO_IMAGE: &str = "logo-image";
    pub const PROFILE_IMAGE_FILE: &str = "profileImageFile";
    pub const IMAGE_UPLOAD_LOADING: &str = "image-upload-loading";
    pub const REMOVE_PROFILE_IMAGE_BUTTON: &str = "remove-profile-image-button";
}

/// CSS `display` values the flows toggle between.
pub mod display {
    pub const BLOCK: &str = "block";
    pub const FLEX: &str = "flex";
    pub const NONE: &str = "none";
}

/// Minimal element store the flows render into.
///
/// Setters on an id that is not on the page are no-ops; callers that must
/// react to absence check [`Document::has_element`] first.
pub trait Document {
    fn has_element(&self, id: &str) -> bool;

    fn set_text(&self, id: &str, text: &str);

    fn set_class_name(&self, id: &str, class_name: &str);

    fn set_image_source(&self, id: &str, src: &str);

    /// Set the inline `display` style.
    fn set_display(&self, id: &str, value: &str);

    /// Toggle `disabled` on the submit button of form `form_id`.
    fn set_submit_disabled(&self, form_id: &str, disabled: bool);

    /// Current value of input `field` inside form `form_id`.
    fn field_value(&self, form_id: &str, field: &str) -> Option<String>;
}

/// Snapshot of one element held by [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub class_name: String,
    pub src: Option<String>,
    pub display: Option<String>,
    pub fields: BTreeMap<String, String>,
    pub submit_disabled: bool,
}

/// In-process [`Document`] used by tests and the terminal driver.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: RefCell<HashMap<String, Element>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document carrying every id in [`ids`], forms with empty fields.
    #[must_use]
    pub fn full_page() -> Self {
        let doc = Self::new()
            .with_form(ids::SIGNUP_FORM, &[("email", ""), ("password", ""), ("confirmPassword", "")])
            .with_form(ids::SIGNIN_FORM, &[("email", ""), ("password", "")]);
        for id in [
            ids::MESSAGE,
            ids::SIGNOUT_BUTTON,
            ids::USERNAME_DISPLAY,
            ids::IMAGE_PREVIEW,
            ids::LOGO_IMAGE,
            ids::PROFILE_IMAGE_FILE,
            ids::IMAGE_UPLOAD_LOADING,
            ids::REMOVE_PROFILE_IMAGE_BUTTON,
        ] {
            doc.insert(id, Element::default());
        }
        doc
    }

    #[must_use]
    pub fn with_element(self, id: &str) -> Self {
        self.insert(id, Element::default());
        self
    }

    #[must_use]
    pub fn with_form(self, id: &str, fields: &[(&str, &str)]) -> Self {
        let fields = fields.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect();
        self.insert(id, Element { fields, ..Element::default() });
        self
    }

    fn insert(&self, id: &str, element: Element) {
        self.elements.borrow_mut().insert(id.to_owned(), element);
    }

    /// Type into a form field. Creates the form if absent.
    pub fn set_field(&self, form_id: &str, field: &str, value: &str) {
        self.elements
            .borrow_mut()
            .entry(form_id.to_owned())
            .or_default()
            .fields
            .insert(field.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<Element> {
        self.elements.borrow().get(id).cloned()
    }

    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|el| el.text.clone())
    }

    #[must_use]
    pub fn class_name(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|el| el.class_name.clone())
    }

    #[must_use]
    pub fn image_source(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).and_then(|el| el.src.clone())
    }

    #[must_use]
    pub fn display(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).and_then(|el| el.display.clone())
    }

    #[must_use]
    pub fn submit_disabled(&self, form_id: &str) -> bool {
        self.elements.borrow().get(form_id).is_some_and(|el| el.submit_disabled)
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut Element)) {
        if let Some(el) = self.elements.borrow_mut().get_mut(id) {
            f(el);
        }
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        self.update(id, |el| text.clone_into(&mut el.text));
    }

    fn set_class_name(&self, id: &str, class_name: &str) {
        self.update(id, |el| class_name.clone_into(&mut el.class_name));
    }

    fn set_image_source(&self, id: &str, src: &str) {
        self.update(id, |el| el.src = Some(src.to_owned()));
    }

    fn set_display(&self, id: &str, value: &str) {
        self.update(id, |el| el.display = Some(value.to_owned()));
    }

    fn set_submit_disabled(&self, form_id: &str, disabled: bool) {
        self.update(form_id, |el| el.submit_disabled = disabled);
    }

    fn field_value(&self, form_id: &str, field: &str) -> Option<String> {
        self.elements.borrow().get(form_id)?.fields.get(field).cloned()
    }
}
