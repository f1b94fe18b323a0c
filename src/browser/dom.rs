//! [`Document`] over the live page via `web-sys`.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::ui::dom::Document;

pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// The `field` control of form `form_id`, by `name` or `id`.
    pub fn field(&self, form_id: &str, field: &str) -> Option<HtmlInputElement> {
        let form = self.element(form_id)?;
        let selector = format!("[name=\"{field}\"], #{field}");
        form.query_selector(&selector).ok().flatten()?.dyn_into::<HtmlInputElement>().ok()
    }
}

impl Document for BrowserDocument {
    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class_name(&self, id: &str, class_name: &str) {
        if let Some(el) = self.element(id) {
            el.set_class_name(class_name);
        }
    }

    fn set_image_source(&self, id: &str, src: &str) {
        if let Some(el) = self.element(id) {
            if let Err(e) = el.set_attribute("src", src) {
                tracing::warn!(id, error = ?e, "failed to set image source");
            }
        }
    }

    fn set_display(&self, id: &str, value: &str) {
        let Some(el) = self.element(id).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        if let Err(e) = el.style().set_property("display", value) {
            tracing::warn!(id, error = ?e, "failed to set display");
        }
    }

    fn set_submit_disabled(&self, form_id: &str, disabled: bool) {
        let Some(form) = self.element(form_id) else {
            return;
        };
        let Ok(Some(button)) = form.query_selector("button[type=\"submit\"]") else {
            return;
        };
        let result = if disabled { button.set_attribute("disabled", "true") } else { button.remove_attribute("disabled") };
        if let Err(e) = result {
            tracing::warn!(form = form_id, error = ?e, "failed to toggle submit button");
        }
    }

    fn field_value(&self, form_id: &str, field: &str) -> Option<String> {
        self.field(form_id, field).map(|input| input.value())
    }
}
