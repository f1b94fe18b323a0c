//! Read named fields of a submitted form into a plain mapping.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::HashMap;

use crate::ui::dom::Document;
use crate::util::validate::Credentials;

/// Field values captured from one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: HashMap<String, String>,
}

impl FormData {
    /// Value of `name`, or `""` when the field was not extracted.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Interpret the capture as `email` / `password` / `confirmPassword`.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.get("email").to_owned(),
            password: self.get("password").to_owned(),
            confirm_password: self.values.get("confirmPassword").cloned(),
        }
    }
}

/// Project `fields` of form `form_id` into a [`FormData`].
///
/// Every named field is expected to exist on the form. A missing one is a
/// page markup bug: it is logged and read as an empty string.
pub fn extract(doc: &dyn Document, form_id: &str, fields: &[&str]) -> FormData {
    let values = fields
        .iter()
        .map(|&field| {
            let value = doc.field_value(form_id, field).unwrap_or_else(|| {
                tracing::error!(form = form_id, field, "form field not found");
                String::new()
            });
            (field.to_owned(), value)
        })
        .collect();
    FormData { values }
}
