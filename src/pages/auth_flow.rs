//! Signup, signin, and signout against the identity provider.
//!
//! Every flow renders its outcome through the message region before
//! returning, so callers only need the returned `Result` for logging.
//! Loading state is always cleared on failure.

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

use std::rc::Rc;

use crate::error::FlowError;
use crate::net::provider::{IdentityProvider, codes};
use crate::state::route::{Redirector, Route};
use crate::ui::dom::{Document, ids};
use crate::ui::message::MessagePresenter;
use crate::util::form;
use crate::util::validate::{PasswordRules, ValidationError, is_valid_email_format, validate_signup};

pub const SIGNUP_FIELDS: [&str; 3] = ["email", "password", "confirmPassword"];
pub const SIGNIN_FIELDS: [&str; 2] = ["email", "password"];

pub const CREATING_ACCOUNT: &str = "Creating account...";
pub const ACCOUNT_CREATED: &str = "Account created successfully!";
pub const SIGNING_IN: &str = "Signing in...";
pub const EMAIL_IN_USE: &str = "Email already in use. Please use a different email.";
pub const INVALID_EMAIL: &str = "Invalid email format.";
pub const SIGNUP_FAILED: &str = "An error occurred during registration. Please try again later.";

/// User-facing text for a failed account creation.
///
/// Known codes get a specific message; anything else gets a generic retry
/// prompt.
#[must_use]
pub fn signup_failure_message(code: &str) -> &'static str {
    match code {
        codes::EMAIL_ALREADY_IN_USE => EMAIL_IN_USE,
        codes::INVALID_EMAIL => INVALID_EMAIL,
        _ => SIGNUP_FAILED,
    }
}

/// Orchestrates the form-driven auth flows.
#[derive(Clone)]
pub struct AuthFlows {
    provider: Rc<dyn IdentityProvider>,
    doc: Rc<dyn Document>,
    presenter: MessagePresenter,
    redirector: Redirector,
    rules: PasswordRules,
}

impl AuthFlows {
    pub fn new(
        provider: Rc<dyn IdentityProvider>,
        doc: Rc<dyn Document>,
        presenter: MessagePresenter,
        redirector: Redirector,
    ) -> Self {
        Self { provider, doc, presenter, redirector, rules: PasswordRules::DEFAULT }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: PasswordRules) -> Self {
        self.rules = rules;
        self
    }

    /// Handle submission of `signup-form`.
    ///
    /// Validation runs to completion before the provider is called; a
    /// rejected form never reaches the provider. On success the user is sent
    /// to the login page.
    ///
    /// # Errors
    ///
    /// Returns the validation or provider failure that was shown.
    pub async fn sign_up(&self) -> Result<(), FlowError> {
        let credentials = form::extract(self.doc.as_ref(), ids::SIGNUP_FORM, &SIGNUP_FIELDS).credentials();

        if let Err(err) = validate_signup(&credentials, &self.rules) {
            tracing::debug!(reason = %err, "signup rejected by validation");
            self.presenter.error(&err.to_string());
            return Err(err.into());
        }

        self.presenter.loading(CREATING_ACCOUNT);
        match self.provider.create_account(&credentials.email, &credentials.password).await {
            Ok(session) => {
                tracing::info!(uid = %session.uid, "signup succeeded");
                self.presenter.success(ACCOUNT_CREATED);
                self.redirector.go(Route::Login);
                Ok(())
            }
            Err(err) => {
                self.presenter.clear();
                let message = signup_failure_message(&err.code);
                if message == SIGNUP_FAILED {
                    tracing::error!(code = %err.code, error = %err.message, "error signing up");
                }
                self.presenter.error(message);
                Err(err.into())
            }
        }
    }

    /// Handle submission of `signin-form`.
    ///
    /// # Errors
    ///
    /// Returns the provider failure, whose message is shown verbatim.
    pub async fn sign_in(&self) -> Result<(), FlowError> {
        let credentials = form::extract(self.doc.as_ref(), ids::SIGNIN_FORM, &SIGNIN_FIELDS).credentials();

        self.presenter.loading(SIGNING_IN);
        match self.provider.sign_in(&credentials.email, &credentials.password).await {
            Ok(session) => {
                tracing::info!(uid = %session.uid, "signin succeeded");
                self.redirector.go(Route::Welcome);
                Ok(())
            }
            Err(err) => {
                self.presenter.clear();
                tracing::error!(code = %err.code, error = %err.message, "error signing in");
                self.presenter.error(&err.message);
                Err(err.into())
            }
        }
    }

    /// Handle a click on `signout-button`.
    ///
    /// # Errors
    ///
    /// Returns the provider failure, whose message is shown verbatim.
    pub async fn sign_out(&self) -> Result<(), FlowError> {
        match self.provider.sign_out().await {
            Ok(()) => {
                self.redirector.go(Route::Login);
                Ok(())
            }
            Err(err) => {
                tracing::error!(code = %err.code, error = %err.message, "error signing out");
                self.presenter.error(&err.message);
                Err(err.into())
            }
        }
    }

    /// Live check of the signup email field as the user types.
    ///
    /// Shows the format error while the value is malformed and clears the
    /// message once it is not. Returns whether the value is well formed.
    pub fn on_email_input(&self, value: &str) -> bool {
        let valid = is_valid_email_format(value);
        if valid {
            self.presenter.clear();
        } else {
            self.presenter.error(&ValidationError::InvalidEmailFormat.to_string());
        }
        valid
    }
}
