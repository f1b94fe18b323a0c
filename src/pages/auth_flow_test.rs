use super::*;
use crate::net::memory::InMemoryProvider;
use crate::net::provider::ProviderError;
use crate::state::route::MemoryNavigator;
use crate::ui::dom::MemoryDocument;
use crate::util::validate::PasswordError;

struct Harness {
    doc: Rc<MemoryDocument>,
    provider: Rc<InMemoryProvider>,
    nav: Rc<MemoryNavigator>,
    flows: AuthFlows,
}

fn harness(path: &str) -> Harness {
    let doc = Rc::new(MemoryDocument::full_page());
    let provider = Rc::new(InMemoryProvider::new());
    let nav = Rc::new(MemoryNavigator::at(path));
    let flows = AuthFlows::new(
        provider.clone(),
        doc.clone(),
        MessagePresenter::new(doc.clone()),
        Redirector::new(nav.clone()),
    );
    Harness { doc, provider, nav, flows }
}

impl Harness {
    fn fill_signup(&self, email: &str, password: &str, confirm: &str) {
        self.doc.set_field(ids::SIGNUP_FORM, "email", email);
        self.doc.set_field(ids::SIGNUP_FORM, "password", password);
        self.doc.set_field(ids::SIGNUP_FORM, "confirmPassword", confirm);
    }

    fn fill_signin(&self, email: &str, password: &str) {
        self.doc.set_field(ids::SIGNIN_FORM, "email", email);
        self.doc.set_field(ids::SIGNIN_FORM, "password", password);
    }

    fn message(&self) -> String {
        self.doc.text(ids::MESSAGE).unwrap_or_default()
    }

    fn message_class(&self) -> String {
        self.doc.class_name(ids::MESSAGE).unwrap_or_default()
    }
}

// =============================================================
// signup
// =============================================================

#[tokio::test]
async fn signup_requires_email_first() {
    let h = harness("/signup.html");
    let err = h.flows.sign_up().await.unwrap_err();
    assert_eq!(err, FlowError::Validation(ValidationError::EmailRequired));
    assert_eq!(h.message(), "Email is required.");
    assert_eq!(h.provider.calls().create_account, 0);
}

#[tokio::test]
async fn signup_with_mismatched_passwords_never_calls_provider() {
    let h = harness("/signup.html");
    h.fill_signup("jane@x.com", "Secret123", "Secret124");
    let err = h.flows.sign_up().await.unwrap_err();
    assert_eq!(err, FlowError::Validation(ValidationError::PasswordMismatch));
    assert_eq!(h.message(), "Passwords do not match.");
    assert_eq!(h.provider.calls().create_account, 0);
    assert!(h.nav.history().is_empty());
}

#[tokio::test]
async fn signup_weak_password_shows_rule_message() {
    let h = harness("/signup.html");
    h.fill_signup("jane@x.com", "secret", "secret");
    let err = h.flows.sign_up().await.unwrap_err();
    assert_eq!(err, FlowError::Validation(ValidationError::Password(PasswordError::TooShort { min_length: 8 })));
    assert_eq!(h.message(), "Password must be at least 8 characters long.");
    assert_eq!(h.provider.calls().create_account, 0);
}

#[tokio::test]
async fn signup_success_shows_message_and_goes_to_login() {
    let h = harness("/signup.html");
    h.fill_signup("jane@x.com", "Secret123", "Secret123");
    h.flows.sign_up().await.unwrap();
    assert_eq!(h.message(), "Account created successfully!");
    assert_eq!(h.message_class(), "message success");
    assert!(!h.doc.submit_disabled(ids::SIGNUP_FORM));
    assert_eq!(h.nav.history(), vec!["login.html".to_owned()]);
    assert_eq!(h.provider.calls().create_account, 1);
}

#[tokio::test]
async fn signup_email_in_use_gets_specific_message() {
    let h = harness("/signup.html");
    h.provider.add_account("jane@x.com", "Secret123", None);
    h.fill_signup("jane@x.com", "Secret123", "Secret123");
    let err = h.flows.sign_up().await.unwrap_err();
    assert!(matches!(err, FlowError::Provider(ref e) if e.code == codes::EMAIL_ALREADY_IN_USE));
    assert_eq!(h.message(), "Email already in use. Please use a different email.");
    assert_eq!(h.message_class(), "message error");
    assert!(!h.doc.submit_disabled(ids::SIGNUP_FORM));
    assert!(h.nav.history().is_empty());
}

#[tokio::test]
async fn signup_invalid_email_code_gets_format_message() {
    let h = harness("/signup.html");
    h.fill_signup("not-an-email", "Secret123", "Secret123");
    h.flows.sign_up().await.unwrap_err();
    assert_eq!(h.message(), "Invalid email format.");
}

#[tokio::test]
async fn signup_unknown_code_gets_generic_message() {
    let h = harness("/signup.html");
    h.provider.fail_next(ProviderError::from_code(codes::NETWORK_REQUEST_FAILED));
    h.fill_signup("jane@x.com", "Secret123", "Secret123");
    h.flows.sign_up().await.unwrap_err();
    assert_eq!(h.message(), "An error occurred during registration. Please try again later.");
    assert!(!h.doc.submit_disabled(ids::SIGNUP_FORM));
}

#[test]
fn signup_failure_message_table() {
    assert_eq!(signup_failure_message("auth/email-already-in-use"), EMAIL_IN_USE);
    assert_eq!(signup_failure_message("auth/invalid-email"), INVALID_EMAIL);
    assert_eq!(signup_failure_message("auth/weak-password"), SIGNUP_FAILED);
}

// =============================================================
// signin
// =============================================================

#[tokio::test]
async fn signin_success_goes_to_welcome() {
    let h = harness("/login.html");
    h.provider.add_account("jane@x.com", "Secret123", None);
    h.fill_signin("jane@x.com", "Secret123");
    h.flows.sign_in().await.unwrap();
    assert_eq!(h.nav.history(), vec!["welcome.html".to_owned()]);
    assert!(h.provider.current_session().is_some());
    assert_eq!(h.message_class(), "message loading");
}

#[tokio::test]
async fn signin_failure_shows_provider_message_verbatim() {
    let h = harness("/login.html");
    h.fill_signin("jane@x.com", "nope");
    let err = h.flows.sign_in().await.unwrap_err();
    assert_eq!(err.to_string(), "Firebase: Error (auth/invalid-credential).");
    assert_eq!(h.message(), "Firebase: Error (auth/invalid-credential).");
    assert_eq!(h.message_class(), "message error");
    assert!(h.nav.history().is_empty());
}

// =============================================================
// signout
// =============================================================

#[tokio::test]
async fn signout_goes_to_login() {
    let h = harness("/welcome.html");
    h.provider.add_account("jane@x.com", "Secret123", None);
    h.provider.sign_in("jane@x.com", "Secret123").await.unwrap();
    h.flows.sign_out().await.unwrap();
    assert_eq!(h.provider.current_session(), None);
    assert_eq!(h.nav.history(), vec!["login.html".to_owned()]);
}

#[tokio::test]
async fn signout_failure_shows_message_and_stays() {
    let h = harness("/welcome.html");
    h.provider.fail_next(ProviderError { code: "auth/internal-error".into(), message: "boom".into() });
    h.flows.sign_out().await.unwrap_err();
    assert_eq!(h.message(), "boom");
    assert!(h.nav.history().is_empty());
}

// =============================================================
// live email validation
// =============================================================

#[test]
fn email_input_shows_and_clears_format_error() {
    let h = harness("/signup.html");
    assert!(!h.flows.on_email_input("jane@"));
    assert_eq!(h.message(), "Invalid email format.");
    assert!(h.flows.on_email_input("jane@x.com"));
    assert_eq!(h.message(), "");
}
