use super::*;
use crate::net::memory::InMemoryProvider;
use crate::state::route::{MemoryNavigator, Navigator};
use crate::state::storage::{MemoryStore, profile_image_key};
use crate::ui::dom::MemoryDocument;

struct Harness {
    doc: Rc<MemoryDocument>,
    store: Rc<MemoryStore>,
    nav: Rc<MemoryNavigator>,
    observer: SessionObserver,
}

fn harness(path: &str) -> Harness {
    let doc = Rc::new(MemoryDocument::full_page());
    let store = Rc::new(MemoryStore::new());
    let nav = Rc::new(MemoryNavigator::at(path));
    let observer = SessionObserver::new(doc.clone(), store.clone(), Redirector::new(nav.clone()));
    Harness { doc, store, nav, observer }
}

fn session(email: &str, display_name: Option<&str>) -> Session {
    Session { uid: "U".into(), email: email.into(), display_name: display_name.map(str::to_owned) }
}

#[test]
fn display_name_prefers_session_name() {
    assert_eq!(display_name(&session("jane@x.com", Some("Jane Doe"))), "Jane Doe");
}

#[test]
fn display_name_falls_back_to_email_local_part() {
    assert_eq!(display_name(&session("jane@x.com", None)), "jane");
    assert_eq!(display_name(&session("jane@x.com", Some(""))), "jane");
    assert_eq!(display_name(&session("nodomain", None)), "nodomain");
}

#[test]
fn signed_in_shows_username_and_redirects_to_welcome() {
    let h = harness("/login.html");
    h.observer.on_change(Some(&session("jane@x.com", None)));
    assert_eq!(h.doc.text(ids::USERNAME_DISPLAY).as_deref(), Some("jane"));
    assert_eq!(h.nav.history(), vec!["welcome.html".to_owned()]);
}

#[test]
fn signed_in_on_welcome_stays_put() {
    let h = harness("/app/welcome.html");
    h.observer.on_change(Some(&session("jane@x.com", None)));
    assert!(h.nav.history().is_empty());
}

#[test]
fn signed_in_loads_stored_profile_image() {
    let h = harness("/welcome.html");
    h.store.set(&profile_image_key("U"), "data:image/png;base64,AA==").unwrap();
    h.observer.on_change(Some(&session("jane@x.com", None)));
    assert_eq!(h.doc.image_source(ids::IMAGE_PREVIEW).as_deref(), Some("data:image/png;base64,AA=="));
    assert_eq!(h.doc.image_source(ids::LOGO_IMAGE).as_deref(), Some("data:image/png;base64,AA=="));
    assert_eq!(h.doc.display(ids::IMAGE_PREVIEW).as_deref(), Some("block"));
}

#[test]
fn signed_in_without_image_leaves_logo_alone() {
    let h = harness("/welcome.html");
    h.observer.on_change(Some(&session("jane@x.com", None)));
    assert_eq!(h.doc.image_source(ids::LOGO_IMAGE), None);
}

#[test]
fn signed_in_page_without_username_region_is_fine() {
    let doc = Rc::new(MemoryDocument::new());
    let nav = Rc::new(MemoryNavigator::at("/login.html"));
    let observer = SessionObserver::new(doc.clone(), Rc::new(MemoryStore::new()), Redirector::new(nav.clone()));
    observer.on_change(Some(&session("jane@x.com", None)));
    assert_eq!(nav.history(), vec!["welcome.html".to_owned()]);
}

#[test]
fn signed_out_on_signup_does_not_navigate() {
    let h = harness("/signup.html");
    h.observer.on_change(None);
    assert!(h.nav.history().is_empty());
}

#[test]
fn signed_out_on_login_does_not_navigate() {
    let h = harness("/login.html");
    h.observer.on_change(None);
    assert!(h.nav.history().is_empty());
}

#[test]
fn signed_out_elsewhere_goes_to_login() {
    let h = harness("/welcome.html");
    h.observer.on_change(None);
    assert_eq!(h.nav.history(), vec!["login.html".to_owned()]);
}

#[tokio::test]
async fn subscribe_runs_now_and_on_every_change() {
    let h = harness("/index.html");
    let provider = InMemoryProvider::new();
    provider.add_account("jane@x.com", "Secret123", Some("Jane"));

    let _sub = h.observer.clone().subscribe(&provider);
    assert_eq!(h.nav.history(), vec!["login.html".to_owned()]);

    provider.sign_in("jane@x.com", "Secret123").await.unwrap();
    assert_eq!(h.doc.text(ids::USERNAME_DISPLAY).as_deref(), Some("Jane"));
    assert_eq!(h.nav.current_path(), "welcome.html");

    provider.sign_out().await.unwrap();
    assert_eq!(
        h.nav.history(),
        vec!["login.html".to_owned(), "welcome.html".to_owned(), "login.html".to_owned()]
    );
}
