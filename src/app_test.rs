use super::*;
use crate::net::memory::InMemoryProvider;
use crate::state::route::MemoryNavigator;
use crate::state::storage::MemoryStore;
use crate::ui::dom::{MemoryDocument, ids};

struct Harness {
    doc: Rc<MemoryDocument>,
    provider: Rc<InMemoryProvider>,
    nav: Rc<MemoryNavigator>,
    app: App,
}

fn harness(path: &str) -> Harness {
    let doc = Rc::new(MemoryDocument::full_page());
    let provider = Rc::new(InMemoryProvider::new());
    let nav = Rc::new(MemoryNavigator::at(path));
    let app = App::new(provider.clone(), doc.clone(), Rc::new(MemoryStore::new()), nav.clone());
    Harness { doc, provider, nav, app }
}

#[test]
fn mount_subscribes_once() {
    let h = harness("/login.html");
    assert!(h.app.mount());
    assert!(!h.app.mount());
    assert!(h.app.is_mounted());
    h.app.unmount();
    assert!(!h.app.is_mounted());
}

#[test]
fn mount_on_protected_page_without_session_redirects_to_login() {
    let h = harness("/welcome.html");
    h.app.mount();
    assert_eq!(h.nav.history(), vec!["login.html".to_owned()]);
}

#[tokio::test]
async fn signin_fast_path_and_observer_redirect_only_once() {
    let h = harness("/login.html");
    h.provider.add_account("jane@x.com", "Secret123", None);
    h.app.mount();

    h.doc.set_field(ids::SIGNIN_FORM, "email", "jane@x.com");
    h.doc.set_field(ids::SIGNIN_FORM, "password", "Secret123");
    h.app.flows().sign_in().await.unwrap();

    assert_eq!(h.nav.history(), vec!["welcome.html".to_owned()]);
    assert_eq!(h.doc.text(ids::USERNAME_DISPLAY).as_deref(), Some("jane"));
}

#[tokio::test]
async fn signout_fast_path_and_observer_redirect_only_once() {
    let h = harness("/welcome.html");
    h.provider.add_account("jane@x.com", "Secret123", None);
    h.provider.sign_in("jane@x.com", "Secret123").await.unwrap();
    h.app.mount();

    h.app.flows().sign_out().await.unwrap();
    assert_eq!(h.nav.history(), vec!["login.html".to_owned()]);
}

#[tokio::test]
async fn unmounted_app_ignores_session_changes() {
    let h = harness("/login.html");
    h.provider.add_account("jane@x.com", "Secret123", None);
    h.app.mount();
    h.app.unmount();
    h.provider.sign_in("jane@x.com", "Secret123").await.unwrap();
    assert_eq!(h.doc.text(ids::USERNAME_DISPLAY).as_deref(), Some(""));
}
