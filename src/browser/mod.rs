//! Browser entry point.
//!
//! `start` is called once per page load from the page's module script with
//! the provider config JSON. It builds the [`App`] over the live page,
//! attaches listeners to whichever known elements the page carries, and
//! subscribes the session observer.

pub mod dom;
pub mod file;
pub mod storage;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use self::dom::BrowserDocument;
use self::file::BrowserFile;
use self::storage::{LocalStorage, LocationNavigator};
use crate::app::App;
use crate::config::ProviderConfig;
use crate::net::rest::RestIdentityProvider;
use crate::state::storage::{KeyValueStore, MemoryStore};
use crate::ui::dom::ids;

/// Wire the current page. Safe to call on any of the pages.
///
/// # Errors
///
/// Returns a JS error if the config is invalid, there is no `window`, or a
/// listener cannot be attached.
#[wasm_bindgen]
pub fn start(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        tracing::debug!("console logger already installed");
    }

    let config = ProviderConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let store: Rc<dyn KeyValueStore> = match LocalStorage::from_window(&window) {
        Some(storage) => Rc::new(storage),
        None => {
            tracing::warn!("localStorage unavailable; state will not persist");
            Rc::new(MemoryStore::new())
        }
    };
    let provider = Rc::new(RestIdentityProvider::new(config, store.clone()));
    let page = Rc::new(BrowserDocument::new(document));
    let navigator = Rc::new(LocationNavigator::new(&window));
    let app = Rc::new(App::new(provider, page.clone(), store, navigator));

    attach_listeners(&app, &page)?;
    app.mount();
    tracing::info!(path = %window.location().pathname().unwrap_or_default(), "page wired");
    Ok(())
}

/// Register `handler` for `event` on `target` for the page's lifetime.
fn listen(target: &web_sys::Element, event: &str, handler: impl FnMut(web_sys::Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn attach_listeners(app: &Rc<App>, page: &Rc<BrowserDocument>) -> Result<(), JsValue> {
    if let Some(form) = page.element(ids::SIGNUP_FORM) {
        let app = app.clone();
        listen(&form, "submit", move |ev| {
            ev.prevent_default();
            let app = app.clone();
            spawn_local(async move {
                if let Err(e) = app.flows().sign_up().await {
                    tracing::debug!(error = %e, "signup did not complete");
                }
            });
        })?;
    }

    if let Some(email) = page.field(ids::SIGNUP_FORM, "email") {
        let app = app.clone();
        let input = email.clone();
        listen(&email, "input", move |_| {
            app.flows().on_email_input(&input.value());
        })?;
    }

    if let Some(form) = page.element(ids::SIGNIN_FORM) {
        let app = app.clone();
        listen(&form, "submit", move |ev| {
            ev.prevent_default();
            let app = app.clone();
            spawn_local(async move {
                if let Err(e) = app.flows().sign_in().await {
                    tracing::debug!(error = %e, "signin did not complete");
                }
            });
        })?;
    }

    if let Some(button) = page.element(ids::SIGNOUT_BUTTON) {
        let app = app.clone();
        listen(&button, "click", move |_| {
            let app = app.clone();
            spawn_local(async move {
                if let Err(e) = app.flows().sign_out().await {
                    tracing::debug!(error = %e, "signout did not complete");
                }
            });
        })?;
    }

    if let Some(input) = page
        .element(ids::PROFILE_IMAGE_FILE)
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    {
        let app = app.clone();
        let picker = input.clone();
        listen(&input, "change", move |_| {
            let Some(file) = picker.files().and_then(|files| files.get(0)) else {
                return;
            };
            let app = app.clone();
            spawn_local(async move {
                let file = BrowserFile::new(file);
                if let Err(e) = app.profile_images().upload(&file).await {
                    tracing::debug!(error = %e, "profile image upload did not complete");
                }
            });
        })?;
    }

    if let Some(button) = page.element(ids::REMOVE_PROFILE_IMAGE_BUTTON) {
        let app = app.clone();
        listen(&button, "click", move |_| {
            if let Err(e) = app.profile_images().remove() {
                tracing::debug!(error = %e, "profile image removal did not complete");
            }
        })?;
    }

    Ok(())
}
