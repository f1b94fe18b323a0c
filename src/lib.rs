//! # authgate
//!
//! Client-side authentication glue for static HTML pages backed by a
//! Firebase-compatible identity provider.
//!
//! The crate wires the signup/signin forms and the signout button to the
//! provider, validates form input, reflects the session into the page, and keeps
//! a profile image in local storage. All browser access goes through small
//! traits (`Document`, `KeyValueStore`, `Navigator`, `IdentityProvider`) so the
//! same flows run under WASM (`browser` feature) and natively.

pub mod app;
#[cfg(feature = "browser")]
pub mod browser;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod ui;
pub mod util;

pub use app::App;
pub use config::ProviderConfig;
pub use error::FlowError;
