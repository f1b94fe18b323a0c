//! Error taxonomy for user-triggered flows.
//!
//! ERROR HANDLING
//! ==============
//! `Display` on every variant is the exact text shown in the message region, so
//! flows present errors with `to_string()` and never build messages twice.

use crate::net::provider::ProviderError;
use crate::state::storage::StoreError;
use crate::util::data_url::ReadError;
use crate::util::validate::ValidationError;

/// Failure of one user action (form submit, button click, file pick).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Local input check failed; the provider was never called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The identity provider rejected the request.
    #[error("{}", .0.message)]
    Provider(#[from] ProviderError),

    /// The action needs a signed-in user and there is none.
    #[error("No user signed in. Please sign in again.")]
    NotSignedIn,

    /// The selected file could not be read.
    #[error("Error reading profile image file.")]
    Read(#[from] ReadError),

    /// Local storage did not accept the change (usually over quota).
    #[error("Error saving profile image to local storage. It may be full.")]
    Store(#[from] StoreError),
}
