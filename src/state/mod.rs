//! Local state seams: key-value storage and page routing.
//!
//! DESIGN
//! ======
//! Session state is owned by the identity provider. What lives here is only
//! the persistent store for profile images (and the provider's own session
//! record) plus knowledge of which page is showing.

pub mod route;
pub mod storage;
