//! Pure helpers shared by the flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Nothing here touches the page, storage, or network, which keeps input rules
//! and encodings testable without any browser seam.

pub mod data_url;
pub mod form;
pub mod validate;
