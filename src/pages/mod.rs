//! Page-level flows triggered by user events and provider pushes.
//!
//! ARCHITECTURE
//! ============
//! Each flow owns its orchestration (read input, call the provider, render
//! the outcome, navigate) and delegates rendering to `ui` and routing to
//! `state::route`.

pub mod auth_flow;
pub mod profile_image;
pub mod session_observer;
