//! Identity provider seam and its implementations.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provider` defines the contract the flows rely on, `rest` talks to an
//! Identity Toolkit service over HTTP, and `memory` keeps accounts in-process.

pub mod memory;
pub mod provider;
pub mod rest;
