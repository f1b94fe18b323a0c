//! Page rendering seam and the message region.
//!
//! ARCHITECTURE
//! ============
//! `dom` defines what the flows may touch on a page; `message` owns the one
//! shared status region every flow reports through.

pub mod dom;
pub mod message;
