//! Upstream passthrough controller.
//!
//! # Data Flow
//! ```text
//! /items route
//!     → ApiDispatcher (GET list, POST create, PUT replace)
//!     → fetch helpers → {upstream}/items
//!     → upstream JSON passed back to the client
//! ```
//!
//! # Design Decisions
//! - DELETE and OPTIONS are never registered, so they answer 405
//! - An upstream 404 maps to the controller's own not-found (404 body);
//!   any other upstream failure is unclassified (500)

pub mod controller;

pub use controller::{router, ItemPayload, Paging, ProxyController};
