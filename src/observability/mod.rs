//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; the subscriber is initialized by the
//!   binary, never by the library
//! - Metrics are cheap (atomic increments) and recorded per handled request
//! - Request IDs come from the router's middleware stack and flow through
//!   `tower-http`'s trace layer

pub mod metrics;
