//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! PUT request:
//!     → basic_auth.rs (Authorization header → Credentials → compare)
//!     → 401 on anything but an exact match
//!     → Pass to the write handler
//! ```
//!
//! # Design Decisions
//! - A single static credential pair from configuration
//! - Fail closed: missing or malformed headers are rejected
//! - Plain equality; no constant-time comparison

pub mod basic_auth;

pub use basic_auth::{basic_auth_middleware, Credentials};
