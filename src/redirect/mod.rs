//! Redirect subsystem.
//!
//! # Data Flow
//! ```text
//! GET /            → resource.rs read()  → target.rs (Drive viewer URL)
//! PUT /{file_id}   → resource.rs write() → compare, swap, persist FILE_ID
//! ```
//!
//! # Design Decisions
//! - One resource instance, shared via Arc and injected into handlers
//! - No history: the previous identifier is dropped on every update
//! - Environment write-through is the only persistence

pub mod resource;
pub mod target;

pub use resource::{RedirectError, RedirectResource, FILE_ID_VAR};
pub use target::RedirectTarget;
