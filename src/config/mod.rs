//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → env.rs (Environment trait: ProcessEnv / MemoryEnv)
//!     → schema.rs (EnvRecord field tags → FieldSpec)
//!     → loader.rs (resolve, default, base64 decode)
//!     → validation.rs (name pattern, schema shape, non-empty values)
//!     → RedirectorConfig (immutable snapshot taken at boot)
//! ```
//!
//! # Design Decisions
//! - Records describe their fields declaratively; no runtime introspection
//! - Config is loaded once; any error aborts startup
//! - The same Environment handle is written back to when the file id changes

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{EnvError, Environment, MemoryEnv, ProcessEnv};
pub use loader::{load, load_config, ConfigError};
pub use schema::{EnvRecord, FieldSpec, RedirectorConfig, ResolvedFields};
