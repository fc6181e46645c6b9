//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs (fmt layer behind a reloadable filter)
//!
//! watcher.rs:
//!     every 15 minutes → read LOG_LEVEL → reload filter
//! ```
//!
//! # Design Decisions
//! - Verbosity changes at runtime without restarting
//! - Per-request spans come from tower-http's TraceLayer

pub mod logging;
pub mod watcher;

pub use logging::{init_logging, LevelSink, LogHandle, LogLevel, LoggingError};
pub use watcher::LogLevelWatcher;
