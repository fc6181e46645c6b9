//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Bind listener → Spawn log-level watcher → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Server stops accepting, watcher exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Configuration errors abort before anything binds
//! - In-flight requests are left to axum's graceful shutdown

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{boot, Service, StartupError};
