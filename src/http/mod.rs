//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → GET /           → handlers.rs get_redirect
//!     → PUT /{file_id}  → security::basic_auth → handlers.rs put_file_id
//!     → response.rs (error → status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::{AppState, HttpServer};
