//! Drive redirector library.
//!
//! Redirects `GET /` to a Google Drive file and lets an authenticated client
//! repoint it with `PUT /{file_id}`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;
pub mod security;

pub use config::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::RedirectResource;
