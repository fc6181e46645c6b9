//! Drive redirector
//!
//! ```text
//!     Client ──GET /──────────▶ handlers::get_redirect ──308──▶ drive.google.com/file/d/{id}/view
//!
//!     Client ──PUT /{id}──▶ basic_auth ──▶ handlers::put_file_id
//!                                             │
//!                                             ▼
//!                                     RedirectResource ──▶ FILE_ID (process env)
//!
//!     LogLevelWatcher ── every 15 min ──▶ LOG_LEVEL ──▶ reload log filter
//! ```

use std::sync::Arc;

use drive_redirector::config::{Environment, ProcessEnv};
use drive_redirector::lifecycle::{self, signals};
use drive_redirector::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_handle = init_logging()?;

    tracing::info!("drive-redirector v{} starting", env!("CARGO_PKG_VERSION"));

    let env: Arc<dyn Environment> = Arc::new(ProcessEnv);
    let service = match lifecycle::boot(env, Arc::new(log_handle)).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    tracing::info!(address = %service.local_addr()?, "Listening for connections");

    service
        .run_until(async {
            match signals::wait_for_termination().await {
                Ok(signal) => tracing::info!(signal, "Quit received"),
                Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signals"),
            }
        })
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
