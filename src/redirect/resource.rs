//! The redirect resource: current file identifier plus its read and
//! conditional write operations.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::env::{EnvError, Environment};
use crate::redirect::target::RedirectTarget;

/// Environment variable the current file identifier is read from at boot and
/// written back to on every successful update.
pub const FILE_ID_VAR: &str = "FILE_ID";

/// Error type for [`RedirectResource::write`].
#[derive(Debug, Error)]
pub enum RedirectError {
    /// The request does not match the current state or carries no new id.
    #[error("{0}")]
    Validation(&'static str),

    /// The in-memory identifier changed but writing it to the environment failed.
    #[error("failed to set value at FILE_ID: {source}")]
    Persistence {
        #[source]
        source: EnvError,
    },
}

/// Holds the identifier of the file currently redirected to.
///
/// Reads take a lock-free snapshot. Writes serialise on `write_lock`, which is
/// held across the compare, the swap and the environment write, so a stale
/// writer always observes the newer identifier and fails its comparison.
pub struct RedirectResource {
    current: ArcSwap<String>,
    write_lock: Mutex<()>,
    env: Arc<dyn Environment>,
}

impl RedirectResource {
    /// Create a resource starting at `file_id`, persisting updates into `env`.
    pub fn new(file_id: impl Into<String>, env: Arc<dyn Environment>) -> Self {
        Self {
            current: ArcSwap::from_pointee(file_id.into()),
            write_lock: Mutex::new(()),
            env,
        }
    }

    /// Snapshot of the current file identifier.
    pub fn current_file_id(&self) -> Arc<String> {
        self.current.load_full()
    }

    /// Redirect target for the current identifier.
    pub fn read(&self) -> RedirectTarget {
        RedirectTarget::for_file(&self.current.load())
    }

    /// Repoint the redirect from `requested_current` to `new_file_id`.
    ///
    /// The caller must echo back the identifier it believes is current.
    pub fn write(
        &self,
        requested_current: &str,
        new_file_id: &str,
    ) -> Result<RedirectTarget, RedirectError> {
        if new_file_id.is_empty() {
            return Err(RedirectError::Validation("new_file_id must not be empty"));
        }

        // The target ends up in a Location header on every read.
        let target = RedirectTarget::for_file(new_file_id);
        if HeaderValue::from_str(target.as_str()).is_err() {
            return Err(RedirectError::Validation(
                "new_file_id contains characters not allowed in a redirect URL",
            ));
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        if self.current.load().as_str() != requested_current {
            return Err(RedirectError::Validation(
                "file_id does not match the current file",
            ));
        }

        self.current.store(Arc::new(new_file_id.to_string()));
        tracing::info!(file_id = %new_file_id, "Redirect target updated");

        // The in-memory update stands even if this fails.
        self.env
            .set_var(FILE_ID_VAR, new_file_id)
            .map_err(|source| RedirectError::Persistence { source })?;

        Ok(target)
    }
}
