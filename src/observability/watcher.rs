//! Periodic `LOG_LEVEL` watcher.
//!
//! # Responsibilities
//! - Re-read `LOG_LEVEL` on a fixed interval
//! - Apply the resolved level to the log filter
//! - Never exit on its own; stop only on shutdown

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::config::Environment;
use crate::lifecycle::ShutdownSignal;
use crate::observability::logging::{LevelSink, LevelSource};

/// Variable holding the desired log level.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// How often `LOG_LEVEL` is re-read.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15 * 60);

pub struct LogLevelWatcher {
    env: Arc<dyn Environment>,
    sink: Arc<dyn LevelSink>,
    interval: Duration,
}

impl LogLevelWatcher {
    pub fn new(env: Arc<dyn Environment>, sink: Arc<dyn LevelSink>) -> Self {
        Self {
            env,
            sink,
            interval: POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Read `LOG_LEVEL` once and apply it. Failures are logged, not returned.
    pub fn poll(&self) -> LevelSource {
        let source = LevelSource::resolve(self.env.var(LOG_LEVEL_VAR).as_deref());
        let level = source.filter();

        if let Err(e) = self.sink.set_level(level) {
            tracing::error!(error = %e, "Failed to apply log level");
            return source;
        }

        match &source {
            LevelSource::Unset => {
                tracing::info!("LOG_LEVEL is not set; defaulting to DEBUG");
            }
            LevelSource::Named(named) => {
                tracing::debug!(level = ?named, "Log level applied");
            }
            LevelSource::Unrecognized(value) => {
                tracing::warn!(value = %value, "Unrecognized LOG_LEVEL; emitting all levels");
            }
        }
        source
    }

    /// Poll immediately, then every interval, until `shutdown` fires.
    pub async fn run(self, mut shutdown: ShutdownSignal) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Log level watcher starting");

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Log level watcher received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
