//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration (fail fast: any error is fatal)
//! - Bind the listener
//! - Run the HTTP server and the log-level watcher side by side
//! - Stop both when the termination future resolves

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, Environment};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::logging::LevelSink;
use crate::observability::watcher::LogLevelWatcher;

/// Error type for booting and running the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server failed: {0}")]
    Server(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A configured, bound service that has not started serving yet.
pub struct Service {
    listener: TcpListener,
    server: HttpServer,
    watcher: LogLevelWatcher,
}

/// Load configuration from `env` and bind the listener.
pub async fn boot(
    env: Arc<dyn Environment>,
    log_sink: Arc<dyn LevelSink>,
) -> Result<Service, StartupError> {
    let config = load_config(env.as_ref())?;
    tracing::info!(
        bind_address = %config.bind_address,
        file_id = %config.file_id,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;

    let server = HttpServer::new(&config, env.clone());
    let watcher = LogLevelWatcher::new(env, log_sink);

    Ok(Service {
        listener,
        server,
        watcher,
    })
}

impl Service {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `termination` resolves or the server fails.
    pub async fn run_until<F>(self, termination: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()>,
    {
        let shutdown = Shutdown::new();

        let watcher_task = tokio::spawn(self.watcher.run(shutdown.subscribe()));
        let mut server_task = tokio::spawn(self.server.run(self.listener, shutdown.subscribe()));

        tracing::info!("Waiting for quit");
        let early_exit = tokio::select! {
            _ = termination => None,
            res = &mut server_task => Some(res),
        };

        shutdown.trigger();
        let server_result = match early_exit {
            Some(res) => res,
            None => server_task.await,
        };
        watcher_task.await?;
        server_result??;

        Ok(())
    }
}
