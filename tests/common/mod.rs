//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use drive_redirector::config::MemoryEnv;
use drive_redirector::lifecycle::{self, StartupError};
use drive_redirector::observability::{LevelSink, LoggingError};
use reqwest::redirect::Policy;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing_subscriber::filter::LevelFilter;

/// "c2VjcmV0" is base64 for "secret".
pub const PASSWORD_B64: &str = "c2VjcmV0";

/// Sink that ignores level changes.
pub struct NullSink;

impl LevelSink for NullSink {
    fn set_level(&self, _level: LevelFilter) -> Result<(), LoggingError> {
        Ok(())
    }
}

/// Environment for a redirector pointing at `file_id`, on an ephemeral port.
pub fn test_env(file_id: &str) -> Arc<MemoryEnv> {
    Arc::new(MemoryEnv::from_pairs([
        ("FILE_ID", file_id),
        ("AUTH_USER", "admin"),
        ("AUTH_PASSWORD", PASSWORD_B64),
        ("BIND_ADDRESS", "127.0.0.1:0"),
    ]))
}

/// A running redirector and the means to stop it.
pub struct TestService {
    pub addr: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), StartupError>>,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(mut self) -> Result<(), StartupError> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.handle.await.expect("service task panicked")
    }
}

/// Boot the service against `env` and start serving.
pub async fn start(env: Arc<MemoryEnv>) -> TestService {
    let service = lifecycle::boot(env, Arc::new(NullSink))
        .await
        .expect("service boots");
    let addr = service.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(service.run_until(async move {
        let _ = stopped.await;
    }));

    TestService {
        addr,
        stop: Some(stop),
        handle,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
