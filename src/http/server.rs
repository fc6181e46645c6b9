//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect handlers
//! - Guard the write route with basic auth
//! - Wire up middleware (tracing, request ID, timeout)
//! - Bind server to listener and stop on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{Environment, RedirectorConfig};
use crate::http::handlers::{get_redirect, put_file_id};
use crate::lifecycle::ShutdownSignal;
use crate::redirect::RedirectResource;
use crate::security::basic_auth::{basic_auth_middleware, Credentials};

/// Upper bound on the time spent handling a single request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resource: Arc<RedirectResource>,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
    resource: Arc<RedirectResource>,
}

impl HttpServer {
    /// Create a server starting at the configured file id. Updates are
    /// persisted into `env`.
    pub fn new(config: &RedirectorConfig, env: Arc<dyn Environment>) -> Self {
        let resource = Arc::new(RedirectResource::new(config.file_id.clone(), env));
        let credentials = Arc::new(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ));

        let state = AppState {
            resource: resource.clone(),
        };
        let router = Self::build_router(state, credentials);

        Self { router, resource }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, credentials: Arc<Credentials>) -> Router {
        Router::new()
            .route("/", get(get_redirect))
            .route(
                "/{file_id}",
                put(put_file_id).route_layer(middleware::from_fn_with_state(
                    credentials,
                    basic_auth_middleware,
                )),
            )
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
            )
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The shared redirect resource.
    pub fn resource(&self) -> Arc<RedirectResource> {
        self.resource.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
