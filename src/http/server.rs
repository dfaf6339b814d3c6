//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health probe and the dispatch fallback
//! - Wire up middleware (tracing, request ID)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::endpoint::Registry;
use crate::exec::Executor;
use crate::http::handler::{dispatch, health};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// Application state injected into handlers.
///
/// Both members are immutable after startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub executor: Arc<Executor>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    registry: Arc<Registry>,
}

impl GatewayServer {
    /// Create a server serving `registry` with the given configuration.
    pub fn new(config: &GatewayConfig, registry: Registry) -> Self {
        let registry = Arc::new(registry);
        let state = AppState {
            registry: registry.clone(),
            executor: Arc::new(Executor::new(config.exec.path.clone())),
        };

        Self {
            router: Self::build_router(state),
            registry,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", any(health))
            .fallback(dispatch)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The loaded registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run the server, accepting connections until `shutdown` fires.
    ///
    /// In-flight requests are drained before returning.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            endpoints = self.registry.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
