//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the layered configuration
//! - Load and compile the endpoint registry
//! - Start the metrics exporter when enabled
//! - Bind the listener last, so traffic arrives only when ready

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::loader::{validated, ConfigError};
use crate::config::GatewayConfig;
use crate::endpoint::{LoadError, Registry};
use crate::http::GatewayServer;
use crate::observability::metrics;

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("load endpoints: {0}")]
    Registry(#[from] LoadError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Prepare a server and its bound listener from a layered configuration.
pub async fn start(config: GatewayConfig) -> Result<(GatewayServer, TcpListener), StartupError> {
    let config = validated(config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoints_dir = %config.endpoints.dir,
        "Configuration loaded"
    );

    let registry = Registry::load_dir(Path::new(&config.endpoints.dir))?;

    if config.observability.metrics_enabled {
        // Validated above.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr);
        }
    }

    let server = GatewayServer::new(&config, registry);

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.listener.bind_address.clone(),
            source,
        })?;

    Ok((server, listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_config_fails_before_loading() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        assert!(matches!(start(config).await, Err(StartupError::Config(_))));
    }

    #[tokio::test]
    async fn test_empty_endpoint_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.endpoints.dir = dir.path().display().to_string();
        match start(config).await {
            Err(StartupError::Registry(LoadError::Empty(_))) => {}
            other => panic!("expected empty registry error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_start_binds_listener() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("echo.json"),
            r#"{"uri":"/echo","method":"GET","auth":"X-Token:abc","script":["echo","hi"]}"#,
        )
        .unwrap();
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.endpoints.dir = dir.path().display().to_string();

        let (server, listener) = start(config).await.unwrap();
        assert_eq!(server.registry().len(), 1);
        assert!(listener.local_addr().unwrap().port() > 0);
    }
}
