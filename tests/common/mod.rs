//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use shell_gateway::config::GatewayConfig;
use shell_gateway::lifecycle::{self, Shutdown};
use tempfile::TempDir;

/// A gateway running on an ephemeral port, stopped on drop.
pub struct TestGateway {
    pub addr: SocketAddr,
    _endpoints_dir: TempDir,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Write one endpoint definition file into `dir`.
pub fn write_endpoint(dir: &Path, name: &str, definition: serde_json::Value) {
    std::fs::write(dir.join(name), definition.to_string()).unwrap();
}

/// Start a gateway serving the given `(file name, definition)` pairs.
pub async fn start_gateway(endpoints: Vec<(&str, serde_json::Value)>) -> TestGateway {
    let endpoints_dir = tempfile::tempdir().unwrap();
    for (name, definition) in endpoints {
        write_endpoint(endpoints_dir.path(), name, definition);
    }

    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.endpoints.dir = endpoints_dir.path().display().to_string();

    let (server, listener) = lifecycle::start(config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestGateway {
        addr,
        _endpoints_dir: endpoints_dir,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
