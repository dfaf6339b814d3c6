//! Shell gateway server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                    SHELL GATEWAY                     │
//!                    │                                                      │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌──────────┐             │
//!   ─────────────────┼─▶│  http  │──▶│ routing │──▶│ security │             │
//!                    │  │ server │   │  match  │   │   auth   │             │
//!                    │  └────────┘   └─────────┘   └────┬─────┘             │
//!                    │                                  ▼                   │
//!                    │               ┌──────────┐   ┌──────────┐            │
//!                    │               │ template │◀──│  params  │            │
//!                    │               │  expand  │   │ resolve  │            │
//!                    │               └────┬─────┘   └──────────┘            │
//!                    │                    ▼                                 │
//!   Client Response  │  ┌──────────┐   ┌──────┐                             │
//!   ◀────────────────┼──│ response │◀──│ exec │──── child process (PATH only)│
//!                    │  └──────────┘   └──────┘                             │
//!                    │                                                      │
//!                    │  config · endpoint registry · observability · lifecycle
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use shell_gateway::config::loader::{apply_process_env, load_config};
use shell_gateway::config::GatewayConfig;
use shell_gateway::lifecycle::{self, signals, Shutdown};
use shell_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "shell-gateway")]
#[command(about = "HTTP gateway mapping endpoints to shell commands", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address (IP:port), overrides config and LISTEN_ADDR.
    #[arg(short, long)]
    listen: Option<String>,

    /// Endpoint definitions directory, overrides config and CONFIG_DIR.
    #[arg(short, long)]
    endpoints_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    apply_process_env(&mut config);
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }
    if let Some(dir) = cli.endpoints_dir {
        config.endpoints.dir = dir;
    }

    logging::init_logging(&config.observability);
    tracing::info!("shell-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let (server, listener) = match lifecycle::start(config).await {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
