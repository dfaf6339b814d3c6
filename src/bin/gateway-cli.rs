use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use shell_gateway::endpoint::{EndpointSummary, Registry};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Operator tooling for the shell gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate every endpoint definition
    Check {
        #[arg(short, long, env = "CONFIG_DIR", default_value = "./conf")]
        dir: PathBuf,
    },
    /// List loaded endpoints in match order
    List {
        #[arg(short, long, env = "CONFIG_DIR", default_value = "./conf")]
        dir: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Probe a running gateway's health endpoint
    Health {
        #[arg(short, long, default_value = "http://10.8.0.1:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { dir } => check(&dir),
        Commands::List { dir, json } => list(&dir, json),
        Commands::Health { url } => health(&url).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::load_dir(dir)?;
    println!("{} endpoints OK in {}", registry.len(), dir.display());
    Ok(())
}

fn list(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::load_dir(dir)?;
    let summaries: Vec<EndpointSummary> = registry.endpoints().iter().map(|e| e.summary()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{:<8} {:<32} {:<6} {:<5} {:<16} ABOUT", "METHOD", "URI", "TTL", "ERR", "AUTH HEADER");
    for s in summaries {
        println!(
            "{:<8} {:<32} {:<6} {:<5} {:<16} {}",
            s.method,
            s.uri,
            s.ttl,
            s.error,
            s.auth_header,
            s.about.unwrap_or_default()
        );
    }
    Ok(())
}

async fn health(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let res = reqwest::get(format!("{}/health", url.trim_end_matches('/'))).await?;
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(format!("gateway returned status {}: {}", status, body.trim()).into());
    }
    println!("{} {}", status, body.trim());
    Ok(())
}
