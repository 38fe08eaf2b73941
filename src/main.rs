//! Plugin Server
//!
//! Registers the built-in plugins on an axum server and serves them.
//!
//! # Architecture Overview
//!
//! ```text
//!   config (file, env, flags)
//!        │
//!        ▼
//!   ┌───────────┐   register (sequential, timed)   ┌────────────┐
//!   │ Bootstrap │ ───────────────────────────────▶ │   Server   │
//!   └───────────┘                                   │ RouteTable │
//!        │  top plugin            → /plugin-top     └─────┬──────┘
//!        │  external plugin       → /plugins/...          │ start()
//!        │  direct routes         → /                     ▼
//!        │                                         ┌───────────────┐
//!        └────────────────────────────────────────▶│ RunningServer │──▶ clients
//!                                                  └───────────────┘
//! ```
//!
//! Any startup failure is printed and the process exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use plugin_server::config::{self, ServerConfig};
use plugin_server::lifecycle::{application, Shutdown};
use plugin_server::observability;

#[derive(Parser)]
#[command(name = "plugin-server")]
#[command(about = "HTTP server assembled from route plugins", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind, overriding config and environment.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding config and environment.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };
    let mut config = config::apply_env_overrides(config, |key| std::env::var(key).ok())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    observability::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        prefix = config.plugins.prefix.as_deref().unwrap_or(""),
        "plugin-server starting"
    );

    let server = application(config)?.launch().await?;
    println!("Server running at: {}", server.info().uri);

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
