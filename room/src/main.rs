//! Main entry point for the hold'em room server.

use anyhow::Context;
use clap::Parser;
use std::net::{SocketAddr, TcpListener};

use holdem_room::cli::ServerCli;
use holdem_room::config::Config;
use holdem_room::room::Room;
use holdem_room::server::{run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ServerCli::parse();

    // Load or create the config file, then overlay environment and CLI.
    let mut cfg = Config::load_or_create(&cli.config)
        .with_context(|| format!("loading or creating config '{}'", cli.config.display()))?;
    cfg.apply_env();
    if let Some(seed) = cli.seed {
        cfg.seed = Some(seed);
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }

    // Persist overrides only if requested
    if cli.persist {
        cfg.save(&cli.config)
            .with_context(|| format!("saving updated config '{}'", cli.config.display()))?;
    }

    // Initialize tracing; RUST_LOG wins over the configured LOG_LEVEL.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cfg.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let room = Room::new(&cfg, cfg.seed);
    let state = AppState::new(room);

    let port = find_available_port(cfg.port)
        .map_err(|e| anyhow::anyhow!("could not find an available port: {e}"))?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!(port, table = %cfg.table_id, "starting room server");
    if port != cfg.port {
        tracing::warn!(port, "requested port was not available, using alternative");
    }

    run_server(addr, state).await
}

/// Find the first available port starting from the given port number.
fn find_available_port(start_port: u16) -> anyhow::Result<u16> {
    for port in start_port..start_port.saturating_add(100) {
        if TcpListener::bind(("127.0.0.1", port)).is_ok() {
            return Ok(port);
        }
    }
    Err(anyhow::anyhow!(
        "no available ports found in range {}..{}",
        start_port,
        start_port.saturating_add(100)
    ))
}
