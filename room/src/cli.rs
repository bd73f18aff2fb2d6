//! Command-line interface for the room server binary.

use clap::Parser;
use std::path::PathBuf;

/// Authoritative hold'em table server.
#[derive(Parser, Debug)]
#[command(name = "holdem-room-server", version, about)]
pub struct ServerCli {
    /// Path to the TOML config file (created with defaults if missing).
    #[arg(long, default_value = "holdem_room.toml")]
    pub config: PathBuf,

    /// Override the configured deck RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the configured port to bind.
    #[arg(long)]
    pub port: Option<u16>,

    /// Persist CLI overrides back into the config file.
    #[arg(long, default_value_t = false)]
    pub persist: bool,
}
