use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Cached text-to-speech link service
#[derive(Debug, Parser)]
#[command(name = "recite", about = "Synthesize text once, serve expiring links to audio and speech marks")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "recite.toml", env = "RECITE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "RECITE_LISTEN")]
    pub listen: Option<SocketAddr>,
}
