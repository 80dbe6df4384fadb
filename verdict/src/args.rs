use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Verdict sample API server
#[derive(Debug, Parser)]
#[command(name = "verdict", about = "JSON API with uniform error envelopes")]
pub struct Args {
    /// Path to configuration file; built-in defaults apply when omitted
    #[arg(short, long, env = "VERDICT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "VERDICT_LISTEN")]
    pub listen: Option<SocketAddr>,
}
