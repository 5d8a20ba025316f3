use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "relayer",
    about = "Activity relayer for Arc Stable Toolbox, mirrored to Linera",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file; environment variables override its values
    #[arg(short, long, global = true, env = "RELAYER_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP relayer
    Serve(ServeArgs),
    /// Check a JSON payload against the event or status-update schema
    Validate(ValidateArgs),
    /// Print the resolved Linera application endpoint
    Endpoint,
    /// Query the Linera application for an actor's events
    Events(EventsArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on, overriding config and environment
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// JSON file to check
    pub file: PathBuf,
    /// Treat the payload as a status update instead of an event
    #[arg(long)]
    pub status: bool,
}

#[derive(Args)]
pub struct EventsArgs {
    #[arg(long)]
    pub actor: String,
    #[arg(long)]
    pub limit: Option<i64>,
    #[arg(long)]
    pub cursor: Option<String>,
}
