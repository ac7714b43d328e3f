use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docstore",
    about = "Minimal document store with an indexed query API",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Create or update a login user in a disk-backed store
    AddUser(AddUserArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the configured bind address
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
    /// Serve from a disk store at this path, overriding the configured backend
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

#[derive(Args)]
pub struct AddUserArgs {
    /// Root directory of the disk store
    #[arg(short, long)]
    pub data: PathBuf,
    pub username: String,
    pub password: String,
    /// Group to add the user to (repeatable)
    #[arg(short, long)]
    pub group: Vec<String>,
}
