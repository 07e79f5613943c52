//! Runtime configuration
//!
//! Resolution follows the usual priority order: command-line argument,
//! then environment variable, then compiled default. The clap `env`
//! attribute on the CLI args covers the first two tiers; the defaults
//! live here.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default ledger location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./music_league.db";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 4040;

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn new(db_path: PathBuf, port: u16) -> Self {
        Self {
            db_path,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], port)),
        }
    }
}
