//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(name = "trustwipe")]
#[command(about = "Secure-erase orchestrator for removable storage", version)]
pub struct Cli {
    /// Configuration file (TOML). Missing file means defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the log filter (`TW_LOG_LEVEL` / `RUST_LOG`).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List wipe candidates
    Drives {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one candidate
    Details {
        /// Device identifier, e.g. /dev/sdb
        id: String,
    },
    /// Report whether this platform is supported
    Os,
    /// Platform, architecture and privilege level
    Info,
    /// Engine status
    Status,
    /// Erase a device after confirmation
    Wipe {
        /// Device identifier, e.g. /dev/sdb
        #[arg(short, long)]
        device: String,

        /// `sanitize` or `overwrite`
        #[arg(short, long, default_value = "overwrite")]
        method: String,

        #[arg(short, long)]
        username: String,

        /// Rate-limiting identity; defaults to the username
        #[arg(long)]
        requester: Option<String>,
    },
}
