//! CLI argument definitions using clap
//!
//! Commands:
//! - proglog serve [--config <path>] [--port <n>] [--backend memory|file] [--store <path>]
//! - proglog append --store <path> <payload>
//! - proglog read --store <path> --offset <n>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::Backend;

/// proglog - a durable, length-prefixed append-only record log
#[derive(Parser, Debug)]
#[command(name = "proglog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve a record log over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,

        /// Record log backend, overriding the configuration
        #[arg(long, value_enum)]
        backend: Option<Backend>,

        /// Store file for the file backend, overriding the configuration
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Append one record to a store file and print its offset
    Append {
        /// Path to the store file (created if missing)
        #[arg(long)]
        store: PathBuf,

        /// Record payload
        payload: String,
    },

    /// Print the payload of the record at an offset
    Read {
        /// Path to the store file
        #[arg(long)]
        store: PathBuf,

        /// Byte offset of the record
        #[arg(long)]
        offset: u64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
