//! CLI module for proglog
//!
//! Provides command-line interface for:
//! - serve: Serve a record log over HTTP
//! - append: Append one record to a store file
//! - read: Read one record from a store file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{append, open_log, read, run, run_command, serve, AppendOutput};
pub use config::{Backend, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_bytes, write_json};
