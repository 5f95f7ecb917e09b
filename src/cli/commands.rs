//! CLI command implementations

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::http_server::{HttpServer, SharedLog};
use crate::log::{MemoryLog, StoreLog};
use crate::observability::{self, Event};
use crate::store::Store;

use super::args::{Cli, Command};
use super::config::{Backend, Config};
use super::errors::{CliError, CliResult};
use super::io::{write_bytes, write_json};

/// Result of `proglog append`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendOutput {
    pub offset: u64,
    pub bytes_written: u64,
}

/// Parse arguments, install logging and run the command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    observability::init_logging(cli.log_json);
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            port,
            backend,
            store,
        } => {
            let base = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            serve(base.with_overrides(port, backend, store)?)
        }
        Command::Append { store, payload } => {
            append(&store, payload.as_bytes(), &mut io::stdout()).map(|_| ())
        }
        Command::Read { store, offset } => read(&store, offset, &mut io::stdout()),
    }
}

/// Build the record log the configuration asks for
pub fn open_log(config: &Config) -> CliResult<SharedLog> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryLog::new())),
        Backend::File => Ok(Arc::new(StoreLog::open(
            &config.store_path,
            config.write_buffer_bytes,
        )?)),
    }
}

/// Serve the configured record log over HTTP until Ctrl-C
pub fn serve(config: Config) -> CliResult<()> {
    let log = open_log(&config)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;

    let server = HttpServer::new(config.http.clone(), Arc::clone(&log));
    let served = runtime
        .block_on(server.start())
        .map_err(|e| CliError::server_error(e.to_string()));

    // Close even when serving failed so buffered records reach the file
    let closed = log.close();
    info!(event = %Event::ShutdownComplete, "shutdown complete");

    served?;
    closed?;
    Ok(())
}

/// Append `payload` to the store at `store_path` and report where it landed
pub fn append<W: Write>(store_path: &Path, payload: &[u8], out: &mut W) -> CliResult<AppendOutput> {
    let store = Store::open_path(store_path)?;
    let (bytes_written, offset) = store.append(payload)?;
    store.close()?;

    let output = AppendOutput {
        offset,
        bytes_written,
    };
    write_json(out, &output)?;
    Ok(output)
}

/// Write the payload of the record at `offset` to `out`
///
/// The store file must already exist; it is never created here.
pub fn read<W: Write>(store_path: &Path, offset: u64, out: &mut W) -> CliResult<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(store_path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CliError::store_error(format!(
                "Store file not found: {}",
                store_path.display()
            )),
            _ => CliError::store_error(format!(
                "Failed to open store file {}: {}",
                store_path.display(),
                e
            )),
        })?;

    let store = Store::open(file)?;
    let payload = store.read(offset)?;
    store.close()?;

    write_bytes(out, &payload)
}
