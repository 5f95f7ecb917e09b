//! Observability subsystem for proglog
//!
//! Structured logging through `tracing`:
//! - Typed lifecycle events, emitted as the `event` field
//! - Level filtering from `RUST_LOG` (default `info`)
//! - Human-readable or JSON-lines output
//!
//! Observability is read-only. A failure to install the subscriber never
//! stops the process.

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global log subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. Returns
/// `false` if a subscriber was already installed.
pub fn init_logging(json: bool) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
