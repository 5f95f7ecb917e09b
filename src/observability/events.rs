//! Observable events for proglog
//!
//! Every lifecycle log line carries one of these as its `event` field.
//! Events are explicit and typed.

use std::fmt;

/// Observable events in proglog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Store
    /// Store opened over a file
    StoreOpen,
    /// Record appended to the store
    RecordAppend,
    /// Record read from the store
    RecordRead,
    /// Store flushed, synced and closed
    StoreClose,
    /// Store close failed
    StoreCloseFailed,

    // Record logs
    /// Record appended through a record log
    LogAppend,
    /// Record read through a record log
    LogRead,

    // Server
    /// HTTP server bound and serving
    Serving,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::StoreOpen => "STORE_OPEN",
            Event::RecordAppend => "RECORD_APPEND",
            Event::RecordRead => "RECORD_READ",
            Event::StoreClose => "STORE_CLOSE",
            Event::StoreCloseFailed => "STORE_CLOSE_FAILED",

            Event::LogAppend => "LOG_APPEND",
            Event::LogRead => "LOG_READ",

            Event::Serving => "PROGLOG_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
