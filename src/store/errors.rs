//! Store error types
//!
//! Error codes:
//! - PROGLOG_STORE_OPEN_FAILED (construction: file size unknown)
//! - PROGLOG_STORE_WRITE_FAILED (length prefix or payload write failed)
//! - PROGLOG_STORE_READ_FAILED (positional read failed or fell short)
//! - PROGLOG_STORE_FLUSH_FAILED (flush, sync or close failed)
//! - PROGLOG_STORE_CLOSED (operation on a closed store)
//! - PROGLOG_STORE_LOCK_POISONED (a previous holder of the lock panicked)
//!
//! No store error is fatal to the process. Whether to abort is the caller's
//! decision; after a write fault the store must not be appended to again.

use std::fmt;
use std::io;

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// The backing file could not be inspected at open time
    OpenFailed,
    /// A frame write into the buffer failed
    WriteFailed,
    /// A positional read failed or returned fewer bytes than requested
    ReadFailed,
    /// Buffered bytes could not be pushed to the file, or the file not closed
    FlushFailed,
    /// The store has been closed
    Closed,
    /// The store lock is poisoned
    LockPoisoned,
}

impl StoreErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::OpenFailed => "PROGLOG_STORE_OPEN_FAILED",
            StoreErrorCode::WriteFailed => "PROGLOG_STORE_WRITE_FAILED",
            StoreErrorCode::ReadFailed => "PROGLOG_STORE_READ_FAILED",
            StoreErrorCode::FlushFailed => "PROGLOG_STORE_FLUSH_FAILED",
            StoreErrorCode::Closed => "PROGLOG_STORE_CLOSED",
            StoreErrorCode::LockPoisoned => "PROGLOG_STORE_LOCK_POISONED",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with code, message and optional offset context
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    offset: Option<u64>,
    source: Option<io::Error>,
}

impl StoreError {
    fn new(code: StoreErrorCode, message: impl Into<String>, source: Option<io::Error>) -> Self {
        Self {
            code,
            message: message.into(),
            offset: None,
            source,
        }
    }

    /// The backing file could not be stat'ed or positioned
    pub fn open_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::OpenFailed, message, Some(source))
    }

    /// A write into the frame buffer failed
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::WriteFailed, message, Some(source))
    }

    /// A positional read at `offset` failed
    pub fn read_failed(offset: u64, message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::ReadFailed, message, Some(source)).at_offset(offset)
    }

    /// Flush, sync or close failed
    pub fn flush_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::FlushFailed, message, Some(source))
    }

    /// Operation attempted after `close`
    pub fn closed() -> Self {
        Self::new(StoreErrorCode::Closed, "store is closed", None)
    }

    /// The lock was poisoned by a panicking holder
    pub fn lock_poisoned() -> Self {
        Self::new(StoreErrorCode::LockPoisoned, "store lock poisoned", None)
    }

    fn at_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte offset the failing operation targeted, if any
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Returns the kind of the underlying I/O error, if any
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        self.source.as_ref().map(|e| e.kind())
    }

    /// Whether a read came up short of the requested length.
    ///
    /// Past-the-end and mid-frame offsets surface this way. The store does
    /// not tell them apart from a truncated file.
    pub fn is_short_read(&self) -> bool {
        self.code == StoreErrorCode::ReadFailed
            && self.io_kind() == Some(io::ErrorKind::UnexpectedEof)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " (byte_offset: {})", offset)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
