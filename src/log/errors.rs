//! Record log errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for record log operations
pub type LogResult<T> = Result<T, LogError>;

/// Record log errors
#[derive(Debug, Error)]
pub enum LogError {
    /// No record lives at the offset
    #[error("offset not found: {0}")]
    OffsetNotFound(u64),

    /// A previous holder of the log lock panicked
    #[error("log lock poisoned")]
    LockPoisoned,

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LogError {
    /// Whether this error means the caller asked for a record that is not there
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogError::OffsetNotFound(_))
    }
}
