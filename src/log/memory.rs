//! In-memory record log
//!
//! A plain indexed list. Offsets are list indices; nothing survives the
//! process.

use std::sync::Mutex;

use tracing::debug;

use super::errors::{LogError, LogResult};
use super::record::Record;
use super::RecordLog;
use crate::observability::Event;

/// Record log held in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<Record>>,
}

impl MemoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records appended so far
    pub fn len(&self) -> LogResult<usize> {
        let records = self.records.lock().map_err(|_| LogError::LockPoisoned)?;
        Ok(records.len())
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> LogResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordLog for MemoryLog {
    fn append(&self, mut record: Record) -> LogResult<u64> {
        let mut records = self.records.lock().map_err(|_| LogError::LockPoisoned)?;

        record.offset = records.len() as u64;
        let offset = record.offset;
        records.push(record);

        debug!(event = %Event::LogAppend, offset, "record appended");
        Ok(offset)
    }

    fn read(&self, offset: u64) -> LogResult<Record> {
        let records = self.records.lock().map_err(|_| LogError::LockPoisoned)?;

        debug!(event = %Event::LogRead, offset, "record read");
        usize::try_from(offset)
            .ok()
            .and_then(|index| records.get(index))
            .cloned()
            .ok_or(LogError::OffsetNotFound(offset))
    }
}
