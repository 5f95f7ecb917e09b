//! Durable record log backed by a [`Store`]
//!
//! Offsets are byte offsets of frames in the store file. Only the record
//! value is persisted; the offset is the frame's own address.

use std::path::Path;

use tracing::{debug, error};

use super::errors::{LogError, LogResult};
use super::record::Record;
use super::RecordLog;
use crate::observability::Event;
use crate::store::Store;

/// Record log persisted to a single store file
pub struct StoreLog {
    store: Store,
}

impl StoreLog {
    /// Wrap an open store
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open or create the store file at `path`
    pub fn open(path: &Path, buffer_capacity: usize) -> LogResult<Self> {
        Ok(Self::new(Store::open_path_with_capacity(path, buffer_capacity)?))
    }

    /// The backing store
    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl RecordLog for StoreLog {
    fn append(&self, record: Record) -> LogResult<u64> {
        let (bytes_written, offset) = self.store.append(&record.value)?;
        debug!(event = %Event::LogAppend, offset, bytes_written, "record appended");
        Ok(offset)
    }

    fn read(&self, offset: u64) -> LogResult<Record> {
        debug!(event = %Event::LogRead, offset, "record read");
        match self.store.read(offset) {
            Ok(value) => Ok(Record { value, offset }),
            Err(e) if e.is_short_read() => Err(LogError::OffsetNotFound(offset)),
            Err(e) => Err(e.into()),
        }
    }

    fn close(&self) -> LogResult<()> {
        self.store.close().map_err(|e| {
            error!(event = %Event::StoreCloseFailed, error = %e, "failed to close store");
            LogError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_offsets_are_byte_offsets() {
        let temp_dir = TempDir::new().unwrap();
        let log = StoreLog::open(&temp_dir.path().join("store.log"), 4096).unwrap();

        assert_eq!(log.append(Record::new("hello")).unwrap(), 0);
        assert_eq!(log.append(Record::new("world!")).unwrap(), 13);

        let record = log.read(13).unwrap();
        assert_eq!(record.value, b"world!");
        assert_eq!(record.offset, 13);
    }

    #[test]
    fn test_unknown_offset_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let log = StoreLog::open(&temp_dir.path().join("store.log"), 4096).unwrap();
        log.append(Record::new("hello")).unwrap();

        assert!(log.read(13).unwrap_err().is_not_found());
        assert!(log.read(1000).unwrap_err().is_not_found());
    }

    #[test]
    fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.log");

        {
            let log = StoreLog::open(&path, 4096).unwrap();
            log.append(Record::new("kept")).unwrap();
            log.close().unwrap();
        }

        let log = StoreLog::open(&path, 4096).unwrap();
        assert_eq!(log.read(0).unwrap().value, b"kept");
        assert_eq!(log.append(Record::new("next")).unwrap(), 12);
    }

    #[test]
    fn test_read_after_close_is_store_error() {
        let temp_dir = TempDir::new().unwrap();
        let log = StoreLog::open(&temp_dir.path().join("store.log"), 4096).unwrap();
        log.close().unwrap();

        let err = log.read(0).unwrap_err();
        assert!(matches!(err, LogError::Store(_)));
        assert!(!err.is_not_found());
    }
}
