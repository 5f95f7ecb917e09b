//! Record logs served over HTTP
//!
//! Two implementations of one contract:
//! - [`MemoryLog`]: indexed list, offsets are indices, not durable
//! - [`StoreLog`]: frames in a [`crate::store::Store`], offsets are byte offsets
//!
//! Both hand out offsets on append and give the record back for a known
//! offset. An unknown offset is [`LogError::OffsetNotFound`].

mod errors;
mod memory;
mod record;
mod store_log;

pub use errors::{LogError, LogResult};
pub use memory::MemoryLog;
pub use record::Record;
pub use store_log::StoreLog;

/// Append/read contract shared by the record logs
pub trait RecordLog: Send + Sync {
    /// Append a record and return the offset it can be read back from
    fn append(&self, record: Record) -> LogResult<u64>;

    /// Read the record at `offset`
    fn read(&self, offset: u64) -> LogResult<Record>;

    /// Release any backing resources
    fn close(&self) -> LogResult<()> {
        Ok(())
    }
}
