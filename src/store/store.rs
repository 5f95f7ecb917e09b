//! The record store
//!
//! A single file of length-prefixed frames, addressed by the byte offset of
//! each frame's length prefix. Appends go through an in-memory write buffer;
//! every read flushes that buffer first so it observes all appends made
//! through this store.
//!
//! One mutex guards the file, the buffer and the logical size together.
//! Every operation, reads included, runs to completion under it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace};

use super::errors::{StoreError, StoreResult};
use super::frame::{self, FRAME_OVERHEAD, LEN_WIDTH};
use crate::observability::Event;

/// Default write-buffer capacity in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// State owned by an open store
struct Inner {
    /// Buffered writer over the backing file
    buf: BufWriter<File>,
    /// Logical end of data, including bytes still in `buf`
    size: u64,
}

impl Inner {
    fn flush(&mut self) -> StoreResult<()> {
        self.buf
            .flush()
            .map_err(|e| StoreError::flush_failed("failed to flush buffered writes", e))
    }

    /// Reads exactly `buf.len()` bytes at `offset`. Callers flush first.
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        read_exact_at(self.buf.get_ref(), buf, offset)
    }
}

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, offset)
}

#[cfg(windows)]
fn read_exact_at(mut file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    let result = (|| -> io::Result<()> {
        let mut read = 0;
        while read < buf.len() {
            let n = file.seek_read(&mut buf[read..], offset + read as u64)?;
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "failed to fill whole buffer",
                ));
            }
            read += n;
        }
        Ok(())
    })();
    // seek_read moves the cursor, failed reads included; appends continue at the end
    file.seek(SeekFrom::End(0))?;
    result
}

/// Durable, append-only store of length-prefixed records.
///
/// `Store` is `Send + Sync`; share it behind an `Arc` (or by reference)
/// between threads. Appends are totally ordered by lock acquisition and
/// each returns the offset the record can later be read back from.
///
/// Dropping an open store makes a best-effort flush of buffered bytes.
/// Call [`Store::close`] to observe flush and sync failures.
pub struct Store {
    /// `None` once closed
    inner: Mutex<Option<Inner>>,
}

impl Store {
    /// Creates a store over an already-open, writable file.
    ///
    /// The logical size starts at the file's current length, so reopening a
    /// file resumes appends after its last frame.
    ///
    /// # Errors
    ///
    /// Returns `PROGLOG_STORE_OPEN_FAILED` if the file size cannot be read.
    pub fn open(file: File) -> StoreResult<Self> {
        Self::with_capacity(file, DEFAULT_BUFFER_CAPACITY)
    }

    /// Creates a store whose write buffer holds `capacity` bytes.
    pub fn with_capacity(mut file: File, capacity: usize) -> StoreResult<Self> {
        let size = file
            .metadata()
            .map_err(|e| StoreError::open_failed("failed to read file metadata", e))?
            .len();

        // Appends must land after existing frames even without O_APPEND
        file.seek(SeekFrom::End(0))
            .map_err(|e| StoreError::open_failed("failed to seek to end of file", e))?;

        debug!(event = %Event::StoreOpen, size, capacity, "store opened");

        Ok(Self {
            inner: Mutex::new(Some(Inner {
                buf: BufWriter::with_capacity(capacity, file),
                size,
            })),
        })
    }

    /// Opens or creates the store file at `path`.
    ///
    /// Missing parent directories are created.
    pub fn open_path(path: &Path) -> StoreResult<Self> {
        Self::open_path_with_capacity(path, DEFAULT_BUFFER_CAPACITY)
    }

    /// [`Store::open_path`] with a specific write-buffer capacity.
    pub fn open_path_with_capacity(path: &Path, capacity: usize) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::open_failed(
                    format!("failed to create directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                StoreError::open_failed(
                    format!("failed to open store file: {}", path.display()),
                    e,
                )
            })?;

        Self::with_capacity(file, capacity)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Option<Inner>>> {
        self.inner.lock().map_err(|_| StoreError::lock_poisoned())
    }

    /// Runs `f` under the lock against the open state.
    fn with_open<T>(&self, f: impl FnOnce(&mut Inner) -> StoreResult<T>) -> StoreResult<T> {
        let mut guard = self.lock()?;
        let inner = guard.as_mut().ok_or_else(StoreError::closed)?;
        f(inner)
    }

    /// Appends one record and returns `(bytes_written, offset)`.
    ///
    /// `offset` is the store size before the append and is the record's
    /// address for [`Store::read`]. `bytes_written` is the payload length
    /// plus the 8-byte prefix. The bytes may still be buffered when this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns `PROGLOG_STORE_WRITE_FAILED` if the prefix or payload cannot be
    /// written. Part of the frame may already be buffered; do not append to
    /// the store again after a failure.
    pub fn append(&self, payload: &[u8]) -> StoreResult<(u64, u64)> {
        self.with_open(|inner| {
            let offset = inner.size;

            inner
                .buf
                .write_all(&frame::encode_len(payload.len() as u64))
                .map_err(|e| StoreError::write_failed("failed to write length prefix", e))?;
            inner
                .buf
                .write_all(payload)
                .map_err(|e| StoreError::write_failed("failed to write payload", e))?;

            let written = frame::frame_len(payload.len());
            inner.size += written;

            trace!(event = %Event::RecordAppend, offset, bytes = written, "record appended");
            Ok((written, offset))
        })
    }

    /// Reads the record whose length prefix starts at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `PROGLOG_STORE_READ_FAILED` if either the prefix or the payload
    /// cannot be read in full. An offset past the end or inside a frame
    /// fails the same way as an I/O fault; see [`StoreError::is_short_read`].
    pub fn read(&self, offset: u64) -> StoreResult<Vec<u8>> {
        self.with_open(|inner| {
            inner.flush()?;

            let mut prefix = [0u8; LEN_WIDTH];
            inner
                .read_exact_at(&mut prefix, offset)
                .map_err(|e| StoreError::read_failed(offset, "failed to read length prefix", e))?;
            let len = frame::decode_len(prefix);

            // A prefix read from inside a frame can hold any value; refuse
            // lengths the file cannot back before allocating for them.
            let start = offset + FRAME_OVERHEAD;
            let len = usize::try_from(len)
                .ok()
                .filter(|&l| start.checked_add(l as u64).is_some_and(|end| end <= inner.size))
                .ok_or_else(|| {
                    StoreError::read_failed(
                        offset,
                        format!("payload length {} runs past end of store", len),
                        io::Error::new(io::ErrorKind::UnexpectedEof, "failed to fill whole buffer"),
                    )
                })?;

            let mut payload = vec![0u8; len];
            inner
                .read_exact_at(&mut payload, start)
                .map_err(|e| StoreError::read_failed(offset, "failed to read payload", e))?;

            trace!(event = %Event::RecordRead, offset, len, "record read");
            Ok(payload)
        })
    }

    /// Fills `buf` with the raw bytes at `position` and returns `buf.len()`.
    ///
    /// No frame interpretation happens here; this is for callers that know
    /// the exact byte range they want.
    pub fn read_at(&self, buf: &mut [u8], position: u64) -> StoreResult<usize> {
        self.with_open(|inner| {
            inner.flush()?;
            inner
                .read_exact_at(buf, position)
                .map_err(|e| StoreError::read_failed(position, "failed to read bytes", e))?;
            Ok(buf.len())
        })
    }

    /// Returns the logical size, buffered bytes included.
    pub fn size(&self) -> StoreResult<u64> {
        self.with_open(|inner| Ok(inner.size))
    }

    /// Pushes buffered bytes to the file.
    pub fn flush(&self) -> StoreResult<()> {
        self.with_open(|inner| inner.flush())
    }

    /// Flushes and then fsyncs the file.
    pub fn sync(&self) -> StoreResult<()> {
        self.with_open(|inner| {
            inner.flush()?;
            inner
                .buf
                .get_ref()
                .sync_all()
                .map_err(|e| StoreError::flush_failed("fsync failed", e))
        })
    }

    /// Flushes, fsyncs and releases the file.
    ///
    /// The store is closed even when this fails. Any later call, including a
    /// second `close`, returns `PROGLOG_STORE_CLOSED`.
    pub fn close(&self) -> StoreResult<()> {
        let mut guard = self.lock()?;
        let inner = guard.take().ok_or_else(StoreError::closed)?;
        let size = inner.size;

        let file = inner.buf.into_inner().map_err(|e| {
            StoreError::flush_failed("failed to flush buffered writes", e.into_error())
        })?;
        file.sync_all()
            .map_err(|e| StoreError::flush_failed("fsync failed on close", e))?;
        drop(file);

        debug!(event = %Event::StoreClose, size, "store closed");
        Ok(())
    }

    /// Whether [`Store::close`] has been called.
    pub fn is_closed(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_none())
    }
}
