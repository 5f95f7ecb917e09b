//! Record store subsystem
//!
//! A durable, append-only file of length-prefixed records addressed by byte
//! offset.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates, no truncation)
//! - Fixed frame format: 8-byte big-endian length, then the payload
//! - Buffered writes; every read flushes first
//! - One lock over file, buffer and size
//!
//! # Invariants Enforced
//!
//! - Logical size equals the sum of all appended frame lengths, buffered or not
//! - A successful read returns a whole frame's payload, never part of one
//! - Reads observe every append that completed before them

mod errors;
pub mod frame;
#[allow(clippy::module_inception)]
mod store;

pub use errors::{StoreError, StoreErrorCode, StoreResult};
pub use frame::{FRAME_OVERHEAD, LEN_WIDTH};
pub use store::{Store, DEFAULT_BUFFER_CAPACITY};
