//! Store Durability Tests
//!
//! Tests for properties:
//! - Round-trip: every appended payload reads back byte-for-byte
//! - Size accounting: size = initial size + sum(8 + payload length)
//! - Offset monotonicity: first offset = initial size, then strictly increasing
//! - Flush-before-read: reads see buffered appends without an explicit flush
//! - Reopen resumes at the prior size
//! - Frame format is [u64 big-endian length][payload], back-to-back

use proglog::store::{Store, StoreErrorCode, LEN_WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("store.log")
}

fn random_payloads(seed: u64, count: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut payload = vec![0u8; rng.gen_range(0..512)];
            rng.fill(&mut payload[..]);
            payload
        })
        .collect()
}

fn append_all(store: &Store, payloads: &[Vec<u8>]) -> Vec<u64> {
    payloads
        .iter()
        .map(|p| store.append(p).expect("append failed").1)
        .collect()
}

fn file_len(path: &Path) -> u64 {
    fs::metadata(path).unwrap().len()
}

// =============================================================================
// Round-trip
// =============================================================================

/// Every payload, including empty ones, reads back exactly.
#[test]
fn test_round_trip_random_payloads() {
    let dir = create_temp_dir();
    let store = Store::open_path(&store_path(&dir)).unwrap();

    let mut payloads = random_payloads(7, 200);
    payloads.push(Vec::new());
    let offsets = append_all(&store, &payloads);

    for (payload, offset) in payloads.iter().zip(&offsets) {
        assert_eq!(
            &store.read(*offset).unwrap(),
            payload,
            "payload at offset {} did not round-trip",
            offset
        );
    }
}

/// Reads in any order return the right record.
#[test]
fn test_reads_in_reverse_order() {
    let dir = create_temp_dir();
    let store = Store::open_path(&store_path(&dir)).unwrap();

    let payloads = random_payloads(11, 50);
    let offsets = append_all(&store, &payloads);

    for (payload, offset) in payloads.iter().zip(&offsets).rev() {
        assert_eq!(&store.read(*offset).unwrap(), payload);
    }
}

// =============================================================================
// Size accounting and offsets
// =============================================================================

/// Size tracks every frame, flushed or not.
#[test]
fn test_size_accounts_for_every_frame() {
    let dir = create_temp_dir();
    let store = Store::open_path(&store_path(&dir)).unwrap();

    let payloads = random_payloads(3, 100);
    append_all(&store, &payloads);

    let expected: u64 = payloads.iter().map(|p| 8 + p.len() as u64).sum();
    assert_eq!(store.size().unwrap(), expected);
}

/// Offsets start at the initial size and strictly increase.
#[test]
fn test_offsets_are_strictly_increasing() {
    let dir = create_temp_dir();
    let path = store_path(&dir);
    fs::write(&path, [0, 0, 0, 0, 0, 0, 0, 2, b'h', b'i']).unwrap();

    let store = Store::open_path(&path).unwrap();
    let offsets = append_all(&store, &random_payloads(5, 64));

    assert_eq!(offsets[0], 10, "first offset must equal initial size");
    assert!(
        offsets.windows(2).all(|w| w[0] < w[1]),
        "offsets must strictly increase: {:?}",
        offsets
    );
    assert_eq!(store.read(0).unwrap(), b"hi");
}

// =============================================================================
// Flush-before-read
// =============================================================================

/// A read right after an append sees it, with no explicit flush.
#[test]
fn test_read_immediately_after_append() {
    let dir = create_temp_dir();
    let path = store_path(&dir);
    let store = Store::open_path(&path).unwrap();

    for payload in random_payloads(13, 20) {
        let (_, offset) = store.append(&payload).unwrap();
        assert_eq!(store.read(offset).unwrap(), payload);
    }

    assert_eq!(file_len(&path), store.size().unwrap());
}

/// read_at flushes too.
#[test]
fn test_read_at_sees_buffered_prefix() {
    let dir = create_temp_dir();
    let store = Store::open_path(&store_path(&dir)).unwrap();

    store.append(b"hello").unwrap();
    let mut prefix = [0u8; LEN_WIDTH];
    store.read_at(&mut prefix, 0).unwrap();
    assert_eq!(u64::from_be_bytes(prefix), 5);
}

// =============================================================================
// Reopen
// =============================================================================

/// Closing and reopening resumes at the prior size.
#[test]
fn test_reopen_resumes_at_prior_size() {
    let dir = create_temp_dir();
    let path = store_path(&dir);
    let payloads = random_payloads(17, 30);

    let size_before_close;
    {
        let store = Store::open_path(&path).unwrap();
        append_all(&store, &payloads);
        size_before_close = store.size().unwrap();
        store.close().unwrap();
    }

    assert_eq!(file_len(&path), size_before_close);

    let store = Store::open_path(&path).unwrap();
    assert_eq!(store.size().unwrap(), size_before_close);
    let (_, offset) = store.append(b"after reopen").unwrap();
    assert_eq!(offset, size_before_close);
    assert_eq!(store.read(offset).unwrap(), b"after reopen");
}

/// Dropping an open store still flushes its buffer.
#[test]
fn test_drop_flushes_buffered_frames() {
    let dir = create_temp_dir();
    let path = store_path(&dir);

    {
        let store = Store::open_path(&path).unwrap();
        store.append(b"dropped, not closed").unwrap();
        assert_eq!(file_len(&path), 0);
    }

    let store = Store::open_path(&path).unwrap();
    assert_eq!(store.read(0).unwrap(), b"dropped, not closed");
}

// =============================================================================
// On-disk format
// =============================================================================

/// The file holds back-to-back big-endian length-prefixed frames and nothing else.
#[test]
fn test_on_disk_frame_format() {
    let dir = create_temp_dir();
    let path = store_path(&dir);
    let store = Store::open_path(&path).unwrap();

    assert_eq!(store.append(b"hello").unwrap(), (13, 0));
    assert_eq!(store.append(b"").unwrap(), (8, 13));
    assert_eq!(store.append(b"world!").unwrap(), (14, 21));
    store.close().unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&5u64.to_be_bytes());
    expected.extend_from_slice(b"hello");
    expected.extend_from_slice(&0u64.to_be_bytes());
    expected.extend_from_slice(&6u64.to_be_bytes());
    expected.extend_from_slice(b"world!");
    assert_eq!(fs::read(&path).unwrap(), expected);
}

// =============================================================================
// Faults
// =============================================================================

/// A frame cut short on disk fails to read instead of returning partial data.
#[test]
fn test_truncated_frame_is_read_error() {
    let dir = create_temp_dir();
    let path = store_path(&dir);
    {
        let store = Store::open_path(&path).unwrap();
        store.append(b"complete").unwrap();
        store.append(b"will be truncated").unwrap();
        store.close().unwrap();
    }

    let file = OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(16 + 8 + 4).unwrap();
    drop(file);

    let store = Store::open_path(&path).unwrap();
    assert_eq!(store.read(0).unwrap(), b"complete");

    let err = store.read(16).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::ReadFailed);
    assert!(err.is_short_read(), "truncation must surface as a short read");
}

/// Reading a store opened over an empty file fails at every offset.
#[test]
fn test_empty_store_has_nothing_to_read() {
    let dir = create_temp_dir();
    let store = Store::open_path(&store_path(&dir)).unwrap();

    assert_eq!(store.size().unwrap(), 0);
    assert!(store.read(0).unwrap_err().is_short_read());
}

fn read_only_store(dir: &TempDir, capacity: usize) -> Store {
    let path = store_path(dir);
    fs::write(&path, b"").unwrap();
    Store::with_capacity(File::open(&path).unwrap(), capacity).unwrap()
}

/// A write that reaches the file and fails is a write fault; size stays put.
#[test]
fn test_failed_append_is_write_fault_and_keeps_size() {
    let dir = create_temp_dir();
    let store = read_only_store(&dir, 4);

    let err = store.append(b"bigger than four").unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::WriteFailed);
    assert!(err.message().contains("length prefix"));
    assert_eq!(store.size().unwrap(), 0, "size must not advance on a failed append");
}

/// Buffered bytes that cannot reach the file fail the read that flushes them.
#[test]
fn test_unflushable_buffer_fails_reads() {
    let dir = create_temp_dir();
    let store = read_only_store(&dir, 64);

    assert_eq!(store.append(b"hi").unwrap(), (10, 0));

    assert_eq!(store.read(0).unwrap_err().code(), StoreErrorCode::FlushFailed);
    let mut buf = [0u8; LEN_WIDTH];
    assert_eq!(
        store.read_at(&mut buf, 0).unwrap_err().code(),
        StoreErrorCode::FlushFailed
    );
    assert_eq!(store.flush().unwrap_err().code(), StoreErrorCode::FlushFailed);
}

/// Close reports the flush fault and still leaves the store closed.
#[test]
fn test_close_flush_fault_still_closes() {
    let dir = create_temp_dir();
    let store = read_only_store(&dir, 64);
    store.append(b"hi").unwrap();

    assert_eq!(store.close().unwrap_err().code(), StoreErrorCode::FlushFailed);
    assert!(store.is_closed().unwrap());
    assert_eq!(store.append(b"x").unwrap_err().code(), StoreErrorCode::Closed);
    assert_eq!(store.close().unwrap_err().code(), StoreErrorCode::Closed);
}
