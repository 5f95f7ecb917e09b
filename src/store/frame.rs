//! Frame layout of the store file
//!
//! ```text
//! [8 bytes: payload length, u64 big-endian][length bytes: payload]
//! ```
//!
//! Frames are written back-to-back with no file header, padding or trailer.
//! The width and byte order are part of the file format and are not
//! configurable.

/// Width of the length prefix in bytes
pub const LEN_WIDTH: usize = 8;

/// Bytes a frame adds on top of its payload
pub const FRAME_OVERHEAD: u64 = LEN_WIDTH as u64;

/// Encodes a payload length as a length prefix.
pub fn encode_len(len: u64) -> [u8; LEN_WIDTH] {
    len.to_be_bytes()
}

/// Decodes a length prefix.
pub fn decode_len(prefix: [u8; LEN_WIDTH]) -> u64 {
    u64::from_be_bytes(prefix)
}

/// Total on-disk size of a frame carrying `payload_len` bytes.
pub fn frame_len(payload_len: usize) -> u64 {
    FRAME_OVERHEAD + payload_len as u64
}
