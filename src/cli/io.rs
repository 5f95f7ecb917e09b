//! Output handling for CLI commands
//!
//! JSON results are one object per line; payloads are written raw.

use std::io::Write;

use serde::Serialize;

use super::errors::CliResult;

/// Write `value` as one JSON line
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write raw bytes
pub fn write_bytes<W: Write>(out: &mut W, bytes: &[u8]) -> CliResult<()> {
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}
