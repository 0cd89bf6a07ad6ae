//! Zero-filled PCM generation.

use std::io::{self, Write};

use crate::models::PcmFormat;

/// Largest chunk written at once.
const CHUNK_BYTES: usize = 64 * 1024;

/// Write `bytes` zero bytes to `target`.
pub fn write_zeros<W: Write>(bytes: u64, target: &mut W) -> io::Result<()> {
    let chunk = [0u8; CHUNK_BYTES];
    let mut remaining = bytes;
    while remaining > 0 {
        let n = remaining.min(CHUNK_BYTES as u64) as usize;
        target.write_all(&chunk[..n])?;
        remaining -= n as u64;
    }
    Ok(())
}

/// Append `secs` seconds of silence to `target`.
///
/// Writes `secs × rate × channels × 2` bytes, rounded to whole frames.
/// Returns the number of bytes written.
pub fn pad<W: Write>(secs: f64, pcm: PcmFormat, target: &mut W) -> io::Result<u64> {
    let bytes = pcm.bytes_for_secs(secs);
    write_zeros(bytes, target)?;
    Ok(bytes)
}

/// Seconds of silence that follow a clip ending at `elapsed` seconds.
///
/// `ceil(elapsed) - elapsed + 1`, always in `[1, 2)`.
pub fn padding_secs(elapsed: f64) -> f64 {
    elapsed.ceil() - elapsed + 1.0
}

/// Byte-exact form of [`padding_secs`] for a cursor of `cursor_bytes`.
///
/// The result moves the cursor onto a whole-second boundary, so repeated
/// padding never accumulates rounding drift.
pub fn padding_bytes(cursor_bytes: u64, pcm: PcmFormat) -> u64 {
    let per_second = pcm.bytes_per_second();
    let boundary = cursor_bytes.div_ceil(per_second) * per_second;
    boundary + per_second - cursor_bytes
}
