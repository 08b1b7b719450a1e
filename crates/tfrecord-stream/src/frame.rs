//! Frame layout definition
//!
//! ```text
//! +-----------+------------+----------------+------------+
//! | length    | length_crc | payload        | data_crc   |
//! | 8B (LE)   | 4B (LE)    | length bytes   | 4B (LE)    |
//! +-----------+------------+----------------+------------+
//! ```
//!
//! - `length`: payload length, little-endian u64
//! - `length_crc`: masked CRC-32C of the 8 `length` bytes
//! - `payload`: serialized record
//! - `data_crc`: masked CRC-32C of `payload`

use crate::checksum::masked_crc32c;
use core::ops::Range;
use std::io::{self, Write};

/// Length prefix plus its checksum
pub const HEADER_LEN: usize = 12;

/// Payload checksum
pub const FOOTER_LEN: usize = 4;

/// Position of one verified frame inside a scanned byte slice
///
/// Produced by [`scan`](crate::scan); offsets are relative to the slice that was
/// scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpan {
    /// Payload bytes
    pub payload: Range<usize>,
}

impl FrameSpan {
    /// Total bytes this frame occupies, header and footer included
    ///
    /// # Example
    ///
    /// ```
    /// # use tfrecord_stream::FrameSpan;
    /// let span = FrameSpan { payload: 12..15 };
    /// assert_eq!(span.total_size(), 19); // 12 + 3 + 4
    /// ```
    #[inline]
    pub const fn total_size(&self) -> usize { self.payload.end + FOOTER_LEN }
}

#[inline]
pub(crate) fn read_u32_le(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(word)
}

#[inline]
pub(crate) fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(word)
}

/// Encode one payload into a complete frame
///
/// # Example
///
/// ```
/// # use tfrecord_stream::{encode_frame, frames};
/// let frame = encode_frame(b"abc");
/// assert_eq!(frame.len(), 12 + 3 + 4);
///
/// let payloads: Vec<_> = frames(&frame).collect::<Result<_, _>>().unwrap();
/// assert_eq!(payloads, vec![&b"abc"[..]]);
/// ```
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len() + FOOTER_LEN);
    let length = (payload.len() as u64).to_le_bytes();

    out.extend_from_slice(&length);
    out.extend_from_slice(&masked_crc32c(&length).to_le_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&masked_crc32c(payload).to_le_bytes());
    out
}

/// Write one payload as a frame without building it in memory first
pub fn write_frame<W: Write>(mut writer: W, payload: &[u8]) -> io::Result<()> {
    let length = (payload.len() as u64).to_le_bytes();

    writer.write_all(&length)?;
    writer.write_all(&masked_crc32c(&length).to_le_bytes())?;
    writer.write_all(payload)?;
    writer.write_all(&masked_crc32c(payload).to_le_bytes())
}
