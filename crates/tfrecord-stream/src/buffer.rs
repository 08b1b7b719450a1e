//! Frame scanning over buffered bytes

use crate::checksum::{masked_crc32c, verify};
use crate::error::{FrameError, Result};
use crate::frame::{FOOTER_LEN, FrameSpan, HEADER_LEN, read_u32_le, read_u64_le};
use core::iter::FusedIterator;
use std::io::{self, Read};

/// Outcome of scanning the front of a byte slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A complete frame whose header and payload checksums both verified
    Frame(FrameSpan),
    /// The frame is not complete yet; `needed` is its total size
    ///
    /// Only the 12-byte header minimum is known while the header itself is
    /// incomplete.
    Incomplete { needed: u64 },
}

/// Scan the frame at the start of `bytes`
///
/// The header checksum is verified as soon as 12 bytes are present, so a corrupt
/// length is reported before any attempt to wait for its payload.
pub fn scan(bytes: &[u8]) -> Result<Scan> {
    if bytes.len() < HEADER_LEN {
        return Ok(Scan::Incomplete { needed: HEADER_LEN as u64 });
    }

    let (length_bytes, rest) = bytes.split_at(8);
    let stored = read_u32_le(rest);
    if !verify(length_bytes, stored) {
        return Err(FrameError::HeaderChecksumMismatch {
            stored,
            computed: masked_crc32c(length_bytes),
        });
    }

    let length = read_u64_le(length_bytes);
    let needed = length.saturating_add((HEADER_LEN + FOOTER_LEN) as u64);
    let end = match usize::try_from(needed) {
        Ok(end) if end <= bytes.len() => end,
        _ => return Ok(Scan::Incomplete { needed }),
    };

    let payload = HEADER_LEN..end - FOOTER_LEN;
    let stored = read_u32_le(&bytes[payload.end..end]);
    if !verify(&bytes[payload.clone()], stored) {
        return Err(FrameError::PayloadChecksumMismatch {
            stored,
            computed: masked_crc32c(&bytes[payload]),
        });
    }

    Ok(Scan::Frame(FrameSpan { payload }))
}

/// Payloads of a byte slice that holds a whole stream
pub fn frames(bytes: &[u8]) -> Frames<'_> { Frames { buffer: bytes, offset: 0, done: false } }

/// Iterator over the frames of a complete in-memory stream
///
/// Trailing bytes that do not form a whole frame are reported as
/// [`FrameError::Truncated`]. The iterator is fused after the first error.
#[derive(Debug, Clone)]
pub struct Frames<'b> {
    buffer: &'b [u8],
    offset: usize,
    done: bool,
}

impl<'b> Iterator for Frames<'b> {
    type Item = Result<&'b [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset == self.buffer.len() {
            return None;
        }

        let rest = &self.buffer[self.offset..];
        match scan(rest) {
            Ok(Scan::Frame(span)) => {
                self.offset += span.total_size();
                Some(Ok(&rest[span.payload]))
            }
            Ok(Scan::Incomplete { needed }) => {
                self.done = true;
                Some(Err(FrameError::Truncated { needed, available: rest.len() as u64 }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Frames<'_> {}

/// Growable byte buffer with a read cursor
///
/// Bytes arrive at the back through [`extend_from_slice`](Self::extend_from_slice)
/// or [`fill_from`](Self::fill_from); verified frames leave from the front.
pub struct Buffer {
    inner: Vec<u8>,
    cursor: usize,
}

impl Buffer {
    #[inline]
    pub fn new() -> Self { Self { inner: Vec::new(), cursor: 0 } }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { inner: Vec::with_capacity(capacity), cursor: 0 }
    }

    /// Unconsumed bytes
    #[inline]
    pub fn len(&self) -> usize { self.inner.len() - self.cursor }

    #[inline]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[inline]
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.try_reclaim();
        self.inner.extend_from_slice(data)
    }

    /// Append at most `max` bytes read from `source`
    ///
    /// Retries on [`io::ErrorKind::Interrupted`]. Returns the number of bytes
    /// appended, `0` meaning the source is exhausted.
    pub fn fill_from<R: Read + ?Sized>(&mut self, source: &mut R, max: usize) -> io::Result<usize> {
        self.try_reclaim();

        let filled = self.inner.len();
        self.inner.resize(filled + max, 0);
        let result = loop {
            match source.read(&mut self.inner[filled..]) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => break other,
            }
        };

        let read = match result {
            Ok(n) => n,
            Err(e) => {
                self.inner.truncate(filled);
                return Err(e);
            }
        };
        self.inner.truncate(filled + read);
        Ok(read)
    }

    /// Pop the next complete frame, `None` when more bytes are needed
    pub fn next_frame(&mut self) -> Result<Option<&[u8]>> {
        match scan(self.as_ref())? {
            Scan::Frame(span) => Ok(Some(self.consume(span))),
            Scan::Incomplete { .. } => Ok(None),
        }
    }

    /// Advance past a frame and return its payload
    ///
    /// `span` must come from scanning this buffer's current contents.
    #[inline]
    pub fn consume(&mut self, span: FrameSpan) -> &[u8] {
        let start = self.cursor;
        self.cursor += span.total_size();
        &self.inner[start + span.payload.start..start + span.payload.end]
    }

    /// Check that nothing is left once the source is exhausted
    ///
    /// Leftover bytes are a partial frame, reported as [`FrameError::Truncated`].
    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        match scan(self.as_ref())? {
            Scan::Incomplete { needed } => {
                Err(FrameError::Truncated { needed, available: self.len() as u64 })
            }
            Scan::Frame(_) => Ok(()),
        }
    }

    /// Reset if empty, drop consumed bytes once they dominate
    #[inline]
    fn try_reclaim(&mut self) {
        if self.is_empty() {
            self.inner.clear();
            self.cursor = 0
        } else if self.cursor > self.inner.len() / 2 {
            self.inner.drain(..self.cursor);
            self.cursor = 0
        }
    }
}

impl Default for Buffer {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl AsRef<[u8]> for Buffer {
    #[inline]
    fn as_ref(&self) -> &[u8] { &self.inner[self.cursor..] }
}
