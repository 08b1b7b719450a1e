//! Pull-based record reader

use crate::buffer::{Buffer, Scan, scan};
use crate::error::{FrameError, Result};
use crate::{MAX_READ_CHUNK_BYTES, READ_CHUNK_BYTES};
use std::io::Read;

/// Reads verified record payloads from any [`Read`] source
///
/// The source is read in chunks of arbitrary size; only the frame currently being
/// assembled is kept in memory. Not seekable: to read again, build a new reader
/// over the source from its start.
///
/// # Example
///
/// ```no_run
/// use tfrecord_stream::RecordReader;
///
/// let file = std::fs::File::open("train.tfrecord")?;
/// let mut reader = RecordReader::new(file);
///
/// while let Some(payload) = reader.next_frame()? {
///     println!("record of {} bytes", payload.len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RecordReader<R> {
    source: R,
    buffer: Buffer,
    frames: u64,
    eof: bool,
    failed: bool,
}

impl<R: Read> RecordReader<R> {
    /// Create new reader
    #[inline]
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: Buffer::with_capacity(READ_CHUNK_BYTES),
            frames: 0,
            eof: false,
            failed: false,
        }
    }

    /// Next verified payload
    ///
    /// # Returns
    /// - `Ok(Some(payload))`: a frame whose checksums both verified
    /// - `Ok(None)`: clean end of stream, or a previous call already failed
    /// - `Err(_)`: truncation, checksum mismatch or read failure; terminal
    pub fn next_frame(&mut self) -> Result<Option<&[u8]>> {
        if self.failed {
            return Ok(None);
        }

        loop {
            let needed = match scan(self.buffer.as_ref()) {
                Ok(Scan::Frame(span)) => {
                    self.frames += 1;
                    return Ok(Some(self.buffer.consume(span)));
                }
                Ok(Scan::Incomplete { needed }) => needed,
                Err(e) => return Err(self.fail(e)),
            };

            if self.eof {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let available = self.buffer.len() as u64;
                return Err(self.fail(FrameError::Truncated { needed, available }));
            }

            let missing = needed.saturating_sub(self.buffer.len() as u64);
            let chunk = usize::try_from(missing)
                .unwrap_or(usize::MAX)
                .clamp(READ_CHUNK_BYTES, MAX_READ_CHUNK_BYTES);

            match self.buffer.fill_from(&mut self.source, chunk) {
                Ok(0) => self.eof = true,
                Ok(_) => {}
                Err(e) => return Err(self.fail(e.into())),
            }
        }
    }

    /// Number of frames yielded so far
    #[inline]
    pub fn frames_read(&self) -> u64 { self.frames }

    /// Give back the underlying source
    #[inline]
    pub fn into_inner(self) -> R { self.source }

    #[inline]
    fn fail(&mut self, e: FrameError) -> FrameError {
        self.failed = true;
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{HEADER_LEN, encode_frame};
    use std::io;

    /// Delivers at most `step` bytes per read, interrupting every other call
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    fn collect<R: Read>(reader: &mut RecordReader<R>) -> Result<Vec<Vec<u8>>> {
        let mut out = Vec::new();
        while let Some(payload) = reader.next_frame()? {
            out.push(payload.to_vec());
        }
        Ok(out)
    }

    #[test]
    fn test_reads_all_frames() {
        let mut stream = encode_frame(b"one");
        stream.extend_from_slice(&encode_frame(b"two"));

        let mut reader = RecordReader::new(stream.as_slice());
        assert_eq!(collect(&mut reader).unwrap(), vec![b"one".to_vec(), b"two".to_vec()]);
        assert_eq!(reader.frames_read(), 2);
    }

    #[test]
    fn test_trickled_source_matches_whole_source() {
        let big = vec![0xabu8; READ_CHUNK_BYTES * 3 + 17];
        let mut stream = encode_frame(b"small");
        stream.extend_from_slice(&encode_frame(&big));
        stream.extend_from_slice(&encode_frame(b""));

        for step in [5, 12, 4096] {
            let source = Trickle { data: &stream, step, interrupt: false };
            let mut reader = RecordReader::new(source);
            let payloads = collect(&mut reader).unwrap();

            assert_eq!(payloads.len(), 3);
            assert_eq!(payloads[1], big);
            assert!(payloads[2].is_empty());
        }
    }

    #[test]
    fn test_single_byte_reads() {
        let mut stream = encode_frame(b"first");
        stream.extend_from_slice(&encode_frame(b"second"));

        let source = Trickle { data: &stream, step: 1, interrupt: false };
        let mut reader = RecordReader::new(source);
        assert_eq!(collect(&mut reader).unwrap(), vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn test_truncated_payload_is_not_checksum_error() {
        let stream = encode_frame(&[1u8; 20]);
        let mut reader = RecordReader::new(&stream[..HEADER_LEN + 5]);

        let err = reader.next_frame().unwrap_err();
        assert!(matches!(err, FrameError::Truncated { needed: 36, available: 17 }), "{err}");
    }

    #[test]
    fn test_partial_header_at_end() {
        let mut stream = encode_frame(b"ok");
        stream.extend_from_slice(&[0u8; 3]);

        let mut reader = RecordReader::new(stream.as_slice());
        assert_eq!(reader.next_frame().unwrap(), Some(&b"ok"[..]));
        assert!(matches!(reader.next_frame(), Err(FrameError::Truncated { needed: 12, available: 3 })));
    }

    #[test]
    fn test_error_is_terminal() {
        let mut stream = encode_frame(b"payload");
        let last = stream.len() - 1;
        stream[last] ^= 0x80;
        stream.extend_from_slice(&encode_frame(b"never seen"));

        let mut reader = RecordReader::new(stream.as_slice());
        assert!(matches!(reader.next_frame(), Err(FrameError::PayloadChecksumMismatch { .. })));
        assert_eq!(reader.next_frame().unwrap(), None);
    }

    #[test]
    fn test_io_error_surfaces() {
        let mut reader = RecordReader::new(Broken);
        assert!(matches!(reader.next_frame(), Err(FrameError::Io(_))));
        assert!(reader.next_frame().unwrap().is_none());
    }
}
