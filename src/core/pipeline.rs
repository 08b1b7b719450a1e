//! Record stream to NDJSON

use super::error::Result;
use super::json::encode_into;
use super::model::Message;
use super::record::{Record, RecordKind};
use std::io::{self, Read, Write};
use tfrecord_stream::RecordReader;

/// Why [`Pipeline::feed`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Source ended cleanly, more sources may follow
    Exhausted,
    /// The record limit was reached
    LimitReached,
    /// The output was closed by its reader
    OutputClosed,
}

impl Progress {
    /// Whether further sources should be fed
    #[inline]
    pub const fn wants_more(self) -> bool { matches!(self, Self::Exhausted) }
}

/// Decodes records from a sequence of sources and writes one JSON line each
///
/// Each source is an independent record stream: a frame never spans two
/// sources. This differs from reading the plain concatenation of all sources,
/// where a frame split across a source boundary would still decode. A record's
/// line is written only once it has decoded and encoded whole.
///
/// # Example
///
/// ```
/// use tfr::core::{pipeline::{Pipeline, Progress}, record::RecordKind};
///
/// let mut pipeline = Pipeline::new(Vec::new(), RecordKind::Example, usize::MAX);
/// assert_eq!(pipeline.feed(std::io::empty())?, Progress::Exhausted);
/// assert!(pipeline.finish()?.is_empty());
/// # Ok::<(), tfr::core::error::Error>(())
/// ```
pub struct Pipeline<W> {
    out: W,
    kind: RecordKind,
    remaining: usize,
    written: usize,
    closed: bool,
    line: Vec<u8>,
}

impl<W: Write> Pipeline<W> {
    #[inline]
    pub fn new(out: W, kind: RecordKind, max_records: usize) -> Self {
        Self { out, kind, remaining: max_records, written: 0, closed: false, line: Vec::new() }
    }

    /// Drain `source`, stopping early at the record limit or a closed output
    ///
    /// # Errors
    /// The first framing, decoding, encoding or write failure. Nothing of the
    /// failing record is written.
    pub fn feed<R: Read>(&mut self, source: R) -> Result<Progress> {
        if self.closed {
            return Ok(Progress::OutputClosed);
        }
        if self.remaining == 0 {
            return Ok(Progress::LimitReached);
        }

        let mut reader = RecordReader::new(source);
        while let Some(payload) = reader.next_frame()? {
            let record = Record::decode(payload, self.kind)?;

            self.line.clear();
            encode_into(&mut self.line, Message::from(&record))?;
            self.line.push(b'\n');

            if !self.emit()? {
                return Ok(Progress::OutputClosed);
            }
            tracing::trace!(record = self.written, bytes = payload.len(), "record written");

            if self.remaining == 0 {
                tracing::debug!(records = self.written, "record limit reached");
                return Ok(Progress::LimitReached);
            }
        }

        tracing::debug!(frames = reader.frames_read(), "source exhausted");
        Ok(Progress::Exhausted)
    }

    /// Records written so far
    #[inline]
    pub fn written(&self) -> usize { self.written }

    /// Flush and give back the output
    pub fn finish(mut self) -> Result<W> {
        if !self.closed {
            match self.out.flush() {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => self.close(),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(self.out)
    }

    /// Write the pending line; `false` once the reader has gone away
    fn emit(&mut self) -> Result<bool> {
        match self.out.write_all(&self.line) {
            Ok(()) => {
                self.written += 1;
                self.remaining -= 1;
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                self.close();
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[inline]
    fn close(&mut self) {
        tracing::warn!(records = self.written, "output closed, stopping");
        self.closed = true;
    }
}
