//! TFRecord stream framing
//!
//! Splits a byte stream into checksum-verified record payloads. The crate knows
//! nothing about what the payloads contain.
//!
//! # Example
//!
//! ```
//! use tfrecord_stream::{RecordReader, encode_frame};
//!
//! let mut stream = encode_frame(b"first");
//! stream.extend_from_slice(&encode_frame(b"second"));
//!
//! let mut reader = RecordReader::new(stream.as_slice());
//! while let Some(payload) = reader.next_frame()? {
//!     println!("{} bytes", payload.len());
//! }
//! # Ok::<(), tfrecord_stream::FrameError>(())
//! ```

#![forbid(unsafe_code)]

mod buffer;
pub mod checksum;
mod error;
mod frame;
mod reader;

// Public API
pub use buffer::{Buffer, Frames, Scan, frames, scan};
pub use error::{FrameError, Result};
pub use frame::{FOOTER_LEN, FrameSpan, HEADER_LEN, encode_frame, write_frame};
pub use reader::RecordReader;

/// Bytes requested from the source per read when nothing larger is pending
pub const READ_CHUNK_BYTES: usize = 0x2000; // 8 KiB

/// Upper bound of a single read, however large the pending frame is
///
/// The buffer only ever grows by what the source actually delivered, so a corrupt
/// but checksum-valid length cannot force a huge allocation on its own.
pub const MAX_READ_CHUNK_BYTES: usize = 0x100000; // 1 MiB
