use thiserror::Error;
use tfrecord_stream::FrameError;

/// Everything that can stop a run
///
/// None of these is recoverable: a failed record aborts the whole stream.
#[derive(Debug, Error)]
pub enum Error {
    /// Framing failed: truncation, checksum mismatch or a source read error
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The payload is not a valid encoding of the selected message
    #[error("malformed record payload: {0}")]
    MalformedPayload(#[from] prost::DecodeError),

    /// A byte string could not be rendered as JSON text
    #[error("invalid UTF-8 in string field at byte {offset}")]
    InvalidUtf8 { offset: usize },

    /// Writing the JSON output failed
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    #[inline]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Frame(e) => e.kind(),
            Self::MalformedPayload(_) => "malformed_payload",
            Self::InvalidUtf8 { .. } => "invalid_utf8",
            Self::Io(_) => "io",
        }
    }
}

pub type Result<T> = ::core::result::Result<T, Error>;
