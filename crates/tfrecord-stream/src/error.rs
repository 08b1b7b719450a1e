use thiserror::Error;

/// Reasons a record stream stops before its clean end
///
/// Every variant is terminal: the scanner never resynchronizes after one.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The stream ended inside a frame
    #[error("truncated record: frame needs {needed} bytes, stream ended after {available}")]
    Truncated { needed: u64, available: u64 },

    /// The masked CRC of the length prefix does not match
    #[error("invalid crc for length: stored {stored:#010x}, computed {computed:#010x}")]
    HeaderChecksumMismatch { stored: u32, computed: u32 },

    /// The masked CRC of the payload does not match
    #[error("invalid crc for payload: stored {stored:#010x}, computed {computed:#010x}")]
    PayloadChecksumMismatch { stored: u32, computed: u32 },

    /// The underlying source failed
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Short stable tag, used in log fields
    #[inline]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Truncated { .. } => "truncated",
            Self::HeaderChecksumMismatch { .. } => "header_checksum_mismatch",
            Self::PayloadChecksumMismatch { .. } => "payload_checksum_mismatch",
            Self::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
