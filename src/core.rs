//! Record decoding and JSON rendering

pub mod error;
pub mod json;
pub mod model;
pub mod pipeline;
pub mod record;

pub use error::{Error, Result};
pub use json::encode_to_json;
pub use pipeline::{Pipeline, Progress};
pub use record::{Record, RecordKind};
