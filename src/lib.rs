//! TFRecord inspection
//!
//! Reads TFRecord streams, verifies their checksums, decodes each record as a
//! TensorFlow `Example` or `SequenceExample` and renders it as one line of
//! canonical JSON.
//!
//! # Example
//!
//! ```
//! use prost::Message as _;
//! use tfr::core::{Pipeline, RecordKind, record::{Example, Feature, Features}};
//!
//! let example = Example {
//!     features: Some(Features { feature: [("age".to_owned(), Feature::int64_list(vec![29]))].into() }),
//! };
//! let stream = tfrecord_stream::encode_frame(&example.encode_to_vec());
//!
//! let mut pipeline = Pipeline::new(Vec::new(), RecordKind::Example, usize::MAX);
//! pipeline.feed(stream.as_slice())?;
//! assert_eq!(pipeline.finish()?, b"{\"features\":{\"feature\":{\"age\":{\"int64List\":{\"value\":[29]}}}}}\n");
//! # Ok::<(), tfr::core::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod app;
pub mod common;
pub mod core;
