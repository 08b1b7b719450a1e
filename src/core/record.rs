//! TensorFlow `Example` protos
//!
//! Hand-written prost definitions of `tensorflow/core/example/{feature,example}.proto`.
//! Field numbers and declaration order follow the upstream `.proto` files.

use super::error::Error;
use prost::Message as _;
use std::collections::HashMap;

/// Containers to hold repeated fundamental values.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BytesList {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub value: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FloatList {
    #[prost(float, repeated, tag = "1")]
    pub value: Vec<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Int64List {
    #[prost(int64, repeated, tag = "1")]
    pub value: Vec<i64>,
}

/// Containers for non-sequential data.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Feature {
    /// Each feature can be exactly one kind.
    #[prost(oneof = "feature::Kind", tags = "1, 2, 3")]
    pub kind: Option<feature::Kind>,
}

/// Nested message and enum types in `Feature`.
pub mod feature {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        BytesList(super::BytesList),
        #[prost(message, tag = "2")]
        FloatList(super::FloatList),
        #[prost(message, tag = "3")]
        Int64List(super::Int64List),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Features {
    /// Map from feature name to feature.
    #[prost(map = "string, message", tag = "1")]
    pub feature: HashMap<String, Feature>,
}

/// Containers for sequential data.
///
/// A FeatureList holds zero or more Features, one per step.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeatureList {
    #[prost(message, repeated, tag = "1")]
    pub feature: Vec<Feature>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeatureLists {
    /// Map from feature name to feature list.
    #[prost(map = "string, message", tag = "1")]
    pub feature_list: HashMap<String, FeatureList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Example {
    #[prost(message, optional, tag = "1")]
    pub features: Option<Features>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SequenceExample {
    #[prost(message, optional, tag = "1")]
    pub context: Option<Features>,
    #[prost(message, optional, tag = "2")]
    pub feature_lists: Option<FeatureLists>,
}

impl Feature {
    #[inline]
    pub fn bytes_list<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        Self {
            kind: Some(feature::Kind::BytesList(BytesList {
                value: values.into_iter().map(Into::into).collect(),
            })),
        }
    }

    #[inline]
    pub fn float_list(values: impl Into<Vec<f32>>) -> Self {
        Self { kind: Some(feature::Kind::FloatList(FloatList { value: values.into() })) }
    }

    #[inline]
    pub fn int64_list(values: impl Into<Vec<i64>>) -> Self {
        Self { kind: Some(feature::Kind::Int64List(Int64List { value: values.into() })) }
    }
}

/// Which schema a record stream holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RecordKind {
    /// Flat `tf.train.Example`
    #[default]
    #[value(name = "example")]
    Example,
    /// `tf.train.SequenceExample`
    #[value(name = "sequence_example")]
    SequenceExample,
}

impl RecordKind {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Example => "example",
            Self::SequenceExample => "sequence_example",
        }
    }
}

impl ::core::fmt::Display for RecordKind {
    #[inline]
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded record
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Example(Example),
    SequenceExample(SequenceExample),
}

impl Record {
    /// Parse a verified frame payload as `kind`
    ///
    /// # Errors
    /// [`Error::MalformedPayload`] when the bytes are not a valid encoding of the
    /// selected message.
    pub fn decode(payload: &[u8], kind: RecordKind) -> Result<Self, Error> {
        Ok(match kind {
            RecordKind::Example => Self::Example(Example::decode(payload)?),
            RecordKind::SequenceExample => Self::SequenceExample(SequenceExample::decode(payload)?),
        })
    }

    #[inline]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Example(_) => RecordKind::Example,
            Self::SequenceExample(_) => RecordKind::SequenceExample,
        }
    }
}

impl From<Example> for Record {
    #[inline]
    fn from(example: Example) -> Self { Self::Example(example) }
}

impl From<SequenceExample> for Record {
    #[inline]
    fn from(example: SequenceExample) -> Self { Self::SequenceExample(example) }
}
