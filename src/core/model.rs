//! Structural view of the record schema
//!
//! The encoder never inspects prost types directly. Each message is wrapped in a
//! [`Message`], which exposes an ordered field table and typed field values. The
//! set of message types is closed, so an unhandled shape is a compile error
//! rather than a runtime surprise.

use super::record::{
    BytesList, Example, Feature, FeatureList, FeatureLists, Features, FloatList, Int64List, Record,
    SequenceExample, feature::Kind,
};
use std::collections::HashMap;

/// Every message type of the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Example,
    SequenceExample,
    Features,
    Feature,
    FeatureList,
    FeatureLists,
    BytesList,
    FloatList,
    Int64List,
}

/// One row of a message's field table
#[derive(Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub number: u32,
    pub name: &'static str,
    pub json_name: &'static str,
    /// Containing oneof group, at most one member of which is ever populated
    pub oneof: Option<&'static str>,
}

impl FieldDescriptor {
    const fn new(number: u32, name: &'static str, json_name: &'static str) -> Self {
        Self { number, name, json_name, oneof: None }
    }

    const fn oneof(number: u32, name: &'static str, json_name: &'static str, group: &'static str) -> Self {
        Self { number, name, json_name, oneof: Some(group) }
    }
}

// Field tables, in .proto declaration order
const LIST_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new(1, "value", "value")];
const FEATURE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::oneof(1, "bytes_list", "bytesList", "kind"),
    FieldDescriptor::oneof(2, "float_list", "floatList", "kind"),
    FieldDescriptor::oneof(3, "int64_list", "int64List", "kind"),
];
const FEATURES_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new(1, "feature", "feature")];
const FEATURE_LIST_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new(1, "feature", "feature")];
const FEATURE_LISTS_FIELDS: &[FieldDescriptor] =
    &[FieldDescriptor::new(1, "feature_list", "featureList")];
const EXAMPLE_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new(1, "features", "features")];
const SEQUENCE_EXAMPLE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(1, "context", "context"),
    FieldDescriptor::new(2, "feature_lists", "featureLists"),
];

impl MessageType {
    #[inline]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Example => "tensorflow.Example",
            Self::SequenceExample => "tensorflow.SequenceExample",
            Self::Features => "tensorflow.Features",
            Self::Feature => "tensorflow.Feature",
            Self::FeatureList => "tensorflow.FeatureList",
            Self::FeatureLists => "tensorflow.FeatureLists",
            Self::BytesList => "tensorflow.BytesList",
            Self::FloatList => "tensorflow.FloatList",
            Self::Int64List => "tensorflow.Int64List",
        }
    }

    /// Fields in declaration order
    #[inline]
    pub const fn fields(self) -> &'static [FieldDescriptor] {
        match self {
            Self::Example => EXAMPLE_FIELDS,
            Self::SequenceExample => SEQUENCE_EXAMPLE_FIELDS,
            Self::Features => FEATURES_FIELDS,
            Self::Feature => FEATURE_FIELDS,
            Self::FeatureList => FEATURE_LIST_FIELDS,
            Self::FeatureLists => FEATURE_LISTS_FIELDS,
            Self::BytesList | Self::FloatList | Self::Int64List => LIST_FIELDS,
        }
    }
}

/// A borrowed message of a known type
#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    Example(&'a Example),
    SequenceExample(&'a SequenceExample),
    Features(&'a Features),
    Feature(&'a Feature),
    FeatureList(&'a FeatureList),
    FeatureLists(&'a FeatureLists),
    BytesList(&'a BytesList),
    FloatList(&'a FloatList),
    Int64List(&'a Int64List),
}

/// A single value
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Int64(i64),
    Float(f32),
    Bytes(&'a [u8]),
    Message(Message<'a>),
}

/// A populated field
#[derive(Debug, Clone)]
pub enum Field<'a> {
    Singular(Value<'a>),
    /// Repeated field, elements in stored order
    List(Vec<Value<'a>>),
    Map(Map<'a>),
}

/// Map key, tagged with its declared key kind
///
/// Keys of one map always share a variant. Ordering is numeric for the integer
/// kinds and byte-wise for strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MapKey<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Str(&'a str),
}

/// Map field entries, in whatever order the map iterated them
#[derive(Debug, Clone, Default)]
pub struct Map<'a> {
    entries: Vec<(MapKey<'a>, Value<'a>)>,
}

impl<'a> Map<'a> {
    #[inline]
    pub fn new(entries: Vec<(MapKey<'a>, Value<'a>)>) -> Self { Self { entries } }

    /// View a string-keyed map, converting each value with `value`
    #[inline]
    pub fn with_string_keys<V>(map: &'a HashMap<String, V>, value: impl Fn(&'a V) -> Value<'a>) -> Self {
        Self { entries: map.iter().map(|(k, v)| (MapKey::Str(k), value(v))).collect() }
    }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries ordered by key, independent of insertion or iteration order
    pub fn into_sorted(mut self) -> Vec<(MapKey<'a>, Value<'a>)> {
        self.entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        self.entries
    }
}

impl<'a> Message<'a> {
    #[inline]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::Example(_) => MessageType::Example,
            Self::SequenceExample(_) => MessageType::SequenceExample,
            Self::Features(_) => MessageType::Features,
            Self::Feature(_) => MessageType::Feature,
            Self::FeatureList(_) => MessageType::FeatureList,
            Self::FeatureLists(_) => MessageType::FeatureLists,
            Self::BytesList(_) => MessageType::BytesList,
            Self::FloatList(_) => MessageType::FloatList,
            Self::Int64List(_) => MessageType::Int64List,
        }
    }

    /// Value of `field`, `None` when it is unpopulated
    ///
    /// Unset sub-messages and inactive oneof members are unpopulated. Repeated and
    /// map fields are always populated, possibly empty.
    ///
    /// # Panics
    /// If `field` is not a row of this message's table.
    pub fn get(&self, field: &FieldDescriptor) -> Option<Field<'a>> {
        let message = |m| Field::Singular(Value::Message(m));

        match (*self, field.number) {
            (Self::Example(m), 1) => m.features.as_ref().map(|f| message(Self::Features(f))),
            (Self::SequenceExample(m), 1) => m.context.as_ref().map(|f| message(Self::Features(f))),
            (Self::SequenceExample(m), 2) => {
                m.feature_lists.as_ref().map(|f| message(Self::FeatureLists(f)))
            }
            (Self::Features(m), 1) => Some(Field::Map(Map::with_string_keys(&m.feature, |f| {
                Value::Message(Self::Feature(f))
            }))),
            (Self::Feature(m), number @ 1..=3) => match (&m.kind, number) {
                (Some(Kind::BytesList(l)), 1) => Some(message(Self::BytesList(l))),
                (Some(Kind::FloatList(l)), 2) => Some(message(Self::FloatList(l))),
                (Some(Kind::Int64List(l)), 3) => Some(message(Self::Int64List(l))),
                _ => None,
            },
            (Self::FeatureList(m), 1) => Some(Field::List(
                m.feature.iter().map(|f| Value::Message(Self::Feature(f))).collect(),
            )),
            (Self::FeatureLists(m), 1) => Some(Field::Map(Map::with_string_keys(
                &m.feature_list,
                |l| Value::Message(Self::FeatureList(l)),
            ))),
            (Self::BytesList(m), 1) => {
                Some(Field::List(m.value.iter().map(|b| Value::Bytes(b)).collect()))
            }
            (Self::FloatList(m), 1) => {
                Some(Field::List(m.value.iter().map(|&v| Value::Float(v)).collect()))
            }
            (Self::Int64List(m), 1) => {
                Some(Field::List(m.value.iter().map(|&v| Value::Int64(v)).collect()))
            }
            (other, number) => unreachable!(
                "{} has no field {} = {number}",
                other.message_type().full_name(),
                field.name
            ),
        }
    }

    /// Populated fields, in declaration order
    #[inline]
    pub fn populated(self) -> impl Iterator<Item = (&'static FieldDescriptor, Field<'a>)> {
        self.message_type().fields().iter().filter_map(move |fd| self.get(fd).map(|v| (fd, v)))
    }
}

impl<'a> From<&'a Record> for Message<'a> {
    #[inline]
    fn from(record: &'a Record) -> Self {
        match record {
            Record::Example(m) => Self::Example(m),
            Record::SequenceExample(m) => Self::SequenceExample(m),
        }
    }
}
