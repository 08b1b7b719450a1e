//! Structural JSON encoder
//!
//! Renders a [`Message`] as compact JSON:
//!
//! - message fields in declaration order, unpopulated ones omitted
//! - oneof groups as a single key named after the active member
//! - repeated fields as arrays in stored order
//! - maps as objects with sorted keys, so equal maps always render identically
//! - int64 as decimal numbers, floats in shortest round-trip form, bytes as
//!   escaped strings (UTF-8 required)

mod escape;
mod number;

use super::error::{Error, Result};
use super::model::{Field, Map, MapKey, Message, Value};
use super::record::Record;

pub use escape::append_string;
pub use number::{append_f32, append_i64};

/// Encode one record into a fresh buffer
#[inline]
pub fn encode_to_json(record: &Record) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(256);
    encode_into(&mut out, Message::from(record))?;
    Ok(out)
}

/// Append the JSON of `message` to `out`
///
/// On error `out` is truncated back to its previous length, so a record is
/// either written whole or not at all.
pub fn encode_into(out: &mut Vec<u8>, message: Message<'_>) -> Result<()> {
    let start = out.len();
    let result = JsonWriter { out: &mut *out }.write_message(message);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

struct JsonWriter<'o> {
    out: &'o mut Vec<u8>,
}

impl JsonWriter<'_> {
    #[inline]
    fn write(&mut self, s: &[u8]) { self.out.extend_from_slice(s) }

    #[inline]
    fn write_string(&mut self, s: &[u8]) -> Result<()> {
        append_string(self.out, s).map_err(|offset| Error::InvalidUtf8 { offset })
    }

    fn write_message(&mut self, message: Message<'_>) -> Result<()> {
        self.write(b"{");
        let mut comma = false;

        for (fd, field) in message.populated() {
            if comma {
                self.write(b",");
            }
            // JSON names are plain identifiers, nothing to escape
            self.write(b"\"");
            self.write(fd.json_name.as_bytes());
            self.write(b"\":");
            self.write_field(field)?;
            comma = true;
        }

        self.write(b"}");
        Ok(())
    }

    #[inline]
    fn write_field(&mut self, field: Field<'_>) -> Result<()> {
        match field {
            Field::Singular(value) => self.write_value(value),
            Field::List(items) => self.write_list(&items),
            Field::Map(map) => self.write_map(map),
        }
    }

    fn write_list(&mut self, items: &[Value<'_>]) -> Result<()> {
        self.write(b"[");
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.write(b",");
            }
            self.write_value(item)?;
        }
        self.write(b"]");
        Ok(())
    }

    fn write_map(&mut self, map: Map<'_>) -> Result<()> {
        self.write(b"{");
        for (i, (key, value)) in map.into_sorted().into_iter().enumerate() {
            if i > 0 {
                self.write(b",");
            }
            self.write_map_key(key)?;
            self.write(b":");
            self.write_value(value)?;
        }
        self.write(b"}");
        Ok(())
    }

    fn write_map_key(&mut self, key: MapKey<'_>) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        let text = match key {
            MapKey::Str(s) => return self.write_string(s.as_bytes()),
            MapKey::Bool(b) => if b { "true" } else { "false" },
            MapKey::Int(i) => buffer.format(i),
            MapKey::Uint(u) => buffer.format(u),
        };
        self.write(b"\"");
        self.write(text.as_bytes());
        self.write(b"\"");
        Ok(())
    }

    fn write_value(&mut self, value: Value<'_>) -> Result<()> {
        match value {
            Value::Int64(i) => append_i64(self.out, i),
            Value::Float(f) => append_f32(self.out, f),
            Value::Bytes(b) => self.write_string(b)?,
            Value::Message(m) => self.write_message(m)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{Example, Feature, FeatureList, FeatureLists, Features, SequenceExample};
    use std::collections::HashMap;

    fn movie() -> Feature { Feature::bytes_list(["The Shawshank Redemption", "Fight Club"]) }

    fn movie_ratings() -> Feature { Feature::float_list(vec![9.0, 9.7]) }

    fn age() -> Feature { Feature::int64_list(vec![29]) }

    fn features<const N: usize>(entries: [(&str, Feature); N]) -> Features {
        Features { feature: entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect() }
    }

    fn json(record: impl Into<Record>) -> String {
        String::from_utf8(encode_to_json(&record.into()).unwrap()).unwrap()
    }

    #[test]
    fn test_example() {
        let example = Example {
            features: Some(features([
                ("movie_ratings", movie_ratings()),
                ("age", age()),
                ("movie", movie()),
            ])),
        };

        assert_eq!(
            json(example),
            concat!(
                r#"{"features":{"feature":{"#,
                r#""age":{"int64List":{"value":[29]}},"#,
                r#""movie":{"bytesList":{"value":["The Shawshank Redemption","Fight Club"]}},"#,
                r#""movie_ratings":{"floatList":{"value":[9,9.7]}}"#,
                r#"}}}"#,
            )
        );
    }

    #[test]
    fn test_sequence_example() {
        let actors = FeatureList {
            feature: vec![
                Feature::bytes_list(["Tim Robbins", "Morgan Freeman"]),
                Feature::bytes_list(["Brad Pitt", "Edward Norton", "Helena Bonham Carter"]),
            ],
        };
        let example = SequenceExample {
            context: Some(features([("age", age())])),
            feature_lists: Some(FeatureLists {
                feature_list: HashMap::from([
                    ("movie_names".to_owned(), FeatureList { feature: vec![movie()] }),
                    ("movie_ratings".to_owned(), FeatureList { feature: vec![movie_ratings()] }),
                    ("actors".to_owned(), actors),
                ]),
            }),
        };

        assert_eq!(
            json(example),
            concat!(
                r#"{"context":{"feature":{"age":{"int64List":{"value":[29]}}}},"#,
                r#""featureLists":{"featureList":{"#,
                r#""actors":{"feature":["#,
                r#"{"bytesList":{"value":["Tim Robbins","Morgan Freeman"]}},"#,
                r#"{"bytesList":{"value":["Brad Pitt","Edward Norton","Helena Bonham Carter"]}}"#,
                r#"]},"#,
                r#""movie_names":{"feature":[{"bytesList":{"value":["The Shawshank Redemption","Fight Club"]}}]},"#,
                r#""movie_ratings":{"feature":[{"floatList":{"value":[9,9.7]}}]}"#,
                r#"}}}"#,
            )
        );
    }

    #[test]
    fn test_unset_fields_omitted() {
        assert_eq!(json(Example::default()), "{}");
        assert_eq!(json(SequenceExample::default()), "{}");

        let example = SequenceExample { context: None, feature_lists: Some(FeatureLists::default()) };
        assert_eq!(json(example), r#"{"featureLists":{"featureList":{}}}"#);
    }

    #[test]
    fn test_empty_containers_kept() {
        let example = Example {
            features: Some(features([
                ("unset", Feature::default()),
                ("empty", Feature::int64_list(Vec::new())),
            ])),
        };
        assert_eq!(
            json(example),
            r#"{"features":{"feature":{"empty":{"int64List":{"value":[]}},"unset":{}}}}"#
        );
    }

    #[test]
    fn test_int64_extremes_are_exact() {
        let example =
            Example { features: Some(features([("id", Feature::int64_list(vec![i64::MIN, -1, i64::MAX]))])) };
        assert_eq!(
            json(example),
            r#"{"features":{"feature":{"id":{"int64List":{"value":[-9223372036854775808,-1,9223372036854775807]}}}}}"#
        );
    }

    #[test]
    fn test_keys_and_values_escaped() {
        let example = Example {
            features: Some(features([("tab\there", Feature::bytes_list([&b"line\nbreak \"q\""[..]]))])),
        };
        let out = json(example);
        assert_eq!(
            out,
            r#"{"features":{"feature":{"tab\there":{"bytesList":{"value":["line\nbreak \"q\""]}}}}}"#
        );
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn test_invalid_utf8_leaves_no_output() {
        let example = Example {
            features: Some(features([
                ("a_ok", Feature::bytes_list(["fine"])),
                ("b_bad", Feature::bytes_list([vec![b'x', 0xc3]])),
            ])),
        };

        let mut out = b"{\"previous\":1}\n".to_vec();
        let err = encode_into(&mut out, Message::Example(&example)).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { offset: 1 }));
        assert_eq!(out, b"{\"previous\":1}\n");
    }

    #[test]
    fn test_integer_map_keys_quoted_and_numeric() {
        let list = crate::core::record::Int64List { value: vec![7] };
        let map = Map::new(vec![
            (MapKey::Int(10), Value::Message(Message::Int64List(&list))),
            (MapKey::Int(-3), Value::Int64(1)),
            (MapKey::Int(2), Value::Float(0.5)),
        ]);

        let mut out = Vec::new();
        JsonWriter { out: &mut out }.write_map(map).unwrap();
        assert_eq!(out, br#"{"-3":1,"2":0.5,"10":{"value":[7]}}"#);
    }

    #[test]
    fn test_map_output_independent_of_insertion_order() {
        let names = ["zeta", "alpha", "mid", "beta", "omega", "gamma", "delta"];
        let forward = features(names.map(|n| (n, age())));
        let mut reversed = names;
        reversed.reverse();
        let backward = features(reversed.map(|n| (n, age())));

        let a = json(Example { features: Some(forward) });
        let b = json(Example { features: Some(backward) });
        assert_eq!(a, b);
    }
}
