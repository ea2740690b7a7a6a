//! JSON serialization for containers (feature `json`).
//!
//! Sequences serialize as JSON arrays and mappings as JSON objects in iteration order. Deserializing a
//! mapping keeps the document's key order.
//!
//! ## Notes
//! - `Value::Bytes` serializes as an array of integers; a JSON array always deserializes as `Value::List`.
//! - `Value::Tuple` serializes as an array too, so tuples come back as lists.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use pycoll_core::errors::{CoreError, ErrorKind};

use crate::counter::Counter;
use crate::deque::Deque;
use crate::dict::Dict;
use crate::errors::Result;
use crate::list::List;
use crate::text::Text;
use crate::value::Value;

/// Serialize to JSON. Implemented for every `Serialize` type.
pub trait ToJson: Serialize {
    /// ## Errors
    /// - `ValueError` if serialization fails (for example a map with non-string keys).
    fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(json_error)
    }

    /// ## Errors
    /// - `ValueError` if serialization fails.
    fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(json_error)
    }
}

/// Deserialize from JSON. Implemented for every `DeserializeOwned` type.
pub trait FromJson: for<'de> Deserialize<'de> {
    /// ## Errors
    /// - `ValueError` if `json` is malformed or has the wrong shape.
    fn from_json(json: &str) -> Result<Self>
    where
        Self: Sized,
    {
        serde_json::from_str(json).map_err(json_error)
    }
}

impl<T: Serialize> ToJson for T {}
impl<T: for<'de> Deserialize<'de>> FromJson for T {}

fn json_error(err: serde_json::Error) -> crate::errors::CollectionError {
    CoreError::with_message(ErrorKind::Value, format!("invalid JSON: {err}")).into()
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.collect_seq(b.iter()),
            Value::List(items) | Value::Tuple(items) => serializer.collect_seq(items.iter()),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean, a number, a string or an array")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::None)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::None)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for List<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(List::from)
    }
}

impl<T: Serialize> Serialize for Deque<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Deque<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Deque::from)
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Text::new)
    }
}

impl<K: Serialize, V: Serialize> Serialize for Dict<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Collects map entries in document order.
struct OrderedMapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K: Deserialize<'de>, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<K, V> {
    type Value = Vec<(K, V)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl<'de, K, V> Deserialize<'de> for Dict<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = deserializer.deserialize_map(OrderedMapVisitor(PhantomData))?;
        Ok(entries.into_iter().collect())
    }
}

impl<T: Serialize + Eq + Hash + Clone> Serialize for Counter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, T> Deserialize<'de> for Counter<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries: Vec<(T, usize)> = deserializer.deserialize_map(OrderedMapVisitor(PhantomData))?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    #[test]
    fn dict_keeps_document_order() {
        let d: Dict<String, i64> = Dict::from_json(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        assert_eq!(d.keys().cloned().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(d.to_json().unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn value_round_trip() {
        let v = Value::List(vec![Value::None, Value::Bool(true), Value::Int(3), Value::from("x")]);
        let json = v.to_json().unwrap();
        assert_eq!(json, r#"[null,true,3,"x"]"#);
        assert_eq!(Value::from_json(&json).unwrap(), v);
    }

    #[test]
    fn counter_and_deque() {
        let c: Counter<String> = Counter::from_json(r#"{"b": 2, "a": 1}"#).unwrap();
        assert_eq!(c.most_common(None), vec![("b".to_string(), 2), ("a".to_string(), 1)]);
        let d: Deque<i32> = Deque::from_json("[1, 2, 3]").unwrap();
        assert_eq!(d.to_json().unwrap(), "[1,2,3]");
        assert_eq!(Text::new("hi").to_json().unwrap(), r#""hi""#);
    }

    #[test]
    fn malformed_json_is_value_error() {
        let err = List::<i32>::from_json("[1,").unwrap_err();
        assert!(matches!(err, CollectionError::Value(_)));
    }
}
