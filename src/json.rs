//! JSON conversion for containers.
//!
//! Every map implements [`JsonSerializer`] and [`JsonDeserializer`]. A map is
//! written as one JSON object in its iteration order. Reading replaces the
//! contents of an existing map, so its comparators or hasher are kept:
//!
//! ```rust
//! use bidimaps::comparator::ReverseOrder;
//! use bidimaps::json::{JsonDeserializer, JsonSerializer};
//! use bidimaps::maps::TreeMap;
//!
//! let mut map: TreeMap<String, i32, ReverseOrder> = TreeMap::default();
//! map.from_json(r#"{"a": 1, "b": 2}"#)?;
//! assert_eq!(map.to_json()?, r#"{"b":2,"a":1}"#);
//! # Ok::<(), bidimaps::error::Error>(())
//! ```
//!
//! Decoding is all-or-nothing: if any entry fails to decode, the map keeps
//! its previous contents and [`Error::Decode`] is returned.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, DeserializeOwned, Deserializer, MapAccess, Visitor};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

// =============================================================================
// Traits
// =============================================================================

/// Writes a container as a JSON object.
pub trait JsonSerializer {
    /// Returns the JSON encoding of the container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if a key or value cannot be encoded, for
    /// instance a key that is not a string or a number.
    fn to_json(&self) -> Result<String>;
}

/// Replaces the contents of a container with a JSON object.
pub trait JsonDeserializer {
    /// Clears the container and puts every entry of `data` in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if `data` is not a JSON object whose keys and
    /// values decode to the container types. The container is left unchanged.
    fn from_json(&mut self, data: &str) -> Result<()>;
}

// =============================================================================
// Helpers
// =============================================================================

pub(crate) fn encode<S: Serialize + ?Sized>(container: &S) -> Result<String> {
    serde_json::to_string(container).map_err(Error::Encode)
}

/// Decodes every entry of a JSON object, keeping document order and duplicates.
pub(crate) fn decode_entries<K, V>(data: &str) -> Result<Vec<(K, V)>>
where
    K: DeserializeOwned,
    V: DeserializeOwned,
{
    serde_json::from_str::<Entries<K, V>>(data)
        .map(|entries| entries.0)
        .map_err(|error| {
            debug!(%error, line = error.line(), column = error.column(), "rejected JSON object");
            Error::Decode(error)
        })
}

struct Entries<K, V>(Vec<(K, V)>);

struct EntriesVisitor<K, V> {
    marker: PhantomData<(K, V)>,
}

impl<K, V> EntriesVisitor<K, V> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = Entries<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry()? {
            entries.push(entry);
        }
        Ok(Entries(entries))
    }
}

impl<'de, K, V> Deserialize<'de> for Entries<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_decode_entries_keeps_document_order_and_duplicates() {
        let entries: Vec<(String, i32)> =
            decode_entries(r#"{"z": 1, "a": 2, "z": 3}"#).unwrap();
        assert_eq!(
            entries,
            vec![
                ("z".to_string(), 1),
                ("a".to_string(), 2),
                ("z".to_string(), 3)
            ]
        );
    }

    #[rstest]
    fn test_decode_entries_numeric_keys() {
        let entries: Vec<(i64, bool)> = decode_entries(r#"{"-4": true, "10": false}"#).unwrap();
        assert_eq!(entries, vec![(-4, true), (10, false)]);
    }

    #[rstest]
    #[case("")]
    #[case("[1, 2]")]
    #[case(r#"{"a": "not a number"}"#)]
    #[case(r#"{"a": 1"#)]
    fn test_decode_entries_rejects(#[case] input: &str) {
        let result = decode_entries::<String, i32>(input);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[rstest]
    fn test_encode_rejects_non_string_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(vec![1], 1);
        assert!(matches!(encode(&map), Err(Error::Encode(_))));
    }
}
