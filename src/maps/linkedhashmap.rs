//! Hash map that remembers insertion order.
//!
//! [`LinkedHashMap`] answers lookups through a hash index and iterates its
//! entries in the order their keys were first inserted. Re-putting a key
//! updates the value in place without moving the entry.
//!
//! # Internal Structure
//!
//! Entries live in a slot vector in insertion order; the index maps each key
//! to its slot. Removal vacates a slot, and the vector is compacted once more
//! than half of its slots are vacant.
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::maps::LinkedHashMap;
//!
//! let mut map = LinkedHashMap::new();
//! map.put("c", 3);
//! map.put("a", 1);
//! map.put("b", 2);
//! map.put("c", 30);
//!
//! let keys: Vec<&str> = map.keys().copied().collect();
//! assert_eq!(keys, vec!["c", "a", "b"]);
//! assert_eq!(map.get(&"c"), Some(&30));
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use tracing::trace;

use super::DefaultHashBuilder;
use crate::containers::{Container, Map};

/// Slot vectors shorter than this are never compacted.
const MINIMUM_COMPACTION_LENGTH: usize = 16;

type Slot<K, V> = Option<(K, V)>;

/// A hash map that iterates in insertion order.
///
/// # Time Complexity
///
/// | Operation    | Complexity     |
/// |--------------|----------------|
/// | `put`        | O(1) amortized |
/// | `get`        | O(1) expected  |
/// | `remove`     | O(1) amortized |
/// | iteration    | O(N)           |
pub struct LinkedHashMap<K, V, S = DefaultHashBuilder> {
    index: std::collections::HashMap<K, usize, S>,
    slots: Vec<Slot<K, V>>,
}

impl<K, V> LinkedHashMap<K, V> {
    /// Creates an empty map using [`DefaultHashBuilder`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K, V, S> LinkedHashMap<K, V, S> {
    /// Creates an empty map that hashes keys with `hash_builder`.
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            index: std::collections::HashMap::with_hasher(hash_builder),
            slots: Vec::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the map is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn iter(&self) -> LinkedHashMapIterator<'_, K, V> {
        LinkedHashMapIterator {
            slots: self.slots.iter(),
            remaining: self.len(),
        }
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns the values in insertion order of their keys.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    /// Inserts `value` under `key` and returns the replaced value.
    ///
    /// A new key is appended to the iteration order; an existing key keeps
    /// its position.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            let Some((_, stored)) = self.slots[slot].as_mut() else {
                unreachable!("index points at a vacant slot");
            };
            return Some(std::mem::replace(stored, value));
        }
        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
        None
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_ref().map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key` and returns its value. Absent keys are ignored.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        let (_, value) = self.slots[slot].take()?;
        self.compact_if_sparse();
        Some(value)
    }

    fn compact_if_sparse(&mut self) {
        if self.slots.len() < MINIMUM_COMPACTION_LENGTH || self.index.len() * 2 >= self.slots.len() {
            return;
        }
        trace!(
            live = self.index.len(),
            slots = self.slots.len(),
            "compacting linked hash map"
        );
        self.slots.retain(Option::is_some);
        for (position, slot) in self.slots.iter().enumerate() {
            if let Some((key, _)) = slot
                && let Some(entry) = self.index.get_mut(key)
            {
                *entry = position;
            }
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`LinkedHashMap`] in insertion order.
pub struct LinkedHashMapIterator<'a, K, V> {
    slots: std::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for LinkedHashMapIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for LinkedHashMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.slots.by_ref().find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for LinkedHashMapIterator<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (key, value) = self.slots.by_ref().rev().find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some((key, value))
    }
}

impl<K, V> ExactSizeIterator for LinkedHashMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for LinkedHashMapIterator<'_, K, V> {}

// =============================================================================
// Container Trait Implementations
// =============================================================================

impl<K, V, S> Container for LinkedHashMap<K, V, S> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl<K: Clone + Eq + Hash, V, S: BuildHasher> Map<K, V> for LinkedHashMap<K, V, S> {
    fn put(&mut self, key: K, value: V) {
        Self::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &K) {
        Self::remove(self, key);
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Clone, V: Clone, S: Clone> Clone for LinkedHashMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            slots: self.slots.clone(),
        }
    }
}

impl<K, V, S: Default> Default for LinkedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

/// Two maps are equal when they hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq, S> PartialEq for LinkedHashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for LinkedHashMap<K, V, S> {}

impl<K: Clone + Eq + Hash, V, S: BuildHasher> Extend<(K, V)> for LinkedHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = LinkedHashMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for LinkedHashMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for LinkedHashMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize, S> serde::Serialize for LinkedHashMap<K, V, S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct LinkedHashMapVisitor<K, V, S> {
    marker: std::marker::PhantomData<LinkedHashMap<K, V, S>>,
}

#[cfg(feature = "serde")]
impl<K, V, S> LinkedHashMapVisitor<K, V, S> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::de::Visitor<'de> for LinkedHashMapVisitor<K, V, S>
where
    K: serde::Deserialize<'de> + Clone + Eq + Hash,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = LinkedHashMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Entries arrive in document order.
        let mut map = LinkedHashMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for LinkedHashMap<K, V, S>
where
    K: serde::Deserialize<'de> + Clone + Eq + Hash,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(LinkedHashMapVisitor::new())
    }
}

// =============================================================================
// JSON Support
// =============================================================================

#[cfg(feature = "json")]
impl<K: serde::Serialize, V: serde::Serialize, S> crate::json::JsonSerializer
    for LinkedHashMap<K, V, S>
{
    fn to_json(&self) -> crate::error::Result<String> {
        crate::json::encode(self)
    }
}

#[cfg(feature = "json")]
impl<K, V, S> crate::json::JsonDeserializer for LinkedHashMap<K, V, S>
where
    K: serde::de::DeserializeOwned + Clone + Eq + Hash,
    V: serde::de::DeserializeOwned,
    S: BuildHasher,
{
    fn from_json(&mut self, data: &str) -> crate::error::Result<()> {
        let entries = crate::json::decode_entries(data)?;
        self.clear();
        self.extend(entries);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
