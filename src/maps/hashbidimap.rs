//! Unordered bidirectional map backed by two hash maps.
//!
//! [`HashBidiMap`] keeps a forward map from keys to values and an inverse
//! map from values to keys. Each side stores its counterpart directly, so
//! keys and values must be cloneable.
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::maps::HashBidiMap;
//!
//! let mut map = HashBidiMap::new();
//! map.put("one", 1);
//! map.put("uno", 1);
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.get_key(&1), Some(&"uno"));
//! assert_eq!(map.get(&"one"), None);
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash};

use tracing::trace;

use super::{DefaultHashBuilder, HashMap};
use crate::containers::{BidiMap, Container, Map};

/// A bidirectional map with unique keys and unique values.
///
/// Putting a pair whose key or value is already present evicts the previous
/// pair, exactly as [`TreeBidiMap`](super::TreeBidiMap) does.
pub struct HashBidiMap<K, T, S = DefaultHashBuilder> {
    forward: HashMap<K, T, S>,
    inverse: HashMap<T, K, S>,
}

impl<K, T> HashBidiMap<K, T> {
    /// Creates an empty map using [`DefaultHashBuilder`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K, T, S> HashBidiMap<K, T, S> {
    /// Creates an empty map whose two sides hash with copies of `hash_builder`.
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self
    where
        S: Clone,
    {
        Self {
            forward: HashMap::with_hasher(hash_builder.clone()),
            inverse: HashMap::with_hasher(hash_builder),
        }
    }

    /// Returns the number of pairs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if the map holds no pairs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Removes every pair.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing bidirectional hash map");
        self.forward.clear();
        self.inverse.clear();
    }

    /// Returns the keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.forward.keys()
    }

    /// Returns the values in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.inverse.keys()
    }

    /// Returns the pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> {
        self.forward.iter()
    }
}

impl<K, T, S> HashBidiMap<K, T, S>
where
    K: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    /// Associates `key` with `value`, evicting the pairs that held either.
    pub fn put(&mut self, key: K, value: T) {
        if let Some(stale) = self.forward.remove(&key) {
            self.inverse.remove(&stale);
            trace!("evicted pair holding the key");
        }
        if let Some(stale) = self.inverse.remove(&value) {
            self.forward.remove(&stale);
            trace!("evicted pair holding the value");
        }
        self.forward.put(key.clone(), value.clone());
        self.inverse.put(value, key);
    }

    /// Returns the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&T> {
        self.forward.get(key)
    }

    /// Returns the key associated with `value`.
    #[must_use]
    pub fn get_key(&self, value: &T) -> Option<&K> {
        self.inverse.get(value)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Returns `true` if `value` is present.
    #[must_use]
    pub fn contains_value(&self, value: &T) -> bool {
        self.inverse.contains_key(value)
    }

    /// Removes the pair holding `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<T> {
        let value = self.forward.remove(key)?;
        self.inverse.remove(&value);
        Some(value)
    }

    /// Removes the pair holding `value` and returns its key.
    pub fn remove_value(&mut self, value: &T) -> Option<K> {
        let key = self.inverse.remove(value)?;
        self.forward.remove(&key);
        Some(key)
    }
}

// =============================================================================
// Container Trait Implementations
// =============================================================================

impl<K, T, S> Container for HashBidiMap<K, T, S> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl<K, T, S> Map<K, T> for HashBidiMap<K, T, S>
where
    K: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    fn put(&mut self, key: K, value: T) {
        Self::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<&T> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &K) {
        Self::remove(self, key);
    }
}

impl<K, T, S> BidiMap<K, T> for HashBidiMap<K, T, S>
where
    K: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    fn get_key(&self, value: &T) -> Option<&K> {
        Self::get_key(self, value)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Clone, T: Clone, S: Clone> Clone for HashBidiMap<K, T, S> {
    fn clone(&self) -> Self {
        Self {
            forward: self.forward.clone(),
            inverse: self.inverse.clone(),
        }
    }
}

impl<K, T, S: Default> Default for HashBidiMap<K, T, S> {
    fn default() -> Self {
        Self {
            forward: HashMap::default(),
            inverse: HashMap::default(),
        }
    }
}

impl<K, T, S> PartialEq for HashBidiMap<K, T, S>
where
    K: Eq + Hash,
    T: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<K: Eq + Hash, T: Eq, S: BuildHasher> Eq for HashBidiMap<K, T, S> {}

impl<K, T, S> Extend<(K, T)> for HashBidiMap<K, T, S>
where
    K: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, T, S> FromIterator<(K, T)> for HashBidiMap<K, T, S>
where
    K: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: fmt::Debug, T: fmt::Debug, S> fmt::Debug for HashBidiMap<K, T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, T: serde::Serialize, S> serde::Serialize for HashBidiMap<K, T, S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serde::Serialize::serialize(&self.forward, serializer)
    }
}

#[cfg(feature = "serde")]
struct HashBidiMapVisitor<K, T, S> {
    marker: std::marker::PhantomData<HashBidiMap<K, T, S>>,
}

#[cfg(feature = "serde")]
impl<K, T, S> HashBidiMapVisitor<K, T, S> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, T, S> serde::de::Visitor<'de> for HashBidiMapVisitor<K, T, S>
where
    K: serde::Deserialize<'de> + Clone + Eq + Hash,
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    type Value = HashBidiMap<K, T, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = HashBidiMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, T, S> serde::Deserialize<'de> for HashBidiMap<K, T, S>
where
    K: serde::Deserialize<'de> + Clone + Eq + Hash,
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(HashBidiMapVisitor::new())
    }
}

// =============================================================================
// JSON Support
// =============================================================================

#[cfg(feature = "json")]
impl<K: serde::Serialize, T: serde::Serialize, S> crate::json::JsonSerializer
    for HashBidiMap<K, T, S>
{
    fn to_json(&self) -> crate::error::Result<String> {
        crate::json::encode(self)
    }
}

#[cfg(feature = "json")]
impl<K, T, S> crate::json::JsonDeserializer for HashBidiMap<K, T, S>
where
    K: serde::de::DeserializeOwned + Clone + Eq + Hash,
    T: serde::de::DeserializeOwned + Clone + Eq + Hash,
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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_consistent(map: &HashBidiMap<i32, i32>) {
        assert_eq!(map.forward.len(), map.inverse.len());
        for (key, value) in map.iter() {
            assert_eq!(map.get_key(value), Some(key));
        }
    }

    #[rstest]
    fn test_put_overwrites_key() {
        let mut map = HashBidiMap::new();
        map.put(1, 10);
        map.put(1, 20);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&20));
        assert_eq!(map.get_key(&10), None);
        assert_consistent(&map);
    }

    #[rstest]
    fn test_put_moves_value() {
        let mut map = HashBidiMap::new();
        map.put(1, 10);
        map.put(2, 10);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get(&2), Some(&10));
        assert_consistent(&map);
    }

    #[rstest]
    fn test_overlapping_domains() {
        let mut map = HashBidiMap::new();
        map.put(1, 2);
        map.put(2, 1);
        map.put(1, 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&1));
        assert_consistent(&map);
    }

    #[rstest]
    #[case(&[(1, 10), (2, 20), (3, 30)], 2, Some(20), 2)]
    #[case(&[(1, 10)], 5, None, 1)]
    #[case(&[], 1, None, 0)]
    fn test_remove(
        #[case] pairs: &[(i32, i32)],
        #[case] key: i32,
        #[case] expected: Option<i32>,
        #[case] remaining: usize,
    ) {
        let mut map: HashBidiMap<i32, i32> = pairs.iter().copied().collect();
        assert_eq!(map.remove(&key), expected);
        assert_eq!(map.len(), remaining);
        assert_consistent(&map);
    }

    #[rstest]
    fn test_remove_value() {
        let mut map: HashBidiMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
        assert_eq!(map.remove_value(&20), Some(2));
        assert!(!map.contains_key(&2));
        assert!(!map.contains_value(&20));
        assert_consistent(&map);
    }

    #[rstest]
    fn test_values_are_the_inverse_keys() {
        let map: HashBidiMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
        let mut values: Vec<i32> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![10, 20]);
    }
}
