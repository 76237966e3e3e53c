//! Unordered map backed by the standard hash table.
//!
//! [`HashMap`] adapts `std::collections::HashMap` to the [`Map`] contract and
//! picks its hasher through [`DefaultHashBuilder`].
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::maps::HashMap;
//!
//! let mut map = HashMap::new();
//! map.put("a", 1);
//! map.put("b", 2);
//! assert_eq!(map.get(&"a"), Some(&1));
//! assert_eq!(map.remove(&"a"), Some(1));
//! assert_eq!(map.len(), 1);
//! ```

use std::collections::hash_map;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::DefaultHashBuilder;
use crate::containers::{Container, Map};

/// An unordered map. Iteration order is unspecified.
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    inner: std::collections::HashMap<K, V, S>,
}

impl<K, V> HashMap<K, V> {
    /// Creates an empty map using [`DefaultHashBuilder`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: std::collections::HashMap::with_capacity_and_hasher(
                capacity,
                DefaultHashBuilder::default(),
            ),
        }
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map that hashes keys with `hash_builder`.
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            inner: std::collections::HashMap::with_hasher(hash_builder),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns the keys in unspecified order.
    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.inner.keys()
    }

    /// Returns the values in unspecified order.
    pub fn values(&self) -> hash_map::Values<'_, K, V> {
        self.inner.values()
    }

    /// Returns the entries in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.inner.iter()
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> HashMap<K, V, S> {
    /// Inserts `value` under `key` and returns the replaced value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Removes `key` and returns its value. Absent keys are ignored.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }
}

// =============================================================================
// Container Trait Implementations
// =============================================================================

impl<K, V, S> Container for HashMap<K, V, S> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Map<K, V> for HashMap<K, V, S> {
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

impl<K: Clone, V: Clone, S: Clone> Clone for HashMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, S: Default> Default for HashMap<K, V, S> {
    #[inline]
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Eq + Hash, V: PartialEq, S: BuildHasher> PartialEq for HashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Eq + Hash, V: Eq, S: BuildHasher> Eq for HashMap<K, V, S> {}

impl<K: Eq + Hash, V, S: BuildHasher> Extend<(K, V)> for HashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> FromIterator<(K, V)> for HashMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize, S> serde::Serialize for HashMap<K, V, S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for HashMap<K, V, S>
where
    K: serde::Deserialize<'de> + Eq + Hash,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <std::collections::HashMap<K, V, S> as serde::Deserialize>::deserialize(deserializer)
            .map(|inner| Self { inner })
    }
}

// =============================================================================
// JSON Support
// =============================================================================

#[cfg(feature = "json")]
impl<K: serde::Serialize, V: serde::Serialize, S> crate::json::JsonSerializer
    for HashMap<K, V, S>
{
    fn to_json(&self) -> crate::error::Result<String> {
        crate::json::encode(self)
    }
}

#[cfg(feature = "json")]
impl<K, V, S> crate::json::JsonDeserializer for HashMap<K, V, S>
where
    K: serde::de::DeserializeOwned + Eq + Hash,
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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_put_get_remove() {
        let mut map: HashMap<&str, i32> = HashMap::new();
        assert_eq!(map.put("a", 1), None);
        assert_eq!(map.put("a", 2), Some(1));
        assert_eq!(map.get(&"a"), Some(&2));
        assert_eq!(map.remove(&"a"), Some(2));
        assert_eq!(map.remove(&"a"), None);
        assert!(map.is_empty());
    }

    #[rstest]
    fn test_keys_and_values_cover_entries() {
        let map: HashMap<i32, i32> = (0..10).map(|number| (number, number * number)).collect();
        let mut keys: Vec<i32> = map.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..10).collect::<Vec<_>>());
        assert_eq!(map.values().sum::<i32>(), 285);
    }

    #[rstest]
    fn test_custom_hasher() {
        let mut map: HashMap<i32, char, std::hash::RandomState> =
            HashMap::with_hasher(std::hash::RandomState::new());
        map.put(1, 'a');
        assert!(map.contains_key(&1));
        assert!(Map::contains_key(&map, &1));
    }

    #[rstest]
    fn test_equality() {
        let left: HashMap<i32, char> = [(1, 'a'), (2, 'b')].into_iter().collect();
        let right: HashMap<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
        assert_eq!(left, right);
    }
}
