//! Ordered map based on a Red-Black Tree.
//!
//! [`TreeMap`] wraps a [`RedBlackTree`] with the map contract and a set of
//! enumeration helpers that visit entries in key order.
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::maps::TreeMap;
//!
//! let map: TreeMap<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
//!
//! let odd = map.select(|key, _| key % 2 == 1);
//! assert_eq!(odd.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
//! assert_eq!(map.find(|_, value| *value == "b"), Some((&2, &"b")));
//! assert_eq!(map.floor(&10), Some((&3, &"c")));
//! ```

use std::fmt;

use crate::comparator::{Comparator, NaturalOrder};
use crate::containers::{Container, Map};
use crate::trees::{Cursor, Iter, RedBlackTree};

/// An ordered map whose keys are sorted by the comparator `C`.
///
/// # Time Complexity
///
/// | Operation          | Complexity |
/// |--------------------|------------|
/// | `put`              | O(log N)   |
/// | `get`              | O(log N)   |
/// | `remove`           | O(log N)   |
/// | `floor`/`ceiling`  | O(log N)   |
/// | `each`/`select`    | O(N)       |
pub struct TreeMap<K, V, C = NaturalOrder> {
    tree: RedBlackTree<K, V, C>,
}

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map ordered by [`NaturalOrder`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    /// Returns the comparator ordering the keys.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.tree.keys()
    }

    /// Returns the values in ascending key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.tree.values()
    }

    /// Returns the entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    /// Returns a cursor positioned before the first entry.
    #[must_use]
    pub const fn cursor(&self) -> Cursor<'_, K, V, C> {
        self.tree.cursor()
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        self.tree.min()
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        self.tree.max()
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// Calls `function` on every entry in key order.
    pub fn each<F>(&self, mut function: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self {
            function(key, value);
        }
    }

    /// Returns `true` if `predicate` holds for at least one entry.
    pub fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.iter().any(|(key, value)| predicate(key, value))
    }

    /// Returns `true` if `predicate` holds for every entry.
    ///
    /// An empty map satisfies every predicate.
    pub fn all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.iter().all(|(key, value)| predicate(key, value))
    }

    /// Returns the first entry in key order that satisfies `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<(&K, &V)>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.iter().find(|&(key, value)| predicate(key, value))
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Inserts `value` under `key` and returns the replaced value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.tree.put(key, value)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Removes `key` and returns its value. Absent keys are ignored.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key)
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    #[must_use]
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.floor(key)
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    #[must_use]
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.ceiling(key)
    }

    /// Builds a new map from the entries returned by `function`.
    ///
    /// The result uses a copy of this map's comparator. Entries mapped to
    /// the same key collapse, and the last one in key order wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::maps::TreeMap;
    ///
    /// let map: TreeMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
    /// let swapped = map.map(|key, value| (*value, *key));
    /// assert_eq!(swapped.get(&20), Some(&2));
    /// ```
    #[must_use]
    pub fn map<K2, V2, F>(&self, mut function: F) -> TreeMap<K2, V2, C>
    where
        C: Comparator<K2> + Clone,
        F: FnMut(&K, &V) -> (K2, V2),
    {
        let mut mapped = TreeMap::with_comparator(self.comparator().clone());
        for (key, value) in self {
            let (key, value) = function(key, value);
            mapped.put(key, value);
        }
        mapped
    }

    /// Returns a new map holding the entries that satisfy `predicate`.
    #[must_use]
    pub fn select<P>(&self, mut predicate: P) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        P: FnMut(&K, &V) -> bool,
    {
        let mut selected = Self::with_comparator(self.comparator().clone());
        for (key, value) in self {
            if predicate(key, value) {
                selected.put(key.clone(), value.clone());
            }
        }
        selected
    }
}

// =============================================================================
// Container Trait Implementations
// =============================================================================

impl<K, V, C> Container for TreeMap<K, V, C> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl<K, V, C: Comparator<K>> Map<K, V> for TreeMap<K, V, C> {
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

impl<K: Clone, V: Clone, C: Clone> Clone for TreeMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C: Default> Default for TreeMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V: PartialEq, C: Comparator<K>> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V: Eq, C: Comparator<K>> Eq for TreeMap<K, V, C> {}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for TreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeMap<K, V, C> {
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
impl<K, V, C> serde::Serialize for TreeMap<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
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
struct TreeMapVisitor<K, V, C> {
    marker: std::marker::PhantomData<TreeMap<K, V, C>>,
}

#[cfg(feature = "serde")]
impl<K, V, C> TreeMapVisitor<K, V, C> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for TreeMapVisitor<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = TreeMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = TreeMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for TreeMap<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeMapVisitor::new())
    }
}

// =============================================================================
// JSON Support
// =============================================================================

#[cfg(feature = "json")]
impl<K: serde::Serialize, V: serde::Serialize, C> crate::json::JsonSerializer
    for TreeMap<K, V, C>
{
    fn to_json(&self) -> crate::error::Result<String> {
        crate::json::encode(self)
    }
}

#[cfg(feature = "json")]
impl<K, V, C> crate::json::JsonDeserializer for TreeMap<K, V, C>
where
    K: serde::de::DeserializeOwned,
    V: serde::de::DeserializeOwned,
    C: Comparator<K>,
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
