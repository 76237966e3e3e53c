//! Bidirectional ordered map based on two Red-Black Trees.
//!
//! This module provides [`TreeBidiMap`], a one-to-one map from keys to
//! values that is ordered by key in one direction and by value in the other.
//!
//! # Overview
//!
//! - O(log N) lookup by key ([`TreeBidiMap::get`])
//! - O(log N) lookup by value ([`TreeBidiMap::get_key`])
//! - O(log N) put and remove, including evictions
//! - Ascending iteration by key and by value
//!
//! # Internal Structure
//!
//! Every pair is held in one shared association record. The forward tree
//! maps each key to its record and the inverse tree maps each value to the
//! same record, so both directions always agree:
//!
//! ```text
//! forward (by key)          inverse (by value)
//!   1 ──┐                ┌── "a"
//!       └─> {1, "a"} <───┘
//!   2 ──┐                ┌── "b"
//!       └─> {2, "b"} <───┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::maps::TreeBidiMap;
//!
//! let mut map = TreeBidiMap::new();
//! map.put(5, "e");
//! map.put(3, "c");
//! map.put(8, "h");
//! map.put(1, "a");
//!
//! let keys: Vec<i32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![1, 3, 5, 8]);
//! assert_eq!(map.get_key(&"h"), Some(&8));
//!
//! // Re-using a value moves it to the new key.
//! map.put(9, "a");
//! assert_eq!(map.get(&1), None);
//! assert_eq!(map.len(), 4);
//! ```

use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use super::ReferenceCounter;
use crate::comparator::{Comparator, NaturalOrder};
use crate::containers::{BidiMap, Container, KeyedCursor, Map};
use crate::trees::{self, CursorPosition, RedBlackTree};

// =============================================================================
// Association Definition
// =============================================================================

/// A key-value pair shared by the forward and inverse trees of a [`TreeBidiMap`].
#[derive(Clone, Debug)]
struct Association<K, T> {
    key: K,
    value: T,
}

type Record<K, T> = ReferenceCounter<Association<K, T>>;

// =============================================================================
// TreeBidiMap Definition
// =============================================================================

/// A bidirectional map whose keys and values are both kept in sorted order.
///
/// Keys are ordered by `KC` and values by `VC`; both default to
/// [`NaturalOrder`]. Keys are unique, and so are values: putting a pair
/// whose key or value is already present evicts the previous pair.
///
/// Mutating operations require `K: Clone` and `T: Clone` because each tree
/// node owns its own search key while the shared record owns a second copy
/// of the pair.
///
/// # Time Complexity
///
/// | Operation               | Complexity |
/// |-------------------------|------------|
/// | `put`                   | O(log N)   |
/// | `get` / `get_key`       | O(log N)   |
/// | `remove` / `remove_value` | O(log N) |
/// | `len` / `is_empty`      | O(1)       |
/// | `clear`                 | O(N)       |
///
/// # Concurrency
///
/// Records are shared through `Rc`, so the map is neither `Send` nor `Sync`.
/// With the `arc` feature they are shared through `Arc` and the map is
/// `Send` and `Sync` whenever its contents are.
///
/// # Examples
///
/// ```rust
/// use bidimaps::comparator::ReverseOrder;
/// use bidimaps::maps::TreeBidiMap;
///
/// let mut map: TreeBidiMap<i32, char, ReverseOrder> = TreeBidiMap::default();
/// map.put(1, 'x');
/// map.put(2, 'y');
///
/// let keys: Vec<i32> = map.keys().copied().collect();
/// assert_eq!(keys, vec![2, 1]);
/// let values: Vec<char> = map.values().copied().collect();
/// assert_eq!(values, vec!['x', 'y']);
/// ```
pub struct TreeBidiMap<K, T, KC = NaturalOrder, VC = NaturalOrder> {
    forward: RedBlackTree<K, Record<K, T>, KC>,
    inverse: RedBlackTree<T, Record<K, T>, VC>,
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(TreeBidiMap<i32, i32>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(TreeBidiMap<String, String>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(TreeBidiMap<i32, String>: Send, Sync);

impl<K, T> TreeBidiMap<K, T> {
    /// Creates an empty map ordering keys and values by [`NaturalOrder`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::maps::TreeBidiMap;
    ///
    /// let map: TreeBidiMap<String, u32> = TreeBidiMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparators(NaturalOrder, NaturalOrder)
    }
}

impl<K, T, KC, VC> TreeBidiMap<K, T, KC, VC> {
    /// Creates an empty map with explicit key and value comparators.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::comparator::{NaturalOrder, ReverseOrder};
    /// use bidimaps::maps::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::with_comparators(
    ///     |left: &i64, right: &i64| left.abs().cmp(&right.abs()),
    ///     ReverseOrder::new(NaturalOrder),
    /// );
    /// map.put(-3, String::from("three"));
    /// map.put(2, String::from("two"));
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, -3]);
    /// assert_eq!(map.values().collect::<Vec<_>>(), vec!["two", "three"]);
    /// ```
    #[must_use]
    pub const fn with_comparators(key_comparator: KC, value_comparator: VC) -> Self {
        Self {
            forward: RedBlackTree::with_comparator(key_comparator),
            inverse: RedBlackTree::with_comparator(value_comparator),
        }
    }

    /// Returns the comparator ordering the keys.
    #[inline]
    #[must_use]
    pub const fn key_comparator(&self) -> &KC {
        self.forward.comparator()
    }

    /// Returns the comparator ordering the values.
    #[inline]
    #[must_use]
    pub const fn value_comparator(&self) -> &VC {
        self.inverse.comparator()
    }

    /// Returns the number of pairs.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if the map holds no pairs.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Removes every pair. The comparators are kept.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing bidirectional tree map");
        self.forward.clear();
        self.inverse.clear();
    }

    /// Returns an iterator over the keys in ascending key order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.forward.keys()
    }

    /// Returns an iterator over the values in ascending value order.
    ///
    /// The order is the one of the value comparator, not the key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::maps::TreeBidiMap;
    ///
    /// let map: TreeBidiMap<i32, char> = [(1, 'z'), (2, 'a')].into_iter().collect();
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), vec!['a', 'z']);
    /// ```
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.inverse.keys()
    }

    /// Returns an iterator over the pairs in ascending key order.
    #[must_use]
    pub fn iter(&self) -> TreeBidiMapIterator<'_, K, T, KC> {
        TreeBidiMapIterator {
            inner: self.forward.iter(),
        }
    }

    /// Returns a cursor over the pairs in key order, positioned before the first pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::maps::TreeBidiMap;
    ///
    /// let map: TreeBidiMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    /// let mut cursor = map.cursor();
    /// assert!(cursor.move_next());
    /// assert_eq!(cursor.key(), Some(&1));
    /// assert_eq!(cursor.value(), Some(&"a"));
    /// ```
    #[must_use]
    pub const fn cursor(&self) -> BidiCursor<'_, K, T, KC> {
        BidiCursor {
            inner: self.forward.cursor(),
        }
    }
}

impl<K, T, KC, VC> TreeBidiMap<K, T, KC, VC>
where
    KC: Comparator<K>,
    VC: Comparator<T>,
{
    /// Associates `key` with `value`.
    ///
    /// Any pair that currently holds `key` is removed first, then any pair
    /// that currently holds `value`. Both may be the same pair, and a put may
    /// leave the map smaller than before.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::maps::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::new();
    /// map.put(1, 'a');
    /// map.put(2, 'b');
    ///
    /// // Key 1 loses 'a', and 'b' leaves key 2.
    /// map.put(1, 'b');
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&1), Some(&'b'));
    /// assert_eq!(map.get_key(&'a'), None);
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn put(&mut self, key: K, value: T)
    where
        K: Clone,
        T: Clone,
    {
        if let Some(stale) = self.forward.remove(&key) {
            self.inverse.remove(&stale.value);
            trace!("evicted pair holding the key");
        }
        if let Some(stale) = self.inverse.remove(&value) {
            self.forward.remove(&stale.key);
            trace!("evicted pair holding the value");
        }

        let record = ReferenceCounter::new(Association {
            key: key.clone(),
            value: value.clone(),
        });
        self.forward.put(key, ReferenceCounter::clone(&record));
        self.inverse.put(value, record);
    }

    /// Returns the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&T> {
        self.forward.get(key).map(|record| &record.value)
    }

    /// Returns the key associated with `value`.
    #[must_use]
    pub fn get_key(&self, value: &T) -> Option<&K> {
        self.inverse.get(value).map(|record| &record.key)
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
    ///
    /// Removing an absent key is a no-op that returns `None`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn remove(&mut self, key: &K) -> Option<T>
    where
        K: Clone,
        T: Clone,
    {
        let record = self.forward.remove(key)?;
        self.inverse.remove(&record.value);
        Some(ReferenceCounter::unwrap_or_clone(record).value)
    }

    /// Removes the pair holding `value` and returns its key.
    ///
    /// Removing an absent value is a no-op that returns `None`.
    pub fn remove_value(&mut self, value: &T) -> Option<K>
    where
        K: Clone,
        T: Clone,
    {
        let record = self.inverse.remove(value)?;
        self.forward.remove(&record.key);
        Some(ReferenceCounter::unwrap_or_clone(record).key)
    }

    /// Returns the pair with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &T)> {
        self.forward.min().map(|(key, record)| (key, &record.value))
    }

    /// Returns the pair with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &T)> {
        self.forward.max().map(|(key, record)| (key, &record.value))
    }
}

// =============================================================================
// Cursor Implementation
// =============================================================================

/// A stateful cursor over the pairs of a [`TreeBidiMap`] in key order.
///
/// See [`trees::Cursor`] for the position model.
pub struct BidiCursor<'a, K, T, KC> {
    inner: trees::Cursor<'a, K, Record<K, T>, KC>,
}

impl<K, T, KC> Clone for BidiCursor<'_, K, T, KC> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, T, KC> BidiCursor<'a, K, T, KC> {
    /// Returns the current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> CursorPosition {
        self.inner.position()
    }

    /// Moves to the next pair; returns `false` after the last pair.
    pub fn move_next(&mut self) -> bool {
        self.inner.move_next()
    }

    /// Moves to the previous pair; returns `false` before the first pair.
    pub fn move_prev(&mut self) -> bool {
        self.inner.move_prev()
    }

    /// Resets the cursor to before the first pair.
    pub const fn begin(&mut self) {
        self.inner.begin();
    }

    /// Moves the cursor past the last pair.
    pub const fn end(&mut self) {
        self.inner.end();
    }

    /// Moves to the first pair; returns `false` if the map is empty.
    pub fn first(&mut self) -> bool {
        self.inner.first()
    }

    /// Moves to the last pair; returns `false` if the map is empty.
    pub fn last(&mut self) -> bool {
        self.inner.last()
    }

    /// Returns the current key, or `None` at a boundary.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.inner.key()
    }

    /// Returns the current value, or `None` at a boundary.
    #[must_use]
    pub fn value(&self) -> Option<&'a T> {
        self.inner.value().map(|record| &record.value)
    }

    /// Returns the current pair, or `None` at a boundary.
    #[must_use]
    pub fn entry(&self) -> Option<(&'a K, &'a T)> {
        self.inner.entry().map(|(key, record)| (key, &record.value))
    }

    /// Moves forward to the next pair satisfying `predicate`.
    pub fn next_to<P>(&mut self, predicate: P) -> bool
    where
        P: FnMut(&K, &T) -> bool,
    {
        KeyedCursor::next_to(self, predicate)
    }

    /// Moves backward to the previous pair satisfying `predicate`.
    pub fn prev_to<P>(&mut self, predicate: P) -> bool
    where
        P: FnMut(&K, &T) -> bool,
    {
        KeyedCursor::prev_to(self, predicate)
    }
}

impl<K, T, KC> KeyedCursor for BidiCursor<'_, K, T, KC> {
    type Key = K;
    type Value = T;

    fn move_next(&mut self) -> bool {
        BidiCursor::move_next(self)
    }

    fn move_prev(&mut self) -> bool {
        BidiCursor::move_prev(self)
    }

    fn begin(&mut self) {
        BidiCursor::begin(self);
    }

    fn end(&mut self) {
        BidiCursor::end(self);
    }

    fn key(&self) -> Option<&K> {
        BidiCursor::key(self)
    }

    fn value(&self) -> Option<&T> {
        BidiCursor::value(self)
    }
}

impl<K: fmt::Debug, T: fmt::Debug, KC> fmt::Debug for BidiCursor<'_, K, T, KC> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BidiCursor")
            .field("position", &self.position())
            .field("key", &self.key())
            .field("value", &self.value())
            .finish()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the pairs of a [`TreeBidiMap`] in ascending key order.
pub struct TreeBidiMapIterator<'a, K, T, KC> {
    inner: trees::Iter<'a, K, Record<K, T>, KC>,
}

impl<K, T, KC> Clone for TreeBidiMapIterator<'_, K, T, KC> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, T, KC> Iterator for TreeBidiMapIterator<'a, K, T, KC> {
    type Item = (&'a K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, record)| (key, &record.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, T, KC> DoubleEndedIterator for TreeBidiMapIterator<'_, K, T, KC> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(key, record)| (key, &record.value))
    }
}

impl<K, T, KC> ExactSizeIterator for TreeBidiMapIterator<'_, K, T, KC> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, T, KC> FusedIterator for TreeBidiMapIterator<'_, K, T, KC> {}

// =============================================================================
// Container Trait Implementations
// =============================================================================

impl<K, T, KC, VC> Container for TreeBidiMap<K, T, KC, VC> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

impl<K, T, KC, VC> Map<K, T> for TreeBidiMap<K, T, KC, VC>
where
    K: Clone,
    T: Clone,
    KC: Comparator<K>,
    VC: Comparator<T>,
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

    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }
}

impl<K, T, KC, VC> BidiMap<K, T> for TreeBidiMap<K, T, KC, VC>
where
    K: Clone,
    T: Clone,
    KC: Comparator<K>,
    VC: Comparator<T>,
{
    fn get_key(&self, value: &T) -> Option<&K> {
        Self::get_key(self, value)
    }

    fn contains_value(&self, value: &T) -> bool {
        Self::contains_value(self, value)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Clone, T: Clone, KC: Clone, VC: Clone> Clone for TreeBidiMap<K, T, KC, VC> {
    fn clone(&self) -> Self {
        Self {
            forward: self.forward.clone(),
            inverse: self.inverse.clone(),
        }
    }
}

impl<K, T, KC: Default, VC: Default> Default for TreeBidiMap<K, T, KC, VC> {
    #[inline]
    fn default() -> Self {
        Self::with_comparators(KC::default(), VC::default())
    }
}

impl<K, T, KC, VC> PartialEq for TreeBidiMap<K, T, KC, VC>
where
    T: PartialEq,
    KC: Comparator<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.forward.get(key).is_some_and(|record| record.value == *value))
    }
}

impl<K, T: Eq, KC: Comparator<K>, VC> Eq for TreeBidiMap<K, T, KC, VC> {}

impl<K, T, KC, VC> Extend<(K, T)> for TreeBidiMap<K, T, KC, VC>
where
    K: Clone,
    T: Clone,
    KC: Comparator<K>,
    VC: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, T, KC, VC> FromIterator<(K, T)> for TreeBidiMap<K, T, KC, VC>
where
    K: Clone,
    T: Clone,
    KC: Comparator<K> + Default,
    VC: Comparator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, T, KC, VC> IntoIterator for &'a TreeBidiMap<K, T, KC, VC> {
    type Item = (&'a K, &'a T);
    type IntoIter = TreeBidiMapIterator<'a, K, T, KC>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, T: fmt::Debug, KC, VC> fmt::Debug for TreeBidiMap<K, T, KC, VC> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, T: fmt::Display, KC, VC> fmt::Display for TreeBidiMap<K, T, KC, VC> {
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
impl<K, T, KC, VC> serde::Serialize for TreeBidiMap<K, T, KC, VC>
where
    K: serde::Serialize,
    T: serde::Serialize,
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
struct TreeBidiMapVisitor<K, T, KC, VC> {
    marker: std::marker::PhantomData<TreeBidiMap<K, T, KC, VC>>,
}

#[cfg(feature = "serde")]
impl<K, T, KC, VC> TreeBidiMapVisitor<K, T, KC, VC> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, T, KC, VC> serde::de::Visitor<'de> for TreeBidiMapVisitor<K, T, KC, VC>
where
    K: serde::Deserialize<'de> + Clone,
    T: serde::Deserialize<'de> + Clone,
    KC: Comparator<K> + Default,
    VC: Comparator<T> + Default,
{
    type Value = TreeBidiMap<K, T, KC, VC>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = TreeBidiMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, T, KC, VC> serde::Deserialize<'de> for TreeBidiMap<K, T, KC, VC>
where
    K: serde::Deserialize<'de> + Clone,
    T: serde::Deserialize<'de> + Clone,
    KC: Comparator<K> + Default,
    VC: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeBidiMapVisitor::new())
    }
}

// =============================================================================
// JSON Support
// =============================================================================

#[cfg(feature = "json")]
impl<K, T, KC, VC> crate::json::JsonSerializer for TreeBidiMap<K, T, KC, VC>
where
    K: serde::Serialize,
    T: serde::Serialize,
{
    fn to_json(&self) -> crate::error::Result<String> {
        crate::json::encode(self)
    }
}

#[cfg(feature = "json")]
impl<K, T, KC, VC> crate::json::JsonDeserializer for TreeBidiMap<K, T, KC, VC>
where
    K: serde::de::DeserializeOwned + Clone,
    T: serde::de::DeserializeOwned + Clone,
    KC: Comparator<K>,
    VC: Comparator<T>,
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
