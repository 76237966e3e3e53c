//! Uniform contracts shared by every container in this crate.
//!
//! - [`Container`]: size and clearing
//! - [`Map`]: key to value association
//! - [`BidiMap`]: a [`Map`] that can also be queried by value
//! - [`KeyedCursor`]: stateful bidirectional traversal with boundary positions
//!
//! The traits mirror the inherent methods of each container, so generic code
//! can be written once for all maps.
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::containers::{BidiMap, Container, Map};
//! use bidimaps::maps::{HashBidiMap, TreeBidiMap};
//!
//! fn pair_up<M: BidiMap<i32, char>>(map: &mut M) {
//!     map.put(1, 'a');
//!     map.put(2, 'b');
//! }
//!
//! let mut tree: TreeBidiMap<i32, char> = TreeBidiMap::new();
//! let mut hash: HashBidiMap<i32, char> = HashBidiMap::new();
//! pair_up(&mut tree);
//! pair_up(&mut hash);
//!
//! assert_eq!(BidiMap::get_key(&tree, &'b'), Some(&2));
//! assert_eq!(BidiMap::get_key(&hash, &'b'), Some(&2));
//! assert_eq!(Container::len(&tree), Container::len(&hash));
//! ```

// =============================================================================
// Container
// =============================================================================

/// Base contract of every collection.
pub trait Container {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements.
    fn clear(&mut self);
}

// =============================================================================
// Map
// =============================================================================

/// An associative container mapping keys to values.
pub trait Map<K, V>: Container {
    /// Inserts `value` under `key`, replacing any previous association.
    fn put(&mut self, key: K, value: V);

    /// Returns the value associated with `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Removes the association of `key`. Absent keys are ignored.
    fn remove(&mut self, key: &K);

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

/// A map whose values are unique, so it can be queried in both directions.
pub trait BidiMap<K, V>: Map<K, V> {
    /// Returns the key associated with `value`.
    fn get_key(&self, value: &V) -> Option<&K>;

    /// Returns `true` if `value` is present.
    fn contains_value(&self, value: &V) -> bool {
        self.get_key(value).is_some()
    }
}

// =============================================================================
// KeyedCursor
// =============================================================================

/// A stateful cursor over key-value entries.
///
/// A cursor starts before the first entry. [`move_next`](Self::move_next)
/// and [`move_prev`](Self::move_prev) step through the entries and report
/// whether the cursor landed on an entry; stepping off either end parks the
/// cursor on the corresponding boundary, where [`key`](Self::key) and
/// [`value`](Self::value) return `None`.
pub trait KeyedCursor {
    /// The key type.
    type Key;
    /// The value type.
    type Value;

    /// Steps forward; returns `false` after the last entry.
    fn move_next(&mut self) -> bool;

    /// Steps backward; returns `false` before the first entry.
    fn move_prev(&mut self) -> bool;

    /// Resets to before the first entry.
    fn begin(&mut self);

    /// Moves past the last entry.
    fn end(&mut self);

    /// Returns the current key, or `None` at a boundary.
    fn key(&self) -> Option<&Self::Key>;

    /// Returns the current value, or `None` at a boundary.
    fn value(&self) -> Option<&Self::Value>;

    /// Moves to the first entry; returns `false` if there is none.
    fn first(&mut self) -> bool {
        self.begin();
        self.move_next()
    }

    /// Moves to the last entry; returns `false` if there is none.
    fn last(&mut self) -> bool {
        self.end();
        self.move_prev()
    }

    /// Steps forward until `predicate` holds for the current entry.
    fn next_to<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Key, &Self::Value) -> bool,
    {
        while self.move_next() {
            if let (Some(key), Some(value)) = (self.key(), self.value())
                && predicate(key, value)
            {
                return true;
            }
        }
        false
    }

    /// Steps backward until `predicate` holds for the current entry.
    fn prev_to<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Key, &Self::Value) -> bool,
    {
        while self.move_prev() {
            if let (Some(key), Some(value)) = (self.key(), self.value())
                && predicate(key, value)
            {
                return true;
            }
        }
        false
    }
}
