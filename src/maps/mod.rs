//! Associative containers.
//!
//! - [`TreeBidiMap`]: bidirectional map over two red-black trees, ordered by key and by value
//! - [`TreeMap`]: ordered map over one red-black tree
//! - [`HashBidiMap`]: unordered bidirectional map over two hash maps
//! - [`HashMap`]: unordered map
//! - [`LinkedHashMap`]: hash map that iterates in insertion order
//!
//! # Bidirectional Maps
//!
//! A bidirectional map keeps keys and values in one-to-one correspondence.
//! Putting a pair evicts whatever pair previously held the key and whatever
//! pair previously held the value, so a single `put` may shrink the map.
//!
//! ```rust
//! use bidimaps::maps::TreeBidiMap;
//!
//! let mut map = TreeBidiMap::new();
//! map.put(1, "one");
//! map.put(2, "two");
//!
//! // "one" moves to key 3; the pair (1, "one") is evicted.
//! map.put(3, "one");
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&1), None);
//! assert_eq!(map.get_key(&"one"), Some(&3));
//! ```
//!
//! # Hashing
//!
//! Hash-based maps use [`DefaultHashBuilder`], which is the standard
//! `RandomState` unless the `fxhash` or `ahash` feature selects a faster hasher.

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type for shared association records.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which makes the bidirectional tree map `Send` and `Sync`.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Hash Builder Type Alias
// =============================================================================

/// Hash builder used by hash-based maps when none is specified.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// Hash builder used by hash-based maps when none is specified.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// Hash builder used by hash-based maps when none is specified.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

mod hashbidimap;
mod hashmap;
mod linkedhashmap;
mod treebidimap;
mod treemap;

pub use hashbidimap::HashBidiMap;
pub use hashmap::HashMap;
pub use linkedhashmap::LinkedHashMap;
pub use linkedhashmap::LinkedHashMapIterator;
pub use treebidimap::BidiCursor;
pub use treebidimap::TreeBidiMap;
pub use treebidimap::TreeBidiMapIterator;
pub use treemap::TreeMap;

