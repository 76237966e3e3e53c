//! # bidimaps
//!
//! Ordered and unordered map containers for Rust, centred on a bidirectional
//! map that keeps keys and values in one-to-one correspondence.
//!
//! ## Overview
//!
//! - **Comparators**: pluggable three-way orderings for keys and values
//! - **Trees**: a mutable Red-Black Tree with a stateful bidirectional cursor
//! - **Bidirectional Maps**: [`TreeBidiMap`](maps::TreeBidiMap) ordered in both
//!   directions, and [`HashBidiMap`](maps::HashBidiMap)
//! - **Maps**: [`TreeMap`](maps::TreeMap), [`HashMap`](maps::HashMap) and the
//!   insertion-ordered [`LinkedHashMap`](maps::LinkedHashMap)
//! - **JSON**: all-or-nothing conversion to and from JSON objects
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for every map
//! - `json`: [`json::JsonSerializer`] and [`json::JsonDeserializer`] (default)
//! - `arc`: share bidirectional map records through `Arc`, making
//!   [`TreeBidiMap`](maps::TreeBidiMap) `Send` and `Sync`
//! - `fxhash` / `ahash`: faster default hashers for the hash-based maps
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use bidimaps::prelude::*;
//!
//! let mut map: TreeBidiMap<&str, u32> = TreeBidiMap::new();
//! map.put("apple", 3);
//! map.put("pear", 1);
//! map.put("plum", 2);
//!
//! assert_eq!(map.get_key(&1), Some(&"pear"));
//!
//! let mut cursor = map.cursor();
//! assert!(cursor.last());
//! assert_eq!(cursor.key(), Some(&"plum"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use bidimaps::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::{Comparator, NaturalOrder, ReverseOrder};
    pub use crate::containers::{BidiMap, Container, KeyedCursor, Map};
    pub use crate::maps::{HashBidiMap, HashMap, LinkedHashMap, TreeBidiMap, TreeMap};
    pub use crate::trees::{CursorPosition, RedBlackTree};

    #[cfg(feature = "json")]
    pub use crate::json::{JsonDeserializer, JsonSerializer};
}

pub mod comparator;
pub mod containers;
pub mod maps;
pub mod trees;

#[cfg(feature = "json")]
pub mod error;

#[cfg(feature = "json")]
pub mod json;
