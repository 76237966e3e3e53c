//! Stateful bidirectional cursor over a [`RedBlackTree`].
//!
//! A [`Cursor`] walks the in-order sequence of a tree one node at a time and
//! has three logical positions:
//!
//! ```text
//! BeforeFirst -> [k1] <-> [k2] <-> ... <-> [kn] <- AfterLast
//! ```
//!
//! The cursor holds a shared borrow of its tree. The tree therefore cannot
//! be modified while a cursor is alive; that is enforced by the borrow checker.
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::trees::{CursorPosition, RedBlackTree};
//!
//! let tree: RedBlackTree<i32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
//! let mut cursor = tree.cursor();
//!
//! let mut keys = Vec::new();
//! while cursor.move_next() {
//!     keys.push(*cursor.key().unwrap());
//! }
//! assert_eq!(keys, vec![1, 2, 3]);
//! assert_eq!(cursor.position(), CursorPosition::AfterLast);
//!
//! assert!(cursor.move_prev());
//! assert_eq!(cursor.value(), Some(&"c"));
//! ```

use std::fmt;

use super::red_black_tree::{NodeRef, RedBlackTree};
use crate::containers::KeyedCursor;

/// The logical position of a [`Cursor`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum CursorPosition {
    /// One before the first entry. Initial state.
    BeforeFirst,
    /// On an entry.
    Positioned,
    /// One past the last entry.
    AfterLast,
}

/// A stateful in-order cursor over a [`RedBlackTree`].
///
/// Creating a cursor is O(1); each step is amortized O(1).
pub struct Cursor<'a, K, V, C> {
    tree: &'a RedBlackTree<K, V, C>,
    node: Option<usize>,
    position: CursorPosition,
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            node: self.node,
            position: self.position,
        }
    }
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    /// Creates a cursor positioned before the first entry of `tree`.
    #[must_use]
    pub const fn new(tree: &'a RedBlackTree<K, V, C>) -> Self {
        Self {
            tree,
            node: None,
            position: CursorPosition::BeforeFirst,
        }
    }

    /// Returns the current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> CursorPosition {
        self.position
    }

    /// Moves to the next entry.
    ///
    /// From [`CursorPosition::BeforeFirst`] this moves to the minimum entry.
    /// Returns `false` and moves to [`CursorPosition::AfterLast`] when there
    /// is no next entry.
    pub fn move_next(&mut self) -> bool {
        self.node = match self.position {
            CursorPosition::BeforeFirst => self.tree.first_index(),
            CursorPosition::Positioned => self.node.and_then(|index| self.tree.successor_of(index)),
            CursorPosition::AfterLast => None,
        };
        self.settle(CursorPosition::AfterLast)
    }

    /// Moves to the previous entry.
    ///
    /// From [`CursorPosition::AfterLast`] this moves to the maximum entry.
    /// Returns `false` and moves to [`CursorPosition::BeforeFirst`] when there
    /// is no previous entry.
    pub fn move_prev(&mut self) -> bool {
        self.node = match self.position {
            CursorPosition::AfterLast => self.tree.last_index(),
            CursorPosition::Positioned => {
                self.node.and_then(|index| self.tree.predecessor_of(index))
            }
            CursorPosition::BeforeFirst => None,
        };
        self.settle(CursorPosition::BeforeFirst)
    }

    const fn settle(&mut self, boundary: CursorPosition) -> bool {
        if self.node.is_some() {
            self.position = CursorPosition::Positioned;
            true
        } else {
            self.position = boundary;
            false
        }
    }

    /// Resets the cursor to before the first entry.
    pub const fn begin(&mut self) {
        self.node = None;
        self.position = CursorPosition::BeforeFirst;
    }

    /// Moves the cursor past the last entry.
    pub const fn end(&mut self) {
        self.node = None;
        self.position = CursorPosition::AfterLast;
    }

    /// Moves to the first entry; returns `false` if the tree is empty.
    pub fn first(&mut self) -> bool {
        self.begin();
        self.move_next()
    }

    /// Moves to the last entry; returns `false` if the tree is empty.
    pub fn last(&mut self) -> bool {
        self.end();
        self.move_prev()
    }

    /// Returns the key of the current entry, or `None` at a boundary.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(|(key, _)| key)
    }

    /// Returns the value of the current entry, or `None` at a boundary.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns the current entry, or `None` at a boundary.
    #[must_use]
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.node.map(|index| tree.entry_at(index))
    }

    /// Returns a handle to the current node, or `None` at a boundary.
    #[must_use]
    pub fn node(&self) -> Option<NodeRef<'a, K, V, C>> {
        let tree = self.tree;
        tree.node_ref(self.node)
    }

    /// Positions the cursor on `node`, which must belong to the same tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::trees::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, ()> = [(10, ()), (20, ()), (30, ())].into_iter().collect();
    /// let mut cursor = tree.cursor();
    /// if let Some(node) = tree.ceiling_node(&15) {
    ///     cursor.seek(node);
    /// }
    /// assert_eq!(cursor.key(), Some(&20));
    /// assert!(cursor.move_next());
    /// assert_eq!(cursor.key(), Some(&30));
    /// ```
    pub fn seek(&mut self, node: NodeRef<'a, K, V, C>) {
        self.node = Some(node.index());
        self.position = CursorPosition::Positioned;
    }

    /// Moves forward to the next entry satisfying `predicate`.
    ///
    /// Returns `false` and stops at [`CursorPosition::AfterLast`] when no
    /// later entry matches.
    pub fn next_to<P>(&mut self, predicate: P) -> bool
    where
        P: FnMut(&K, &V) -> bool,
    {
        KeyedCursor::next_to(self, predicate)
    }

    /// Moves backward to the previous entry satisfying `predicate`.
    ///
    /// Returns `false` and stops at [`CursorPosition::BeforeFirst`] when no
    /// earlier entry matches.
    pub fn prev_to<P>(&mut self, predicate: P) -> bool
    where
        P: FnMut(&K, &V) -> bool,
    {
        KeyedCursor::prev_to(self, predicate)
    }
}

impl<K, V, C> KeyedCursor for Cursor<'_, K, V, C> {
    type Key = K;
    type Value = V;

    fn move_next(&mut self) -> bool {
        Cursor::move_next(self)
    }

    fn move_prev(&mut self) -> bool {
        Cursor::move_prev(self)
    }

    fn begin(&mut self) {
        Cursor::begin(self);
    }

    fn end(&mut self) {
        Cursor::end(self);
    }

    fn key(&self) -> Option<&K> {
        Cursor::key(self)
    }

    fn value(&self) -> Option<&V> {
        Cursor::value(self)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Cursor<'_, K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("position", &self.position)
            .field("entry", &self.entry())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
