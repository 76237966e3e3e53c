//! Mutable ordered map based on a Red-Black Tree.
//!
//! This module provides [`RedBlackTree`], a self-balancing binary search tree
//! ordered by a [`Comparator`] bound to the key type.
//!
//! # Overview
//!
//! - O(log N) get
//! - O(log N) put
//! - O(log N) remove
//! - O(log N) min/max/floor/ceiling
//! - O(1) len and `is_empty`
//! - Amortized O(1) in-order successor/predecessor steps
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::trees::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! tree.put(3, "three");
//! tree.put(1, "one");
//! tree.put(2, "two");
//!
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! assert_eq!(tree.floor(&5), Some((&3, &"three")));
//! assert_eq!(tree.ceiling(&0), Some((&1, &"one")));
//! ```
//!
//! # Internal Structure
//!
//! Nodes live in a dense arena (`Vec`). Children and parents are stored as
//! arena indices, so parent back-references never own anything. Removing a
//! node moves the last arena slot into the vacated one and repairs the links
//! of the moved node.
//!
//! The tree maintains the following invariants:
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. All leaves (NIL) are black
//! 4. Red nodes have only black children
//! 5. Every path from a node to a descendant leaf has the same number of black nodes
//!
//! These invariants keep the height at most `2 * log2(N + 1)`.
//!
//! # Concurrency
//!
//! The tree has no internal synchronization. Mutation requires `&mut self`,
//! and a [`Cursor`] or [`NodeRef`] borrows the tree, so the tree cannot be
//! modified while either is alive.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use super::cursor::Cursor;
use crate::comparator::{Comparator, NaturalOrder};

// =============================================================================
// Color Definition
// =============================================================================

/// The color of a Red-Black Tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Color {
    /// A red node; its children are always black.
    Red,
    /// A black node.
    Black,
}

// =============================================================================
// Node Definition
// =============================================================================

type Link = Option<usize>;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: Link,
    left: Link,
    right: Link,
}

impl<K, V> Node<K, V> {
    const fn new_red(key: K, value: V, parent: Link) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }
}

// =============================================================================
// RedBlackTree Definition
// =============================================================================

/// An ordered map based on a Red-Black Tree.
///
/// Keys are ordered by the comparator `C`, which defaults to
/// [`NaturalOrder`]. Entries are kept in a dense arena with index links.
///
/// # Time Complexity
///
/// | Operation                | Complexity        |
/// |--------------------------|-------------------|
/// | `new`                    | O(1)              |
/// | `get`                    | O(log N)          |
/// | `put`                    | O(log N)          |
/// | `remove`                 | O(log N)          |
/// | `min`/`max`              | O(log N)          |
/// | `floor`/`ceiling`        | O(log N)          |
/// | `len`/`is_empty`         | O(1)              |
/// | full in-order traversal  | O(N)              |
///
/// # Examples
///
/// ```rust
/// use bidimaps::trees::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// assert_eq!(tree.put(1, "one"), None);
/// assert_eq!(tree.put(1, "ONE"), Some("one"));
/// assert_eq!(tree.get(&1), Some(&"ONE"));
/// assert_eq!(tree.remove(&1), Some("ONE"));
/// assert!(tree.is_empty());
/// ```
#[derive(Clone)]
pub struct RedBlackTree<K, V, C = NaturalOrder> {
    nodes: Vec<Node<K, V>>,
    root: Link,
    comparator: C,
}

impl<K, V> RedBlackTree<K, V> {
    /// Creates an empty tree ordered by [`NaturalOrder`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::trees::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, String> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RedBlackTree<K, V, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::trees::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::with_comparator(|left: &i32, right: &i32| right.cmp(left));
    /// tree.put(1, ());
    /// tree.put(2, ());
    /// assert_eq!(tree.min(), Some((&2, &())));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            comparator,
        }
    }

    /// Returns the comparator that orders this tree.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all entries.
    ///
    /// The root link is dropped and the arena truncated; the comparator is kept.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// An empty tree has height 0. The red-black invariants bound this by
    /// `2 * log2(len + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    // =========================================================================
    // Node Handles
    // =========================================================================

    /// Returns a handle to the root node.
    #[must_use]
    pub fn root_node(&self) -> Option<NodeRef<'_, K, V, C>> {
        self.node_ref(self.root)
    }

    /// Returns a handle to the node with the smallest key.
    #[must_use]
    pub fn first_node(&self) -> Option<NodeRef<'_, K, V, C>> {
        self.node_ref(self.root.map(|root| self.leftmost(root)))
    }

    /// Returns a handle to the node with the largest key.
    #[must_use]
    pub fn last_node(&self) -> Option<NodeRef<'_, K, V, C>> {
        self.node_ref(self.root.map(|root| self.rightmost(root)))
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::trees::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(tree.min(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        self.first_node().map(|node| node.entry())
    }

    /// Returns the entry with the maximum key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        self.last_node().map(|node| node.entry())
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// The iterator is double-ended; `rev()` yields descending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: self,
            front: self.root.map(|root| self.leftmost(root)),
            back: self.root.map(|root| self.rightmost(root)),
            remaining: self.len(),
        }
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in ascending key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Returns a stateful cursor positioned before the first entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::trees::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// let mut cursor = tree.cursor();
    /// assert!(cursor.move_next());
    /// assert_eq!(cursor.key(), Some(&1));
    /// assert!(cursor.move_next());
    /// assert!(!cursor.move_next());
    /// assert_eq!(cursor.key(), None);
    /// ```
    #[must_use]
    pub const fn cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self)
    }

    // =========================================================================
    // Navigation Helpers
    // =========================================================================

    pub(crate) fn node_ref(&self, index: Link) -> Option<NodeRef<'_, K, V, C>> {
        index.map(|index| NodeRef { tree: self, index })
    }

    pub(crate) fn leftmost(&self, mut index: usize) -> usize {
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        index
    }

    pub(crate) fn rightmost(&self, mut index: usize) -> usize {
        while let Some(right) = self.nodes[index].right {
            index = right;
        }
        index
    }

    /// In-order successor of the node at `index`.
    pub(crate) fn successor_of(&self, index: usize) -> Link {
        if let Some(right) = self.nodes[index].right {
            return Some(self.leftmost(right));
        }
        let mut child = index;
        let mut parent = self.nodes[index].parent;
        while let Some(parent_index) = parent {
            if self.nodes[parent_index].right != Some(child) {
                return Some(parent_index);
            }
            child = parent_index;
            parent = self.nodes[parent_index].parent;
        }
        None
    }

    /// In-order predecessor of the node at `index`.
    pub(crate) fn predecessor_of(&self, index: usize) -> Link {
        if let Some(left) = self.nodes[index].left {
            return Some(self.rightmost(left));
        }
        let mut child = index;
        let mut parent = self.nodes[index].parent;
        while let Some(parent_index) = parent {
            if self.nodes[parent_index].left != Some(child) {
                return Some(parent_index);
            }
            child = parent_index;
            parent = self.nodes[parent_index].parent;
        }
        None
    }

    pub(crate) fn entry_at(&self, index: usize) -> (&K, &V) {
        let node = &self.nodes[index];
        (&node.key, &node.value)
    }

    pub(crate) fn first_index(&self) -> Link {
        self.root.map(|root| self.leftmost(root))
    }

    pub(crate) fn last_index(&self) -> Link {
        self.root.map(|root| self.rightmost(root))
    }

    fn is_red(&self, index: Link) -> bool {
        index.is_some_and(|index| self.nodes[index].color == Color::Red)
    }

    fn is_black(&self, index: Link) -> bool {
        !self.is_red(index)
    }

    fn set_color(&mut self, index: Link, color: Color) {
        if let Some(index) = index {
            self.nodes[index].color = color;
        }
    }

    // =========================================================================
    // Structural Helpers
    // =========================================================================

    /// Points the child link of `parent` that referred to `old` at `new`.
    /// A missing parent means `old` was the root.
    fn replace_child(&mut self, parent: Link, old: usize, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_node = &mut self.nodes[parent];
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }
    }

    fn rotate_left(&mut self, index: usize) {
        let Some(pivot) = self.nodes[index].right else {
            return;
        };
        let inner = self.nodes[pivot].left;
        self.nodes[index].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(index);
        }
        let parent = self.nodes[index].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, index, Some(pivot));
        self.nodes[pivot].left = Some(index);
        self.nodes[index].parent = Some(pivot);
    }

    fn rotate_right(&mut self, index: usize) {
        let Some(pivot) = self.nodes[index].left else {
            return;
        };
        let inner = self.nodes[pivot].right;
        self.nodes[index].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(index);
        }
        let parent = self.nodes[index].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, index, Some(pivot));
        self.nodes[pivot].right = Some(index);
        self.nodes[index].parent = Some(pivot);
    }

    /// Restores invariants 2 and 4 after `index` was linked in as a red leaf.
    fn insert_fixup(&mut self, mut index: usize) {
        while let Some(parent) = self.nodes[index].parent
            && self.nodes[parent].color == Color::Red
        {
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            if self.nodes[grandparent].left == Some(parent) {
                let uncle = self.nodes[grandparent].right;
                if self.is_red(uncle) {
                    self.nodes[parent].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[grandparent].color = Color::Red;
                    index = grandparent;
                } else {
                    let (mut child, mut parent) = (index, parent);
                    if self.nodes[parent].right == Some(child) {
                        self.rotate_left(parent);
                        std::mem::swap(&mut child, &mut parent);
                    }
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                    index = child;
                }
            } else {
                let uncle = self.nodes[grandparent].left;
                if self.is_red(uncle) {
                    self.nodes[parent].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[grandparent].color = Color::Red;
                    index = grandparent;
                } else {
                    let (mut child, mut parent) = (index, parent);
                    if self.nodes[parent].left == Some(child) {
                        self.rotate_right(parent);
                        std::mem::swap(&mut child, &mut parent);
                    }
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                    index = child;
                }
            }
        }
        self.set_color(self.root, Color::Black);
    }

    /// Replaces the subtree rooted at `old` with the subtree rooted at `new`.
    fn transplant(&mut self, old: usize, new: Link) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Unlinks the node at `index`, rebalances, and returns its entry.
    fn delete_at(&mut self, index: usize) -> (K, V) {
        let mut removed_color = self.nodes[index].color;
        let replacement;
        let replacement_parent;

        match (self.nodes[index].left, self.nodes[index].right) {
            (None, right) => {
                replacement = right;
                replacement_parent = self.nodes[index].parent;
                self.transplant(index, right);
            }
            (left @ Some(_), None) => {
                replacement = left;
                replacement_parent = self.nodes[index].parent;
                self.transplant(index, left);
            }
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                removed_color = self.nodes[successor].color;
                replacement = self.nodes[successor].right;
                if self.nodes[successor].parent == Some(index) {
                    replacement_parent = Some(successor);
                } else {
                    replacement_parent = self.nodes[successor].parent;
                    self.transplant(successor, replacement);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                }
                self.transplant(index, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = self.nodes[index].color;
            }
        }

        if removed_color == Color::Black {
            self.delete_fixup(replacement, replacement_parent);
        }
        self.release(index)
    }

    /// Restores invariant 5 after a black node was spliced out above `current`.
    ///
    /// `current` may be a NIL leaf, so its parent is tracked explicitly.
    fn delete_fixup(&mut self, mut current: Link, mut parent: Link) {
        while current != self.root && self.is_black(current) {
            let Some(parent_index) = parent else {
                break;
            };
            if self.nodes[parent_index].left == current {
                let mut sibling = self.nodes[parent_index].right;
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.nodes[parent_index].color = Color::Red;
                    self.rotate_left(parent_index);
                    sibling = self.nodes[parent_index].right;
                }
                // The removed black node guarantees a non-NIL sibling.
                let Some(mut sibling_index) = sibling else {
                    unreachable!("red-black tree lost a black sibling during removal")
                };
                let near = self.nodes[sibling_index].left;
                let far = self.nodes[sibling_index].right;
                if self.is_black(near) && self.is_black(far) {
                    self.nodes[sibling_index].color = Color::Red;
                    current = Some(parent_index);
                    parent = self.nodes[parent_index].parent;
                } else {
                    if self.is_black(far) {
                        self.set_color(near, Color::Black);
                        self.nodes[sibling_index].color = Color::Red;
                        self.rotate_right(sibling_index);
                        let Some(rotated) = self.nodes[parent_index].right else {
                            unreachable!("rotation removed the sibling of a rebalanced node")
                        };
                        sibling_index = rotated;
                    }
                    self.nodes[sibling_index].color = self.nodes[parent_index].color;
                    self.nodes[parent_index].color = Color::Black;
                    self.set_color(self.nodes[sibling_index].right, Color::Black);
                    self.rotate_left(parent_index);
                    current = self.root;
                    parent = None;
                }
            } else {
                let mut sibling = self.nodes[parent_index].left;
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.nodes[parent_index].color = Color::Red;
                    self.rotate_right(parent_index);
                    sibling = self.nodes[parent_index].left;
                }
                let Some(mut sibling_index) = sibling else {
                    unreachable!("red-black tree lost a black sibling during removal")
                };
                let near = self.nodes[sibling_index].right;
                let far = self.nodes[sibling_index].left;
                if self.is_black(near) && self.is_black(far) {
                    self.nodes[sibling_index].color = Color::Red;
                    current = Some(parent_index);
                    parent = self.nodes[parent_index].parent;
                } else {
                    if self.is_black(far) {
                        self.set_color(near, Color::Black);
                        self.nodes[sibling_index].color = Color::Red;
                        self.rotate_left(sibling_index);
                        let Some(rotated) = self.nodes[parent_index].left else {
                            unreachable!("rotation removed the sibling of a rebalanced node")
                        };
                        sibling_index = rotated;
                    }
                    self.nodes[sibling_index].color = self.nodes[parent_index].color;
                    self.nodes[parent_index].color = Color::Black;
                    self.set_color(self.nodes[sibling_index].left, Color::Black);
                    self.rotate_right(parent_index);
                    current = self.root;
                    parent = None;
                }
            }
        }
        self.set_color(current, Color::Black);
    }

    /// Frees the arena slot of an already unlinked node.
    ///
    /// The last slot is moved into `index`; links that pointed at the moved
    /// node are redirected.
    fn release(&mut self, index: usize) -> (K, V) {
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(index);
        if index != last {
            let (parent, left, right) = {
                let moved = &self.nodes[index];
                (moved.parent, moved.left, moved.right)
            };
            self.replace_child(parent, last, Some(index));
            if let Some(left) = left {
                self.nodes[left].parent = Some(index);
            }
            if let Some(right) = right {
                self.nodes[right].parent = Some(index);
            }
        }
        (removed.key, removed.value)
    }
}

impl<K, V, C: Comparator<K>> RedBlackTree<K, V, C> {
    /// Returns the arena index of the node holding `key`.
    fn find_index(&self, key: &K) -> Link {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match self.comparator.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(index),
            };
        }
        None
    }

    /// Inserts a key-value pair, or replaces the value of an existing key.
    ///
    /// Returns the previous value when the key was already present. Replacing
    /// a value never restructures the tree.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bidimaps::trees::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.put("a", 1), None);
    /// assert_eq!(tree.put("a", 2), Some(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = None;
        let mut goes_left = false;
        let mut current = self.root;
        while let Some(index) = current {
            parent = Some(index);
            let node = &mut self.nodes[index];
            match self.comparator.compare(&key, &node.key) {
                Ordering::Less => {
                    goes_left = true;
                    current = node.left;
                }
                Ordering::Greater => {
                    goes_left = false;
                    current = node.right;
                }
                Ordering::Equal => {
                    return Some(std::mem::replace(&mut node.value, value));
                }
            }
        }

        let index = self.nodes.len();
        self.nodes.push(Node::new_red(key, value, parent));
        match parent {
            None => self.root = Some(index),
            Some(parent) if goes_left => self.nodes[parent].left = Some(index),
            Some(parent) => self.nodes[parent].right = Some(index),
        }
        self.insert_fixup(index);
        None
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|index| &self.nodes[index].value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find_index(key).map(|index| self.entry_at(index))
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// Keys cannot be mutated, so the ordering is preserved.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_index(key)
            .map(|index| &mut self.nodes[index].value)
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Returns a handle to the node holding `key`.
    #[must_use]
    pub fn find_node(&self, key: &K) -> Option<NodeRef<'_, K, V, C>> {
        self.node_ref(self.find_index(key))
    }

    /// Removes `key` and returns its value.
    ///
    /// Removing an absent key is a no-op that returns `None`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key together with its value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.find_index(key)?;
        Some(self.delete_at(index))
    }

    /// Returns a handle to the node with the largest key less than or equal to `key`.
    #[must_use]
    pub fn floor_node(&self, key: &K) -> Option<NodeRef<'_, K, V, C>> {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return self.node_ref(Some(index)),
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    candidate = Some(index);
                    current = node.right;
                }
            }
        }
        self.node_ref(candidate)
    }

    /// Returns a handle to the node with the smallest key greater than or equal to `key`.
    #[must_use]
    pub fn ceiling_node(&self, key: &K) -> Option<NodeRef<'_, K, V, C>> {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return self.node_ref(Some(index)),
                Ordering::Greater => current = node.right,
                Ordering::Less => {
                    candidate = Some(index);
                    current = node.left;
                }
            }
        }
        self.node_ref(candidate)
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    ///
    /// Returns `None` when the tree is empty or every key is larger.
    #[must_use]
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        self.floor_node(key).map(|node| node.entry())
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// Returns `None` when the tree is empty or every key is smaller.
    #[must_use]
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.ceiling_node(key).map(|node| node.entry())
    }
}

// =============================================================================
// Node Handle
// =============================================================================

/// A borrowed handle to one node of a [`RedBlackTree`].
///
/// Handles navigate the tree structure (`left`, `right`, `parent`) and the
/// in-order sequence (`successor`, `predecessor`).
pub struct NodeRef<'a, K, V, C> {
    tree: &'a RedBlackTree<K, V, C>,
    index: usize,
}

impl<K, V, C> Clone for NodeRef<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for NodeRef<'_, K, V, C> {}

impl<'a, K, V, C> NodeRef<'a, K, V, C> {
    /// Returns the key of this node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        &self.tree.nodes[self.index].key
    }

    /// Returns the value of this node.
    #[must_use]
    pub fn value(&self) -> &'a V {
        &self.tree.nodes[self.index].value
    }

    /// Returns the key and value of this node.
    #[must_use]
    pub fn entry(&self) -> (&'a K, &'a V) {
        self.tree.entry_at(self.index)
    }

    /// Returns the color of this node.
    #[must_use]
    pub fn color(&self) -> Color {
        self.tree.nodes[self.index].color
    }

    /// Returns the left child.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.nodes[self.index].left)
    }

    /// Returns the right child.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.nodes[self.index].right)
    }

    /// Returns the parent node; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.nodes[self.index].parent)
    }

    /// Returns the node that follows this one in key order.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.successor_of(self.index))
    }

    /// Returns the node that precedes this one in key order.
    #[must_use]
    pub fn predecessor(&self) -> Option<Self> {
        self.tree.node_ref(self.tree.predecessor_of(self.index))
    }

    pub(crate) const fn index(&self) -> usize {
        self.index
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for NodeRef<'_, K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An in-order iterator over the entries of a [`RedBlackTree`].
pub struct Iter<'a, K, V, C> {
    tree: &'a RedBlackTree<K, V, C>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor_of(index);
        Some(self.tree.entry_at(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor_of(index);
        Some(self.tree.entry_at(index))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for RedBlackTree<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RedBlackTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RedBlackTree<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RedBlackTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
