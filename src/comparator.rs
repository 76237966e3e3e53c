//! Three-way comparators for ordered containers.
//!
//! Every ordered structure in this crate is parameterized by a
//! [`Comparator`] bound to its exact key type, so a comparator that cannot
//! order the stored keys is rejected at compile time.
//!
//! - [`NaturalOrder`]: the key type's own [`Ord`] implementation
//! - [`ReverseOrder`]: inverts another comparator
//! - Any `Fn(&T, &T) -> Ordering` closure or function
//!
//! # Examples
//!
//! ```rust
//! use bidimaps::comparator::{Comparator, NaturalOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(ReverseOrder::new(NaturalOrder).compare(&1, &2), Ordering::Greater);
//!
//! let by_length = |left: &String, right: &String| left.len().cmp(&right.len());
//! assert_eq!(by_length.compare(&"aa".to_string(), &"b".to_string()), Ordering::Greater);
//! ```
//!
//! The comparator must describe a total order (antisymmetric, transitive and
//! consistent with equality). Containers do not detect violations; an
//! inconsistent comparator makes lookups return unspecified results.

use std::cmp::Ordering;

// =============================================================================
// Comparator Trait
// =============================================================================

/// A three-way ordering over values of type `T`.
pub trait Comparator<T: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

// =============================================================================
// Built-in Comparators
// =============================================================================

/// Orders values by their [`Ord`] implementation.
///
/// This is the default comparator of every ordered container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Inverts the ordering of an inner comparator.
///
/// # Examples
///
/// ```rust
/// use bidimaps::comparator::{NaturalOrder, ReverseOrder};
/// use bidimaps::trees::RedBlackTree;
///
/// let mut tree = RedBlackTree::with_comparator(ReverseOrder::new(NaturalOrder));
/// tree.put(1, "one");
/// tree.put(2, "two");
/// let keys: Vec<&i32> = tree.keys().collect();
/// assert_eq!(keys, vec![&2, &1]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder<C = NaturalOrder> {
    inner: C,
}

impl<C> ReverseOrder<C> {
    /// Wraps `inner` so that it orders in the opposite direction.
    #[inline]
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Returns the wrapped comparator.
    #[inline]
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for ReverseOrder<C> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(right, left)
    }
}

// =============================================================================
// Comparator Functions
// =============================================================================

/// Compares two numbers.
///
/// Values that are not comparable with each other (such as `NaN`) compare
/// as [`Ordering::Equal`].
///
/// # Examples
///
/// ```rust
/// use bidimaps::comparator::number_comparator;
/// use std::cmp::Ordering;
///
/// assert_eq!(number_comparator(&1, &2), Ordering::Less);
/// assert_eq!(number_comparator(&2.5, &2.5), Ordering::Equal);
/// assert_eq!(number_comparator(&f64::NAN, &1.0), Ordering::Equal);
/// ```
pub fn number_comparator<T: PartialOrd>(left: &T, right: &T) -> Ordering {
    left.partial_cmp(right).unwrap_or(Ordering::Equal)
}

/// Compares two strings byte by byte; a proper prefix orders first.
///
/// # Examples
///
/// ```rust
/// use bidimaps::comparator::string_comparator;
/// use std::cmp::Ordering;
///
/// assert_eq!(string_comparator("aa", "aab"), Ordering::Less);
/// assert_eq!(string_comparator("a", ""), Ordering::Greater);
/// ```
pub fn string_comparator(left: &str, right: &str) -> Ordering {
    left.as_bytes().cmp(right.as_bytes())
}

// =============================================================================
// Tests
// =============================================================================
