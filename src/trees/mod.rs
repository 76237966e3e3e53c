//! Balanced search trees.
//!
//! - [`RedBlackTree`]: mutable ordered map with index-linked nodes
//! - [`Cursor`]: stateful bidirectional traversal over a [`RedBlackTree`]
//! - [`NodeRef`]: borrowed handle for structural and in-order navigation

mod cursor;
mod red_black_tree;

pub use cursor::Cursor;
pub use cursor::CursorPosition;
pub use red_black_tree::Color;
pub use red_black_tree::Iter;
pub use red_black_tree::NodeRef;
pub use red_black_tree::RedBlackTree;
