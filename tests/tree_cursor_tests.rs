//! Integration tests for the stateful tree cursor.

use bidimaps::containers::KeyedCursor;
use bidimaps::trees::{CursorPosition, RedBlackTree};
use rstest::{fixture, rstest};

#[fixture]
fn tree() -> RedBlackTree<i32, &'static str> {
    [(5, "e"), (6, "f"), (7, "g"), (3, "c"), (4, "d"), (1, "a"), (2, "b")]
        .into_iter()
        .collect()
}

fn walk_forward(cursor: &mut impl KeyedCursor<Key = i32>) -> Vec<i32> {
    let mut keys = Vec::new();
    while cursor.move_next() {
        keys.extend(cursor.key().copied());
    }
    keys
}

fn walk_backward(cursor: &mut impl KeyedCursor<Key = i32>) -> Vec<i32> {
    let mut keys = Vec::new();
    while cursor.move_prev() {
        keys.extend(cursor.key().copied());
    }
    keys
}

// =============================================================================
// Traversal
// =============================================================================

#[rstest]
fn test_full_forward_then_backward(tree: RedBlackTree<i32, &'static str>) {
    let mut cursor = tree.cursor();
    assert_eq!(walk_forward(&mut cursor), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(cursor.position(), CursorPosition::AfterLast);
    assert_eq!(walk_backward(&mut cursor), vec![7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(cursor.position(), CursorPosition::BeforeFirst);
}

#[rstest]
fn test_direction_change_mid_walk(tree: RedBlackTree<i32, &'static str>) {
    let mut cursor = tree.cursor();
    for _ in 0..4 {
        cursor.move_next();
    }
    assert_eq!(cursor.key(), Some(&4));
    assert!(cursor.move_prev());
    assert_eq!(cursor.key(), Some(&3));
    assert!(cursor.move_next());
    assert_eq!(cursor.value(), Some(&"d"));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(7)]
fn test_moves_past_end_are_idempotent(tree: RedBlackTree<i32, &'static str>, #[case] extra: usize) {
    let mut cursor = tree.cursor();
    assert!(cursor.last());
    for _ in 0..extra {
        assert!(!cursor.move_next());
        assert_eq!(cursor.key(), None);
    }
    assert_eq!(cursor.position(), CursorPosition::AfterLast);
    assert!(cursor.move_prev());
    assert_eq!(cursor.key(), Some(&7));
}

#[rstest]
fn test_moves_before_start_are_idempotent(tree: RedBlackTree<i32, &'static str>) {
    let mut cursor = tree.cursor();
    assert!(!cursor.move_prev());
    assert!(!cursor.move_prev());
    assert_eq!(cursor.position(), CursorPosition::BeforeFirst);
    assert!(cursor.move_next());
    assert_eq!(cursor.key(), Some(&1));
}

// =============================================================================
// Boundaries and Single Entries
// =============================================================================

#[rstest]
fn test_single_entry_tree() {
    let tree: RedBlackTree<i32, ()> = std::iter::once((42, ())).collect();
    let mut cursor = tree.cursor();
    assert!(cursor.first());
    assert_eq!(cursor.key(), Some(&42));
    assert!(cursor.last());
    assert_eq!(cursor.key(), Some(&42));
    assert!(!cursor.move_next());
    assert!(cursor.move_prev());
    assert!(!cursor.move_prev());
}

#[rstest]
fn test_empty_tree() {
    let tree: RedBlackTree<i32, ()> = RedBlackTree::new();
    let mut cursor = tree.cursor();
    assert!(!cursor.first());
    assert!(!cursor.last());
    assert!(walk_forward(&mut cursor).is_empty());
    assert!(walk_backward(&mut cursor).is_empty());
}

#[rstest]
fn test_begin_and_end_reset(tree: RedBlackTree<i32, &'static str>) {
    let mut cursor = tree.cursor();
    cursor.move_next();
    cursor.move_next();
    cursor.end();
    assert_eq!(cursor.position(), CursorPosition::AfterLast);
    assert_eq!(cursor.entry(), None);
    cursor.begin();
    assert_eq!(cursor.position(), CursorPosition::BeforeFirst);
    assert!(cursor.move_next());
    assert_eq!(cursor.entry(), Some((&1, &"a")));
}

// =============================================================================
// Seeking
// =============================================================================

#[rstest]
fn test_seek_to_node(tree: RedBlackTree<i32, &'static str>) {
    let mut cursor = tree.cursor();
    let node = tree.floor_node(&4).unwrap();
    cursor.seek(node);
    assert_eq!(cursor.position(), CursorPosition::Positioned);
    assert_eq!(walk_forward(&mut cursor), vec![5, 6, 7]);
}

#[rstest]
fn test_node_follows_cursor(tree: RedBlackTree<i32, &'static str>) {
    let mut cursor = tree.cursor();
    assert!(cursor.node().is_none());
    cursor.next_to(|key, _| *key == 3);
    let node = cursor.node().unwrap();
    assert_eq!(node.entry(), (&3, &"c"));
    assert_eq!(node.successor().map(|next| *next.key()), Some(4));
}

#[rstest]
fn test_clones_are_independent(tree: RedBlackTree<i32, &'static str>) {
    let mut cursor = tree.cursor();
    cursor.move_next();
    let mut copy = cursor.clone();
    copy.move_next();
    assert_eq!(cursor.key(), Some(&1));
    assert_eq!(copy.key(), Some(&2));
}
