//! Integration tests for TreeBidiMap.

use bidimaps::comparator::{NaturalOrder, ReverseOrder, string_comparator};
use bidimaps::containers::{BidiMap, Container, KeyedCursor, Map};
use bidimaps::maps::TreeBidiMap;
use bidimaps::trees::CursorPosition;
use rstest::{fixture, rstest};

// =============================================================================
// Fixtures and Helpers
// =============================================================================

#[fixture]
fn numbers() -> TreeBidiMap<i32, String> {
    let mut map = TreeBidiMap::new();
    map.put(5, "e".to_string());
    map.put(6, "f".to_string());
    map.put(7, "g".to_string());
    map.put(3, "c".to_string());
    map.put(4, "d".to_string());
    map.put(1, "x".to_string());
    map.put(2, "b".to_string());
    map.put(1, "a".to_string());
    map
}

fn assert_bidirectional<M>(map: &M, pairs: &[(i32, &str)])
where
    M: BidiMap<i32, String>,
{
    assert_eq!(map.len(), pairs.len());
    for (key, value) in pairs {
        let value = (*value).to_string();
        assert_eq!(map.get(key), Some(&value));
        assert_eq!(map.get_key(&value), Some(key));
    }
}

fn install_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("bidimaps=trace"))
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Put and Get
// =============================================================================

#[rstest]
fn test_put_builds_both_directions(numbers: TreeBidiMap<i32, String>) {
    assert_bidirectional(
        &numbers,
        &[(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e"), (6, "f"), (7, "g")],
    );
    assert_eq!(numbers.get_key(&"x".to_string()), None);
}

#[rstest]
fn test_put_overwrite_evicts_stale_value() {
    install_subscriber();
    let mut map = TreeBidiMap::new();
    map.put("k1", "v1");
    map.put("k1", "v2");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"k1"), Some(&"v2"));
    assert_eq!(map.get_key(&"v1"), None);
}

#[rstest]
fn test_put_existing_value_evicts_stale_key() {
    install_subscriber();
    let mut map = TreeBidiMap::new();
    map.put("k1", "v1");
    map.put("k2", "v1");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"k1"), None);
    assert_eq!(map.get(&"k2"), Some(&"v1"));
    assert_eq!(map.get_key(&"v1"), Some(&"k2"));
}

#[rstest]
#[case(&[(1, 2), (2, 1), (1, 1)], &[(1, 1)])]
#[case(&[(1, 2), (2, 1), (2, 2)], &[(2, 2)])]
#[case(&[(1, 1), (2, 2), (1, 2)], &[(1, 2)])]
#[case(&[(1, 1), (1, 1)], &[(1, 1)])]
fn test_overlapping_key_and_value_domains(
    #[case] puts: &[(i32, i32)],
    #[case] expected: &[(i32, i32)],
) {
    let mut map = TreeBidiMap::new();
    for (key, value) in puts {
        map.put(*key, *value);
    }
    let pairs: Vec<(i32, i32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(pairs, expected);
    for (key, value) in expected {
        assert_eq!(map.get_key(value), Some(key));
    }
}

// =============================================================================
// Remove
// =============================================================================

#[rstest]
fn test_remove_each_key(mut numbers: TreeBidiMap<i32, String>) {
    assert_eq!(numbers.remove(&5), Some("e".to_string()));
    assert_eq!(numbers.remove(&6), Some("f".to_string()));
    assert_eq!(numbers.remove(&7), Some("g".to_string()));
    assert_eq!(numbers.remove(&8), None);
    assert_eq!(numbers.remove(&5), None);
    assert_bidirectional(&numbers, &[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);

    for key in 1..=4 {
        numbers.remove(&key);
    }
    assert!(numbers.is_empty());
    assert_eq!(numbers.keys().count(), 0);
    assert_eq!(numbers.values().count(), 0);
}

#[rstest]
fn test_remove_value(mut numbers: TreeBidiMap<i32, String>) {
    assert_eq!(numbers.remove_value(&"c".to_string()), Some(3));
    assert!(!numbers.contains_key(&3));
    assert_eq!(numbers.remove_value(&"c".to_string()), None);
    assert_eq!(numbers.len(), 6);
}

#[rstest]
fn test_remove_absent_changes_nothing(mut numbers: TreeBidiMap<i32, String>) {
    let before = numbers.clone();
    assert_eq!(numbers.remove(&42), None);
    assert_eq!(numbers, before);
}

#[rstest]
fn test_clear(mut numbers: TreeBidiMap<i32, String>) {
    install_subscriber();
    numbers.clear();
    assert!(numbers.is_empty());
    assert_eq!(numbers.get(&1), None);
    assert_eq!(numbers.get_key(&"a".to_string()), None);
}

// =============================================================================
// Ordering
// =============================================================================

#[rstest]
fn test_keys_sorted_from_any_insertion_order() {
    let map: TreeBidiMap<i32, char> = [(5, 'q'), (3, 'w'), (8, 'e'), (1, 'r')].into_iter().collect();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec!['e', 'q', 'r', 'w']);
    assert_eq!(map.keys().rev().copied().collect::<Vec<_>>(), vec![8, 5, 3, 1]);
}

#[rstest]
fn test_independent_key_and_value_orders() {
    let mut map = TreeBidiMap::with_comparators(
        ReverseOrder::new(NaturalOrder),
        |left: &String, right: &String| string_comparator(left, right),
    );
    map.put(1, "b".to_string());
    map.put(2, "a".to_string());
    map.put(3, "c".to_string());
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(map.values().cloned().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[rstest]
fn test_iter_pairs(numbers: TreeBidiMap<i32, String>) {
    let pairs: Vec<String> = numbers
        .iter()
        .map(|(key, value)| format!("{key}{value}"))
        .collect();
    assert_eq!(pairs, vec!["1a", "2b", "3c", "4d", "5e", "6f", "7g"]);
    assert_eq!(numbers.first().map(|(key, _)| *key), Some(1));
    assert_eq!(numbers.last().map(|(key, _)| *key), Some(7));
}

// =============================================================================
// Cursor
// =============================================================================

#[rstest]
fn test_cursor_forward_and_backward(numbers: TreeBidiMap<i32, String>) {
    let mut cursor = numbers.cursor();
    let mut forward = Vec::new();
    while cursor.move_next() {
        forward.push(*cursor.key().unwrap());
    }
    assert_eq!(forward, vec![1, 2, 3, 4, 5, 6, 7]);

    let mut backward = Vec::new();
    while cursor.move_prev() {
        backward.push(cursor.value().unwrap().clone());
    }
    assert_eq!(backward, vec!["g", "f", "e", "d", "c", "b", "a"]);
}

#[rstest]
fn test_cursor_boundaries(numbers: TreeBidiMap<i32, String>) {
    let mut cursor = numbers.cursor();
    assert_eq!(cursor.position(), CursorPosition::BeforeFirst);
    assert!(!cursor.move_prev());
    assert_eq!(cursor.position(), CursorPosition::BeforeFirst);
    assert!(cursor.move_next());
    assert_eq!(cursor.key(), Some(&1));

    cursor.end();
    assert_eq!(cursor.key(), None);
    assert!(cursor.move_prev());
    assert_eq!(cursor.key(), Some(&7));

    cursor.begin();
    assert_eq!(cursor.value(), None);
    assert!(cursor.move_next());
    assert_eq!(cursor.key(), Some(&1));
    assert_eq!(cursor.entry(), Some((&1, &"a".to_string())));
}

#[rstest]
fn test_cursor_seeks_with_predicates(numbers: TreeBidiMap<i32, String>) {
    let mut cursor = numbers.cursor();
    assert!(cursor.next_to(|_, value| value == "d"));
    assert_eq!(cursor.key(), Some(&4));
    assert!(!cursor.next_to(|key, _| *key > 100));
    assert_eq!(cursor.position(), CursorPosition::AfterLast);
    assert!(cursor.prev_to(|key, _| key % 3 == 0));
    assert_eq!(cursor.key(), Some(&6));
    assert!(cursor.first());
    assert_eq!(cursor.key(), Some(&1));
    assert!(cursor.last());
    assert_eq!(cursor.key(), Some(&7));
}

#[rstest]
fn test_cursor_on_empty_map() {
    let map: TreeBidiMap<i32, i32> = TreeBidiMap::new();
    let mut cursor = map.cursor();
    assert!(!cursor.first());
    assert!(!cursor.last());
    assert!(!cursor.move_next());
    assert_eq!(cursor.key(), None);
    assert_eq!(cursor.value(), None);
}

// =============================================================================
// Contracts
// =============================================================================

fn generic_round<M: BidiMap<i32, String>>(map: &mut M) {
    map.put(10, "ten".to_string());
    map.put(20, "twenty".to_string());
    map.put(30, "ten".to_string());
    map.remove(&20);
}

#[rstest]
fn test_bidi_map_contract() {
    let mut map: TreeBidiMap<i32, String> = TreeBidiMap::new();
    generic_round(&mut map);
    assert_eq!(Container::len(&map), 1);
    assert_eq!(BidiMap::get_key(&map, &"ten".to_string()), Some(&30));
    assert!(!Map::contains_key(&map, &10));
    assert!(BidiMap::contains_value(&map, &"ten".to_string()));
}

#[rstest]
fn test_keyed_cursor_contract(numbers: TreeBidiMap<i32, String>) {
    fn collect_keys<C: KeyedCursor<Key = i32>>(cursor: &mut C) -> Vec<i32> {
        let mut keys = Vec::new();
        while cursor.move_next() {
            keys.extend(cursor.key().copied());
        }
        keys
    }
    assert_eq!(collect_keys(&mut numbers.cursor()), vec![1, 2, 3, 4, 5, 6, 7]);
}

// =============================================================================
// Formatting and Equality
// =============================================================================

#[rstest]
fn test_display(numbers: TreeBidiMap<i32, String>) {
    assert_eq!(
        numbers.to_string(),
        "{1: a, 2: b, 3: c, 4: d, 5: e, 6: f, 7: g}"
    );
}

#[rstest]
fn test_equality_and_clone(numbers: TreeBidiMap<i32, String>) {
    let mut copy = numbers.clone();
    assert_eq!(copy, numbers);
    copy.put(8, "h".to_string());
    assert_ne!(copy, numbers);
    assert_eq!(numbers.len(), 7);
}

#[rstest]
fn test_default_is_empty() {
    let map: TreeBidiMap<String, String> = TreeBidiMap::default();
    assert!(map.is_empty());
    assert_eq!(format!("{map:?}"), "{}");
}
