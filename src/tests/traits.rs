use crate::Hamt;

#[test]
fn default_is_empty() {
    let map: Hamt<i32, i32> = Hamt::default();
    assert!(map.is_empty());
}

#[test]
fn debug_format_empty() {
    let map: Hamt<i32, i32> = Hamt::new();
    assert_eq!(format!("{map:?}"), "HAMT({})");
}

#[test]
fn debug_format_single_entry() {
    let map = Hamt::new().insert(1, "a");
    assert_eq!(format!("{map:?}"), "HAMT({1: \"a\"})");
}

#[test]
fn from_iterator() {
    let map: Hamt<i32, i32> = vec![(1, 10), (2, 20), (3, 30)].into_iter().collect();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&1), Some(&10));
}

#[test]
fn from_iterator_later_duplicate_wins() {
    let map: Hamt<i32, i32> = vec![(1, 10), (1, 99)].into_iter().collect();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&99));
}

#[test]
fn extend_trait() {
    let mut map = Hamt::new().insert(1, 10);
    map.extend(vec![(2, 20), (3, 30)]);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&2), Some(&20));
}

#[test]
fn index_existing() {
    let map = Hamt::new().insert("key", 42);
    assert_eq!(map[&"key"], 42);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_panics() {
    let map: Hamt<i32, i32> = Hamt::new();
    let _ = map[&999];
}

#[test]
fn equality_is_order_independent() {
    let a = Hamt::new().insert(1, "a").insert(2, "b").insert(3, "c");
    let b = Hamt::new().insert(3, "c").insert(1, "a").insert(2, "b");
    assert_eq!(a, b);
}

#[test]
fn equality_detects_value_difference() {
    let a = Hamt::new().insert(1, "a");
    let b = Hamt::new().insert(1, "b");
    assert_ne!(a, b);
}

#[test]
fn equality_detects_size_difference() {
    let a = Hamt::new().insert(1, "a");
    let b = Hamt::new().insert(1, "a").insert(2, "b");
    assert_ne!(a, b);
}

#[test]
fn into_iter_on_reference_visits_all_pairs() {
    let map = Hamt::new().insert(1, "a").insert(2, "b");
    let mut seen: Vec<_> = (&map).into_iter().collect();
    seen.sort_by_key(|(k, _)| **k);
    assert_eq!(seen, vec![(&1, &"a"), (&2, &"b")]);
}

#[test]
fn keys_and_values_iterators() {
    let map = Hamt::new().insert(1, "a").insert(2, "b");
    let mut keys: Vec<_> = map.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 2]);

    let mut values: Vec<_> = map.values().copied().collect();
    values.sort_unstable();
    assert_eq!(values, vec!["a", "b"]);
}

#[test]
fn from_hash_map() {
    use std::collections::HashMap;
    let mut std_map = HashMap::new();
    std_map.insert(1, "a");
    std_map.insert(2, "b");

    let map: Hamt<i32, &str> = std_map.into();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&"a"));
}
