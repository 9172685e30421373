use crate::{Hamt, HamtError};

#[test]
fn empty_map() {
    let map: Hamt<String, i32> = Hamt::new();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
}

#[test]
fn insert_one() {
    let map = Hamt::new().insert("hello", 42);
    assert_eq!(map.len(), 1);
    assert!(!map.is_empty());
}

#[test]
fn insert_and_get() {
    let map = Hamt::new().insert("key", 100);
    assert_eq!(map.get(&"key"), Some(&100));
}

#[test]
fn get_missing_key() {
    let map = Hamt::new().insert("a", 1);
    assert_eq!(map.get(&"b"), None);
}

#[test]
fn try_get_missing_key_is_key_missing() {
    let map = Hamt::new().insert("a", 1);
    assert_eq!(map.try_get(&"b"), Err(HamtError::KeyMissing));
}

#[test]
fn get_or_falls_back_to_default() {
    let map: Hamt<&str, i32> = Hamt::new();
    let fallback = 7;
    assert_eq!(map.get_or(&"missing", &fallback), &7);
}

#[test]
fn insert_multiple() {
    let mut map = Hamt::new();
    for i in 0..10 {
        map = map.insert(i, i * 10);
    }
    assert_eq!(map.len(), 10);
    for i in 0..10 {
        assert_eq!(map.get(&i), Some(&(i * 10)));
    }
}

#[test]
fn overwrite_value() {
    let map = Hamt::new().insert("k", 1).insert("k", 2);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"k"), Some(&2));
}

#[test]
fn contains_key_true() {
    let map = Hamt::new().insert(42, "val");
    assert!(map.contains_key(&42));
}

#[test]
fn contains_key_false() {
    let map = Hamt::new().insert(1, "a");
    assert!(!map.contains_key(&2));
}

#[test]
fn remove_existing() {
    let map = Hamt::new().insert("a", 1).insert("b", 2);
    let map = map.remove(&"a").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"a"), None);
    assert_eq!(map.get(&"b"), Some(&2));
}

#[test]
fn remove_missing_is_key_missing() {
    let map = Hamt::new().insert("a", 1);
    assert_eq!(map.remove(&"z"), Err(HamtError::KeyMissing));
    assert_eq!(map.len(), 1);
}

#[test]
fn remove_all() {
    let map = Hamt::new().insert(1, 10).insert(2, 20).insert(3, 30);
    let map = map.remove(&1).unwrap();
    let map = map.remove(&2).unwrap();
    let map = map.remove(&3).unwrap();
    assert!(map.is_empty());
}

#[test]
fn replace_existing_key() {
    let map = Hamt::new().insert("k", 1);
    let map = map.replace(&"k", 2).unwrap();
    assert_eq!(map.get(&"k"), Some(&2));
}

#[test]
fn replace_missing_key_is_key_missing() {
    let map: Hamt<&str, i32> = Hamt::new();
    assert_eq!(map.replace(&"k", 2).unwrap_err(), HamtError::KeyMissing);
}

#[test]
fn update_existing_key() {
    let map = Hamt::new().insert("k", 1);
    let map = map.update(&"k", |v| Some(v + 1)).unwrap();
    assert_eq!(map.get(&"k"), Some(&2));
}

#[test]
fn update_to_none_removes_key() {
    let map = Hamt::new().insert("k", 1);
    let map = map.update(&"k", |_| None).unwrap();
    assert!(map.is_empty());
}

#[test]
fn update_missing_key_is_key_missing() {
    let map: Hamt<&str, i32> = Hamt::new();
    assert_eq!(map.update(&"k", |v| Some(*v)).unwrap_err(), HamtError::KeyMissing);
}
