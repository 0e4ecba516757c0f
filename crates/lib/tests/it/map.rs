//! DocMap integration tests: path addressing, merging, and the
//! key-value interchange views.

use veneer::map::{DocMap, MapError, Value};

// ===== PATH ADDRESSING =====

#[test]
fn test_set_and_get_through_nested_branches() {
    let mut map = DocMap::new();

    map.set("user.profile.name", "Alice").unwrap();
    map.set("user.profile.age", 30).unwrap();
    map.set("user.settings.theme", "dark").unwrap();

    assert_eq!(map.get("user.profile.name").unwrap(), "Alice");
    assert_eq!(*map.get("user.profile.age").unwrap(), 30);
    assert_eq!(map.get("user.settings.theme").unwrap(), "dark");
    assert!(map.get("user.profile.missing").is_none());
    assert!(map.get("nonexistent.path").is_none());
}

#[test]
fn test_set_returns_previous_leaf_value() {
    let mut map = DocMap::new();

    assert!(map.set("k", "original").unwrap().is_none());
    let old = map.set("k", "modified").unwrap();
    assert_eq!(old.unwrap(), "original");
    assert_eq!(map.get("k").unwrap(), "modified");
}

#[test]
fn test_set_materializes_over_scalar_intermediates() {
    let mut map = DocMap::new();
    map.set("slot", 1).unwrap();

    // assignment through a scalar replaces it with a branch
    map.set("slot.inner", 2).unwrap();
    assert_eq!(*map.get("slot.inner").unwrap(), 2);
    assert!(map.get("slot").unwrap().is_map());
}

#[test]
fn test_get_mut_edits_in_place() {
    let mut map = DocMap::new();
    map.set("user.name", "Alice").unwrap();

    if let Some(Value::Text(name)) = map.get_mut("user.name") {
        name.push_str(" Smith");
    }
    assert_eq!(map.get("user.name").unwrap(), "Alice Smith");
}

// ===== INTERCHANGE VIEWS =====

#[test]
fn test_key_value_round_trip_stringifies_structure() {
    let json = serde_json::json!({
        "name": "Ann",
        "age": 34,
        "address": { "city": "X", "geo": { "lat": 1.25, "lon": -3.5 } },
        "tags": ["a", "b"],
        "extras": null,
    });

    let map = DocMap::from_key_value(json.clone()).unwrap();
    assert_eq!(map.to_key_value(), json);

    // values land in the closed variant
    assert_eq!(map.get("address.geo.lat").unwrap(), &Value::Float(1.25));
    assert_eq!(map.get("extras").unwrap(), &Value::Null);
}

#[test]
fn test_from_key_value_rejects_non_objects() {
    for raw in [
        serde_json::json!(42),
        serde_json::json!("text"),
        serde_json::json!([1, 2, 3]),
    ] {
        let err = DocMap::from_key_value(raw).unwrap_err();
        assert!(matches!(err, MapError::NotAnObject { .. }));
    }
}

#[test]
fn test_json_text_round_trip() {
    let map = DocMap::new()
        .with("name", "Ann")
        .with("address.city", "X");

    let text = map.to_json_string().unwrap();
    let back = DocMap::from_json_str(&text).unwrap();
    assert_eq!(back, map);

    assert!(DocMap::from_json_str("not json").is_err());
}

// ===== CLONING AND MERGING =====

#[test]
fn test_clone_shares_no_nested_structure() {
    let mut source = DocMap::new()
        .with("address.city", "X")
        .with("address.geo.lat", 1.0);
    let clone = source.clone();

    source.set("address.geo.lat", 9.0).unwrap();
    source.remove("address.city");

    assert_eq!(*clone.get("address.geo.lat").unwrap(), 1.0);
    assert_eq!(clone.get("address.city").unwrap(), "X");

    // and the other direction
    let mut clone2 = clone.clone();
    clone2.set("address.city", "Y").unwrap();
    assert_eq!(clone.get("address.city").unwrap(), "X");
}

#[test]
fn test_merged_leaf_provenance() {
    let a = DocMap::new()
        .with("only_a", 1)
        .with("shared.left", "a")
        .with("shared.both", "a");
    let b = DocMap::new()
        .with("only_b", 2)
        .with("shared.right", "b")
        .with("shared.both", "b");

    let merged = a.merged(&b);

    // leaf only in A keeps A's value; only in B takes B's
    assert_eq!(*merged.get("only_a").unwrap(), 1);
    assert_eq!(*merged.get("only_b").unwrap(), 2);
    // nested maps on both sides merge recursively, right side winning
    assert_eq!(merged.get("shared.left").unwrap(), "a");
    assert_eq!(merged.get("shared.right").unwrap(), "b");
    assert_eq!(merged.get("shared.both").unwrap(), "b");

    // inputs are untouched
    assert_eq!(a.get("shared.both").unwrap(), "a");
    assert!(b.get("only_a").is_none());
}

#[test]
fn test_leaf_paths_restartable_walks() {
    let map = DocMap::new()
        .with("a", 1)
        .with("b.c", 2)
        .with("b.d.e", 3);

    let mut first: Vec<String> = map.leaf_paths().map(|p| p.to_string()).collect();
    let mut second: Vec<String> = map.leaf_paths().map(|p| p.to_string()).collect();
    first.sort();
    second.sort();

    assert_eq!(first, vec!["a", "b.c", "b.d.e"]);
    assert_eq!(first, second);
}
