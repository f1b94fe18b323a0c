use super::*;

use std::collections::HashMap;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Draft {
    title: String,
}

#[test]
fn profile_image_key_embeds_uid() {
    assert_eq!(profile_image_key("U"), "profileImage-U");
}

#[test]
fn set_overwrites_single_entry_per_key() {
    let store = MemoryStore::new();
    store.set("profileImage-U", "data:a").unwrap();
    store.set("profileImage-U", "data:b").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("profileImage-U").as_deref(), Some("data:b"));
}

#[test]
fn remove_deletes_entry() {
    let store = MemoryStore::new();
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    store.remove("never-set").unwrap();
    assert!(store.is_empty());
}

#[test]
fn json_helpers_round_trip_and_skip_garbage() {
    let store = MemoryStore::new();
    save_json(&store, "draft", &Draft { title: "hi".into() }).unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), Some(Draft { title: "hi".into() }));

    store.set("draft", "{not json").unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), None);
    assert_eq!(load_json::<Draft>(&store, "absent"), None);
}

#[test]
fn save_json_reports_unencodable_value() {
    let store = MemoryStore::new();
    let value = HashMap::from([((1, 2), 3)]);
    let err = save_json(&store, "grid", &value).unwrap_err();
    assert!(matches!(err, StoreError::Encode { ref key, .. } if key == "grid"));
    assert!(store.is_empty());
}

#[test]
fn rejected_error_names_key() {
    let err = StoreError::rejected("profileImage-U", "QuotaExceededError");
    assert_eq!(err.to_string(), "write to profileImage-U rejected: QuotaExceededError");
}
