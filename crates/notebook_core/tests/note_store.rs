use chrono::{Duration, TimeZone, Utc};
use notebook_core::{BlobStorage, LoadOutcome, MemoryBlobStorage, NoteStore, DEFAULT_STORAGE_KEY};

#[test]
fn add_creates_exactly_one_entry_under_its_color() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    let before = Utc::now();

    let note = store.add("Groceries", "milk, eggs", "is-success");

    assert!(note.date >= before);
    let grouped = store.all_grouped_by_color();
    assert_eq!(grouped.len(), 1);
    let group = &grouped["is-success"];
    assert_eq!(group.len(), 1);
    assert_eq!(group[0].id, note.id);
    assert_eq!(group[0].title, "Groceries");
    assert_eq!(group[0].text, "milk, eggs");
}

#[test]
fn add_assigns_fresh_ids() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    let ids: Vec<_> = (0..20)
        .map(|idx| store.add(format!("t{idx}"), "x", "is-info").id)
        .collect();

    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn remove_unknown_id_is_a_noop() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    let note = store.add("a", "b", "is-info");
    let snapshot = store.all_notes().to_vec();

    assert!(!store.remove(note.id + 1000));
    assert_eq!(store.all_notes(), snapshot.as_slice());
}

#[test]
fn remove_existing_id_drops_it_from_every_group() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    let keep = store.add("keep", "k", "is-info");
    let gone = store.add("gone", "g", "is-info");
    let other = store.add("other", "o", "is-danger");

    assert!(store.remove(gone.id));
    assert_eq!(store.len(), 2);
    let grouped = store.all_grouped_by_color();
    assert!(grouped
        .values()
        .flatten()
        .all(|note| note.id != gone.id));
    assert_eq!(grouped["is-info"][0].id, keep.id);
    assert_eq!(grouped["is-danger"][0].id, other.id);
}

#[test]
fn grouping_orders_keys_lexicographically_and_notes_newest_first() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let older_b = store.add_at("first", "1", "b", base);
    let only_a = store.add_at("second", "2", "a", base + Duration::seconds(1));
    let newer_b = store.add_at("third", "3", "b", base + Duration::seconds(2));

    let grouped = store.all_grouped_by_color();
    assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(grouped["a"][0].id, only_a.id);
    let b_ids: Vec<_> = grouped["b"].iter().map(|note| note.id).collect();
    assert_eq!(b_ids, vec![newer_b.id, older_b.id]);
}

#[test]
fn grouping_never_returns_empty_groups() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    let note = store.add("a", "b", "is-warning");
    store.remove(note.id);

    assert!(store.all_grouped_by_color().is_empty());
}

#[test]
fn save_then_load_reproduces_the_collection() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    store.add("one", "first body", "is-primary");
    store.add("two", "second body", "is-link");
    let expected = store.all_notes().to_vec();

    let storage = store.storage().clone();
    let mut restarted = NoteStore::new(storage);
    assert_eq!(restarted.load(), LoadOutcome::Restored(2));
    assert_eq!(restarted.all_notes(), expected.as_slice());
}

#[test]
fn blob_uses_documented_field_layout() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    let at = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 58).unwrap();
    let note = store.add_at("Title", "Body", "is-info", at);

    let blob = store.storage().raw(DEFAULT_STORAGE_KEY).unwrap();
    let json: serde_json::Value = serde_json::from_str(blob).unwrap();
    let entry = &json[0];
    assert_eq!(entry["id"], note.id);
    assert_eq!(entry["title"], "Title");
    assert_eq!(entry["text"], "Body");
    assert_eq!(entry["color"], "is-info");
    assert_eq!(entry["date"], "2024-06-30T23:59:58Z");
}

#[test]
fn load_accepts_browser_style_timestamps() {
    let blob = r#"[{"id":1717000000000,"title":"t","text":"x","color":"is-link","date":"2024-05-29T16:26:40.000Z"}]"#;
    let storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob);

    let store = NoteStore::open(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.len(), 1);
    assert_eq!(store.all_notes()[0].date.timestamp_millis(), 1_717_000_000_000);
}

#[test]
fn malformed_blob_loads_as_empty_collection() {
    for blob in ["not json", "{\"id\":1}", "[{\"id\":\"x\"}]", ""] {
        let storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob);
        let mut store = NoteStore::new(storage);

        assert_eq!(store.load(), LoadOutcome::Malformed, "blob: {blob:?}");
        assert!(store.is_empty());
    }
}

#[test]
fn missing_or_unreadable_blob_loads_as_empty_collection() {
    let mut store = NoteStore::new(MemoryBlobStorage::new());
    assert_eq!(store.load(), LoadOutcome::Missing);
    assert!(store.is_empty());

    let mut storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, "[]");
    storage.set_unavailable(true);
    let mut store = NoteStore::new(storage);
    assert_eq!(store.load(), LoadOutcome::Unavailable);
    assert!(store.is_empty());
}

#[test]
fn failed_save_keeps_the_in_memory_note() {
    let mut store = NoteStore::new(MemoryBlobStorage::with_quota(16));

    let note = store.add("a title that overflows", "and a body", "is-danger");

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(note.id), Some(&note));
    assert_eq!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap(), None);
    assert!(store.save().is_err());
}

#[test]
fn ids_continue_after_restore() {
    let blob = r#"[{"id":9999999999999,"title":"t","text":"x","color":"is-link","date":"2024-05-29T16:26:40Z"}]"#;
    let storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob);
    let mut store = NoteStore::open(storage, DEFAULT_STORAGE_KEY);

    let added = store.add("new", "note", "is-link");
    assert!(added.id > 9_999_999_999_999);
}

#[test]
fn stores_under_distinct_keys_do_not_share_notes() {
    let mut first = NoteStore::with_key(MemoryBlobStorage::new(), "work");
    first.add("a", "b", "is-info");

    let mut second = NoteStore::with_key(first.storage().clone(), "home");
    assert_eq!(second.load(), LoadOutcome::Missing);
    assert_eq!(second.storage_key(), "home");
}

#[test]
fn load_reads_offsetless_timestamps_as_utc() {
    let blob = r#"[{"id":1717000000000,"title":"t","text":"x","color":"is-link","date":"2024-05-29T16:26:40"}]"#;
    let storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob);

    let mut store = NoteStore::with_key(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.load(), LoadOutcome::Restored(1));
    assert_eq!(store.all_notes()[0].date.timestamp_millis(), 1_717_000_000_000);
}

#[test]
fn repeated_ids_in_blob_keep_only_the_first_note() {
    let blob = r#"[
        {"id":5,"title":"first","text":"x","color":"is-link","date":"2024-05-29T16:26:40Z"},
        {"id":5,"title":"second","text":"y","color":"is-info","date":"2024-05-29T16:26:41Z"}
    ]"#;
    let storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob);

    let mut store = NoteStore::with_key(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.load(), LoadOutcome::Restored(1));
    assert_eq!(store.get(5).unwrap().title, "first");

    let added = store.add("t", "x", "is-link");
    assert_ne!(added.id, 5);
    assert!(store.remove(5));
    assert_eq!(store.len(), 1);
    assert_eq!(store.all_notes()[0].id, added.id);
}
