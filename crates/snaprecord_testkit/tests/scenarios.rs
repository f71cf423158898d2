//! End-to-end record lifecycle scenarios over both adapters.

use snaprecord_codec::Value;
use snaprecord_core::{Limited, Record};
use snaprecord_testkit::{with_kv_store, with_local_store, TestStore};

fn title(record: &Record) -> Option<&str> {
    record.get("title").and_then(Value::as_text)
}

fn create_then_destroy_first(store: &TestStore) {
    let posts = store.define("Post", &["title", "body"]);
    let collection = posts.collection();

    let mut first = collection
        .create([("title", "A"), ("body", "B")])
        .unwrap()
        .unwrap();
    assert_eq!(collection.all().unwrap().len(), 1);

    collection
        .create([("title", "C"), ("body", "D")])
        .unwrap()
        .unwrap();
    assert_eq!(collection.all().unwrap().len(), 2);
    let last = collection.last(1).unwrap().one().unwrap();
    assert_eq!(title(&last), Some("C"));

    assert!(first.destroy().unwrap());
    let remaining = collection.all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(title(&remaining[0]), Some("C"));
}

#[test]
fn create_and_destroy_on_local_file() {
    with_local_store(create_then_destroy_first);
}

#[test]
fn create_and_destroy_on_key_value() {
    with_kv_store(create_then_destroy_first);
}

#[test]
fn first_and_last_follow_creation_order() {
    with_local_store(|store| {
        let posts = store.define("Post", &["title", "body"]);
        let collection = posts.collection();
        let a = collection.create([("title", "A")]).unwrap().unwrap();
        let b = collection.create([("title", "B")]).unwrap().unwrap();

        let first = collection.first(1).unwrap().one().unwrap();
        let last = collection.last(1).unwrap().one().unwrap();
        assert_eq!(first.persisted_attributes(), a.persisted_attributes());
        assert_eq!(last.persisted_attributes(), b.persisted_attributes());

        match collection.first(2).unwrap() {
            Limited::Many(records) => assert_eq!(records.len(), 2),
            Limited::One(_) => panic!("limit 2 must yield a sequence"),
        }
    });
}

#[test]
fn destroyed_record_is_not_found() {
    with_local_store(|store| {
        let posts = store.define("Post", &["title"]);
        let collection = posts.collection();
        let mut records: Vec<Record> = (0..4)
            .map(|i| collection.create([("title", format!("p{i}"))]).unwrap().unwrap())
            .collect();

        let id = records[2].id().cloned().unwrap();
        assert!(records[2].destroy().unwrap());

        assert_eq!(collection.count().unwrap(), 3);
        assert!(collection.find(id).unwrap().is_none());
        for record in records.iter().filter(|r| !r.is_destroyed()) {
            assert!(collection.find(record.id().cloned().unwrap()).unwrap().is_some());
        }
    });
}

#[test]
fn stale_update_does_not_resurrect() {
    with_kv_store(|store| {
        let posts = store.define("Post", &["title"]);
        let collection = posts.collection();
        let mut post = collection.create([("title", "A")]).unwrap().unwrap();
        let mut stale = collection.find(post.id().cloned().unwrap()).unwrap().unwrap();

        assert!(post.destroy().unwrap());
        assert!(!stale.update_attributes([("title", "back")]).unwrap());
        assert_eq!(collection.count().unwrap(), 0);
    });
}

#[test]
fn local_file_is_readable_json() {
    let store = TestStore::local();
    let posts = store.define("Post", &["title", "tags"]);
    posts
        .collection()
        .create([
            ("title", Value::from("Hello")),
            ("tags", Value::from(vec!["a", "b"])),
        ])
        .unwrap();

    let raw = store.raw_json(&posts);
    let entry = &raw[0];
    assert_eq!(entry["title"], "Hello");
    assert_eq!(entry["tags"], serde_json::json!(["a", "b"]));
    assert_eq!(entry["id"].as_str().map(str::len), Some(32));
    assert!(entry.get("persisted").is_none());

    let text = std::fs::read_to_string(posts.source()).unwrap();
    assert!(text.lines().count() > 1, "collection file should be pretty-printed");
}

#[test]
fn two_types_share_a_registry() {
    with_local_store(|store| {
        let posts = store.define("Post", &["title"]);
        let authors = store.define("Author", &["name"]);

        posts.collection().create([("title", "A")]).unwrap();
        authors.collection().create([("name", "Ann")]).unwrap();

        assert_ne!(posts.source(), authors.source());
        assert_eq!(store.collection("Post").unwrap().count().unwrap(), 1);
        assert_eq!(store.collection("Author").unwrap().count().unwrap(), 1);
    });
}
