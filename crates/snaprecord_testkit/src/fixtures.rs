//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up throwaway registries
//! backed by a temporary directory or an in-memory key-value client.

use snaprecord_core::{Config, RecordType, Registry};
use snaprecord_storage::{InMemoryKv, KvClient};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// A registry over throwaway storage.
pub struct TestStore {
    /// The registry instance.
    pub registry: Registry,
    /// Shared client when the store is key-value backed.
    client: Option<Arc<InMemoryKv>>,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: TempDir,
}

impl TestStore {
    /// Creates a store whose types write files under a temporary directory.
    pub fn local() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = Registry::new(Config::new().root(temp_dir.path()));
        Self {
            registry,
            client: None,
            temp_dir,
        }
    }

    /// Creates a store whose types write to one shared in-memory client.
    pub fn key_value() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self {
            registry: Registry::new(Config::new()),
            client: Some(Arc::new(InMemoryKv::new())),
            temp_dir,
        }
    }

    /// Defines a record type with `properties`, stored at the lowercased
    /// name.
    pub fn define(&self, name: &str, properties: &[&str]) -> Arc<RecordType> {
        let mut builder = RecordType::builder(name).properties(properties.iter().copied());
        if let Some(client) = &self.client {
            builder = builder.key_value(Arc::clone(client) as Arc<dyn KvClient>);
        }
        self.registry
            .define(builder)
            .expect("Failed to define record type")
    }

    /// Returns the root directory for local sources.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Returns the in-memory client, if key-value backed.
    pub fn client(&self) -> Option<&Arc<InMemoryKv>> {
        self.client.as_ref()
    }

    /// Parses the stored local file of a record type as JSON.
    ///
    /// Panics if the type is key-value backed or the file is not JSON.
    pub fn raw_json(&self, schema: &RecordType) -> serde_json::Value {
        let bytes = std::fs::read(schema.source()).expect("Failed to read source file");
        serde_json::from_slice(&bytes).expect("Source file is not JSON")
    }
}

impl std::ops::Deref for TestStore {
    type Target = Registry;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

/// Runs a test against a file-backed store.
///
/// # Example
///
/// ```rust
/// use snaprecord_testkit::with_local_store;
///
/// with_local_store(|store| {
///     let posts = store.define("Post", &["title"]);
///     posts.collection().create([("title", "Hello")]).unwrap();
///     assert_eq!(posts.collection().count().unwrap(), 1);
/// });
/// ```
pub fn with_local_store<F, R>(f: F) -> R
where
    F: FnOnce(&TestStore) -> R,
{
    let store = TestStore::local();
    f(&store)
}

/// Runs a test against a key-value backed store.
pub fn with_kv_store<F, R>(f: F) -> R
where
    F: FnOnce(&TestStore) -> R,
{
    let store = TestStore::key_value();
    f(&store)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use snaprecord_core::Record;

    /// Creates a local store holding `count` posts titled `post-0`,
    /// `post-1`, ... in that order.
    pub fn populated_store(count: usize) -> (TestStore, Arc<RecordType>, Vec<Record>) {
        let store = TestStore::local();
        let posts = store.define("Post", &["title", "body"]);
        let collection = posts.collection();

        let records = (0..count)
            .map(|i| {
                collection
                    .create([("title", format!("post-{i}")), ("body", format!("body of {i}"))])
                    .expect("Failed to create record")
                    .expect("Save was rejected")
            })
            .collect();

        (store, posts, records)
    }
}
