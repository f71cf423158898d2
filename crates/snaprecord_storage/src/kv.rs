//! Key-value storage adapter.

use crate::adapter::StorageAdapter;
use crate::error::{StorageError, StorageResult};
use snaprecord_codec::{Attributes, Format};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Namespace prepended to every key unless overridden.
pub const DEFAULT_NAMESPACE: &str = "snaprecord";

/// The minimal client surface the key-value adapter needs.
///
/// Implement this over whatever remote store is in use. Timeouts and
/// reconnection are the client's business; the adapter issues exactly one
/// `get` per read and one `set` per write.
pub trait KvClient: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;
}

/// A storage adapter keeping each collection as one blob in a key-value
/// store.
///
/// The blob for source `posts` lives under `"<namespace>:posts"`.
pub struct KeyValueStore {
    client: Arc<dyn KvClient>,
    namespace: String,
    format: Format,
}

impl KeyValueStore {
    /// Creates a key-value store over `client`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::MissingClient`] if no client is supplied.
    pub fn new(client: Option<Arc<dyn KvClient>>) -> StorageResult<Self> {
        let client = client.ok_or(StorageError::MissingClient)?;
        Ok(Self {
            client,
            namespace: DEFAULT_NAMESPACE.to_string(),
            format: Format::default(),
        })
    }

    /// Sets the key namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the blob encoding.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Returns the key namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &Arc<dyn KvClient> {
        &self.client
    }

    /// Returns the full key a source is stored under.
    #[must_use]
    pub fn key_for(&self, source: &str) -> String {
        format!("{}:{}", self.namespace, source)
    }
}

impl fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("namespace", &self.namespace)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl StorageAdapter for KeyValueStore {
    fn read(&self, source: &str) -> StorageResult<Vec<Attributes>> {
        let key = self.key_for(source);
        match self.client.get(&key)? {
            Some(data) => Ok(self.format.decode(&data)?),
            None => {
                debug!(%key, "key missing, reading empty collection");
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, source: &str, collection: &[Attributes]) -> StorageResult<()> {
        let key = self.key_for(source);
        let data = self.format.encode(collection)?;
        self.client.set(&key, &data)?;
        debug!(%key, records = collection.len(), "wrote collection");
        Ok(())
    }

    fn locate(&self, source: &str) -> String {
        source.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryKv;
    use snaprecord_codec::Value;

    fn store_with(kv: &Arc<InMemoryKv>) -> KeyValueStore {
        KeyValueStore::new(Some(Arc::clone(kv) as Arc<dyn KvClient>)).unwrap()
    }

    fn record(title: &str) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("title".into(), Value::from(title));
        attrs
    }

    #[test]
    fn missing_client_fails_fast() {
        let result = KeyValueStore::new(None);
        assert!(matches!(result, Err(StorageError::MissingClient)));
    }

    #[test]
    fn keys_are_namespaced() {
        let kv = Arc::new(InMemoryKv::new());
        let store = store_with(&kv);
        assert_eq!(store.key_for("posts"), "snaprecord:posts");

        store.write("posts", &[record("A")]).unwrap();
        assert_eq!(kv.keys(), vec!["snaprecord:posts".to_string()]);

        let custom = store_with(&kv).with_namespace("blog");
        custom.write("posts", &[record("B")]).unwrap();
        assert!(kv.contains_key("blog:posts"));
    }

    #[test]
    fn read_missing_key_is_empty() {
        let kv = Arc::new(InMemoryKv::new());
        assert!(store_with(&kv).read("posts").unwrap().is_empty());
    }

    #[test]
    fn write_then_read() {
        let kv = Arc::new(InMemoryKv::new());
        let store = store_with(&kv).with_format(Format::Cbor);

        let collection = vec![record("A"), record("B")];
        store.write("posts", &collection).unwrap();
        assert_eq!(store.read("posts").unwrap(), collection);
    }

    #[test]
    fn stored_blob_is_textual_by_default() {
        let kv = Arc::new(InMemoryKv::new());
        store_with(&kv).write("posts", &[record("A")]).unwrap();

        let blob = kv.get("snaprecord:posts").unwrap().unwrap();
        let text = String::from_utf8(blob).unwrap();
        assert!(text.contains("\"title\": \"A\""));
    }
}
