//! Storage adapter trait definition.

use crate::error::StorageResult;
use crate::kv::KeyValueStore;
use crate::local::LocalStore;
use snaprecord_codec::Attributes;

/// A whole-collection storage adapter.
///
/// Adapters persist a record type's collection as one unit. There is no
/// row-level access: callers read the full collection, change it in memory,
/// and write the full collection back.
///
/// # Invariants
///
/// - `read` of a missing or empty source returns an empty sequence
/// - `write` replaces everything stored at `source`
/// - Adapters hold no per-call mutable state and are `Send + Sync`
///
/// # Implementors
///
/// - [`LocalStore`] - one file per collection
/// - [`KeyValueStore`] - one blob per collection behind a [`crate::KvClient`]
pub trait StorageAdapter: Send + Sync {
    /// Reads the full collection stored at `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read or the stored bytes
    /// do not decode.
    fn read(&self, source: &str) -> StorageResult<Vec<Attributes>>;

    /// Replaces the collection stored at `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or the medium
    /// rejects the write.
    fn write(&self, source: &str, collection: &[Attributes]) -> StorageResult<()>;

    /// Maps a declared source name to the locator this adapter reads and
    /// writes.
    fn locate(&self, source: &str) -> String;
}

/// The kind of adapter a record type is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// Local file storage.
    Local,
    /// Key-value storage.
    KeyValue,
}

/// The closed set of adapters a record type can use.
#[derive(Debug)]
pub enum Adapter {
    /// Local file storage.
    Local(LocalStore),
    /// Key-value storage.
    KeyValue(KeyValueStore),
}

impl Adapter {
    /// Returns which kind of adapter this is.
    #[must_use]
    pub fn kind(&self) -> AdapterKind {
        match self {
            Adapter::Local(_) => AdapterKind::Local,
            Adapter::KeyValue(_) => AdapterKind::KeyValue,
        }
    }

    fn inner(&self) -> &dyn StorageAdapter {
        match self {
            Adapter::Local(store) => store,
            Adapter::KeyValue(store) => store,
        }
    }
}

impl StorageAdapter for Adapter {
    fn read(&self, source: &str) -> StorageResult<Vec<Attributes>> {
        self.inner().read(source)
    }

    fn write(&self, source: &str, collection: &[Attributes]) -> StorageResult<()> {
        self.inner().write(source, collection)
    }

    fn locate(&self, source: &str) -> String {
        self.inner().locate(source)
    }
}

impl From<LocalStore> for Adapter {
    fn from(store: LocalStore) -> Self {
        Adapter::Local(store)
    }
}

impl From<KeyValueStore> for Adapter {
    fn from(store: KeyValueStore) -> Self {
        Adapter::KeyValue(store)
    }
}
