//! Record type declarations.
//!
//! A [`RecordType`] is everything the records of one type share: declared
//! properties, storage source, adapter and hooks. It is built once by a
//! [`RecordTypeBuilder`] and then shared by reference (`Arc`) with every
//! record and collection of that type. Nothing on it changes after build.

mod builder;
mod registry;

pub use builder::{AdapterConfig, RecordTypeBuilder};
pub use registry::Registry;

use crate::collection::Collection;
use crate::error::CoreResult;
use crate::hooks::Hooks;
use snaprecord_codec::Attributes;
use snaprecord_storage::{Adapter, StorageAdapter, StorageResult};
use std::fmt;
use std::sync::Arc;

/// A declared record type.
pub struct RecordType {
    name: String,
    source: String,
    properties: Vec<String>,
    adapter: Adapter,
    hooks: Hooks,
}

impl RecordType {
    /// Starts declaring a record type called `name`.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder::new(name)
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resolved locator the adapter reads and writes.
    ///
    /// For local storage this is a file path with extension; for key-value
    /// storage it is the declared source (the namespace is added by the
    /// adapter).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the declared properties, `id` first.
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Returns the declared property names.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.properties.iter().map(String::as_str).collect()
    }

    /// Returns true if `name` is a declared property.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p == name)
    }

    /// Returns the storage adapter bound to this type.
    #[must_use]
    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Returns the lifecycle hooks.
    #[must_use]
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Reads the raw stored collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot read or decode the source.
    pub fn read_contents(&self) -> CoreResult<Vec<Attributes>> {
        Ok(self.adapter.read(&self.source)?)
    }

    /// Replaces the stored collection with `raw`.
    ///
    /// Bypasses records and hooks entirely.
    ///
    /// # Errors
    ///
    /// Returns the adapter error unchanged so callers can tell I/O failures
    /// apart.
    pub fn write_contents(&self, raw: &[Attributes]) -> StorageResult<()> {
        self.adapter.write(&self.source, raw)
    }

    /// Returns the collection loader for this type.
    #[must_use]
    pub fn collection(self: &Arc<Self>) -> Collection {
        Collection::new(Arc::clone(self))
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("properties", &self.properties)
            .field("adapter", &self.adapter.kind())
            .field("hooks", &self.hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaprecord_codec::Value;
    use snaprecord_storage::{AdapterKind, InMemoryKv};
    use tempfile::tempdir;

    #[test]
    fn write_then_read_contents() {
        let dir = tempdir().unwrap();
        let schema = RecordType::builder("Post")
            .properties(["title"])
            .config(crate::Config::new().root(dir.path()))
            .build()
            .unwrap();

        let mut raw = Attributes::new();
        raw.insert("id".into(), Value::from("1"));
        raw.insert("title".into(), Value::from("A"));
        schema.write_contents(&[raw.clone()]).unwrap();

        assert_eq!(schema.read_contents().unwrap(), vec![raw]);
        assert!(schema.source().ends_with("post.json"));
    }

    #[test]
    fn declared_names() {
        let schema = RecordType::builder("Post")
            .properties(["title", "body"])
            .key_value(Arc::new(InMemoryKv::new()))
            .build()
            .unwrap();

        assert_eq!(schema.attribute_names(), vec!["id", "title", "body"]);
        assert!(schema.has_property("body"));
        assert!(!schema.has_property("scratch"));
        assert_eq!(schema.adapter().kind(), AdapterKind::KeyValue);
        assert_eq!(schema.source(), "post");
    }
}
