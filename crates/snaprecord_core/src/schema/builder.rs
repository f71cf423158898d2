//! Record type builder.

use super::RecordType;
use crate::config::Config;
use crate::error::CoreResult;
use crate::hooks::{HookPoint, Hooks};
use crate::record::{Record, ID};
use snaprecord_storage::{Adapter, KeyValueStore, KvClient, LocalStore, StorageAdapter};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Which adapter a record type stores its collection through.
#[derive(Clone, Default)]
pub enum AdapterConfig {
    /// One file per collection under the configured root.
    #[default]
    Local,
    /// One blob per collection in a key-value store.
    ///
    /// `None` means no client was supplied; building fails.
    KeyValue(Option<Arc<dyn KvClient>>),
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterConfig::Local => f.write_str("Local"),
            AdapterConfig::KeyValue(client) => f
                .debug_tuple("KeyValue")
                .field(&client.as_ref().map(|_| "<client>"))
                .finish(),
        }
    }
}

/// Builder for [`RecordType`].
///
/// # Example
///
/// ```rust
/// use snaprecord_core::{Config, RecordType};
///
/// let dir = tempfile::tempdir().unwrap();
/// let posts = RecordType::builder("Post")
///     .properties(["title", "body"])
///     .source("posts")
///     .config(Config::new().root(dir.path()))
///     .build()
///     .unwrap();
///
/// assert_eq!(posts.attribute_names(), vec!["id", "title", "body"]);
/// ```
pub struct RecordTypeBuilder {
    name: String,
    source: Option<String>,
    properties: Vec<String>,
    adapter: Option<AdapterConfig>,
    hooks: Hooks,
    config: Option<Config>,
}

impl RecordTypeBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            properties: vec![ID.to_string()],
            adapter: None,
            hooks: Hooks::with_defaults(),
            config: None,
        }
    }

    /// Returns the name of the type being declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares properties.
    ///
    /// `id` is always declared. Repeated names keep their first position.
    #[must_use]
    pub fn properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.property(name);
        }
        self
    }

    /// Declares one property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.properties.contains(&name) {
            self.properties.push(name);
        }
        self
    }

    /// Sets the storage source.
    ///
    /// Defaults to the lowercased type name.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Selects the adapter. Only the first selection counts.
    #[must_use]
    pub fn adapter(mut self, adapter: AdapterConfig) -> Self {
        if self.adapter.is_some() {
            debug!(record_type = %self.name, ?adapter, "adapter already selected, ignoring");
        } else {
            self.adapter = Some(adapter);
        }
        self
    }

    /// Selects key-value storage through `client`.
    #[must_use]
    pub fn key_value(self, client: Arc<dyn KvClient>) -> Self {
        self.adapter(AdapterConfig::KeyValue(Some(client)))
    }

    /// Registers a hook after the default ones.
    #[must_use]
    pub fn hook<F>(mut self, point: HookPoint, hook: F) -> Self
    where
        F: Fn(&mut Record) -> CoreResult<()> + Send + Sync + 'static,
    {
        self.hooks.register(point, hook);
        self
    }

    /// Sets the configuration used to resolve sources.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub(crate) fn has_config(&self) -> bool {
        self.config.is_some()
    }

    /// Builds the record type and its adapter.
    ///
    /// # Errors
    ///
    /// Returns [`snaprecord_storage::StorageError::MissingClient`] (wrapped)
    /// if key-value storage was selected without a client.
    pub fn build(self) -> CoreResult<RecordType> {
        let config = self.config.unwrap_or_default();
        let declared = self
            .source
            .unwrap_or_else(|| self.name.to_lowercase());

        let (adapter, source) = match self.adapter.unwrap_or_default() {
            AdapterConfig::Local => {
                let store = LocalStore::new(config.format);
                let source = store.locate(&config.resolve_local(&declared));
                (Adapter::from(store), source)
            }
            AdapterConfig::KeyValue(client) => {
                let store = KeyValueStore::new(client)?
                    .with_namespace(config.namespace.clone())
                    .with_format(config.format);
                let source = store.locate(&declared);
                (Adapter::from(store), source)
            }
        };

        debug!(
            record_type = %self.name,
            %source,
            kind = ?adapter.kind(),
            properties = self.properties.len(),
            "built record type"
        );

        Ok(RecordType {
            name: self.name,
            source,
            properties: self.properties,
            adapter,
            hooks: self.hooks,
        })
    }
}

impl fmt::Debug for RecordTypeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordTypeBuilder")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("properties", &self.properties)
            .field("adapter", &self.adapter)
            .field("hooks", &self.hooks)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use snaprecord_codec::Format;
    use snaprecord_storage::{AdapterKind, InMemoryKv, StorageError};

    #[test]
    fn properties_union_keeps_order() {
        let schema = RecordType::builder("Post")
            .properties(["title", "id", "body"])
            .properties(["title", "tags"])
            .build()
            .unwrap();

        assert_eq!(schema.attribute_names(), vec!["id", "title", "body", "tags"]);
    }

    #[test]
    fn source_defaults_to_lowercased_name() {
        let schema = RecordType::builder("BlogPost").build().unwrap();
        assert_eq!(schema.source(), "blogpost.json");
    }

    #[test]
    fn local_source_uses_root_and_format() {
        let config = Config::new().root("data").format(Format::Cbor);
        let schema = RecordType::builder("Post")
            .source("posts")
            .config(config)
            .build()
            .unwrap();

        let expected = format!("{}.cbor", std::path::Path::new("data").join("posts").display());
        assert_eq!(schema.source(), expected);
        assert_eq!(schema.adapter().kind(), AdapterKind::Local);
    }

    #[test]
    fn key_value_without_client_fails() {
        let result = RecordType::builder("Post")
            .adapter(AdapterConfig::KeyValue(None))
            .build();

        assert!(matches!(
            result,
            Err(CoreError::Storage(StorageError::MissingClient))
        ));
    }

    #[test]
    fn first_adapter_selection_wins() {
        let schema = RecordType::builder("Post")
            .key_value(Arc::new(InMemoryKv::new()))
            .adapter(AdapterConfig::Local)
            .build()
            .unwrap();

        assert_eq!(schema.adapter().kind(), AdapterKind::KeyValue);
    }

    #[test]
    fn custom_hooks_follow_defaults() {
        let schema = RecordType::builder("Post")
            .hook(HookPoint::BeforeCreate, |_: &mut Record| Ok(()))
            .hook(HookPoint::AfterSave, |_: &mut Record| Ok(()))
            .build()
            .unwrap();

        assert_eq!(schema.hooks().len(HookPoint::BeforeCreate), 2);
        assert_eq!(schema.hooks().len(HookPoint::AfterSave), 1);
    }
}
