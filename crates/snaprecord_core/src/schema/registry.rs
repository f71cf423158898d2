//! Registry of declared record types.

use super::{RecordType, RecordTypeBuilder};
use crate::collection::Collection;
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Holds every record type an application declares.
///
/// Construct one at startup and share it. Each type is defined once; its
/// adapter is built at that point and reused by every later lookup.
#[derive(Debug, Default)]
pub struct Registry {
    config: Config,
    types: RwLock<HashMap<String, Arc<RecordType>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the configuration applied to builders that carry none.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Defines a record type, or returns the existing one of that name.
    ///
    /// The first definition of a name wins; later builders for the same
    /// name are dropped unbuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder fails.
    pub fn define(&self, builder: RecordTypeBuilder) -> CoreResult<Arc<RecordType>> {
        if let Some(existing) = self.types.read().get(builder.name()) {
            debug!(record_type = builder.name(), "already defined");
            return Ok(Arc::clone(existing));
        }

        let builder = if builder.has_config() {
            builder
        } else {
            builder.config(self.config.clone())
        };

        let mut types = self.types.write();
        // Another thread may have won the race since the read lock dropped.
        if let Some(existing) = types.get(builder.name()) {
            return Ok(Arc::clone(existing));
        }
        let schema = Arc::new(builder.build()?);
        types.insert(schema.name().to_string(), Arc::clone(&schema));
        debug!(record_type = schema.name(), "defined record type");
        Ok(schema)
    }

    /// Looks up a record type by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeNotFound`] if no type has that name.
    pub fn get(&self, name: &str) -> CoreResult<Arc<RecordType>> {
        self.types
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::type_not_found(name))
    }

    /// Returns true if a type with this name is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Returns the defined type names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the collection loader for a type.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeNotFound`] if no type has that name.
    pub fn collection(&self, name: &str) -> CoreResult<Collection> {
        Ok(self.get(name)?.collection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AdapterConfig;
    use snaprecord_storage::AdapterKind;
    use tempfile::tempdir;

    #[test]
    fn define_is_idempotent() {
        let dir = tempdir().unwrap();
        let registry = Registry::new(Config::new().root(dir.path()));

        let first = registry
            .define(RecordType::builder("Post").properties(["title"]))
            .unwrap();
        let second = registry
            .define(RecordType::builder("Post").properties(["body"]))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.attribute_names(), vec!["id", "title"]);
    }

    #[test]
    fn define_applies_registry_config() {
        let dir = tempdir().unwrap();
        let registry = Registry::new(Config::new().root(dir.path()));

        let schema = registry.define(RecordType::builder("Post")).unwrap();
        let expected = dir.path().join("post.json");
        assert_eq!(schema.source(), expected.to_string_lossy());
    }

    #[test]
    fn builder_config_takes_precedence() {
        let registry = Registry::new(Config::new().root("/ignored"));
        let schema = registry
            .define(RecordType::builder("Post").config(Config::new()))
            .unwrap();
        assert_eq!(schema.source(), "post.json");
    }

    #[test]
    fn failed_define_registers_nothing() {
        let registry = Registry::default();
        let result = registry.define(
            RecordType::builder("Post").adapter(AdapterConfig::KeyValue(None)),
        );
        assert!(result.is_err());
        assert!(!registry.contains("Post"));
    }

    #[test]
    fn lookup() {
        let dir = tempdir().unwrap();
        let registry = Registry::new(Config::new().root(dir.path()));
        registry.define(RecordType::builder("Post")).unwrap();
        registry.define(RecordType::builder("Author")).unwrap();

        assert_eq!(registry.names(), vec!["Author", "Post"]);
        assert_eq!(registry.get("Post").unwrap().adapter().kind(), AdapterKind::Local);
        assert!(matches!(
            registry.get("Comment"),
            Err(CoreError::TypeNotFound { .. })
        ));
        assert_eq!(registry.collection("Post").unwrap().count().unwrap(), 0);
    }
}
