//! Registry configuration.

use snaprecord_codec::Format;
use snaprecord_storage::DEFAULT_NAMESPACE;
use std::path::{Path, PathBuf};

/// Configuration shared by every record type defined through a registry.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that relative local sources are resolved against.
    ///
    /// `None` leaves sources relative to the working directory.
    pub root: Option<PathBuf>,

    /// Prefix for key-value keys (`"<namespace>:<source>"`).
    pub namespace: String,

    /// Encoding for stored collections.
    pub format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            format: Format::Json,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory for local sources.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the key-value namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the collection encoding.
    #[must_use]
    pub const fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Resolves a declared local source against the root directory.
    #[must_use]
    pub fn resolve_local(&self, source: &str) -> String {
        match &self.root {
            Some(root) if Path::new(source).is_relative() => {
                root.join(source).to_string_lossy().into_owned()
            }
            _ => source.to_string(),
        }
    }
}
