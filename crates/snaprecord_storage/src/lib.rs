//! # snaprecord storage
//!
//! Whole-collection storage adapters for snaprecord.
//!
//! This crate provides the lowest-level persistence abstraction. An adapter
//! reads and writes a record type's **entire collection** in one call; it
//! has no notion of individual records, ids or schemas.
//!
//! ## Design Principles
//!
//! - Adapters read whole collections and replace whole collections
//! - A missing source reads as an empty collection, never an error
//! - No locking: concurrent read-modify-write cycles race (last write wins)
//! - Must be `Send + Sync` so one adapter can be shared per record type
//!
//! ## Available Adapters
//!
//! - [`LocalStore`] - one encoded file per collection
//! - [`KeyValueStore`] - one encoded blob per collection behind a [`KvClient`]
//!
//! ## Example
//!
//! ```rust
//! use snaprecord_codec::{Attributes, Value};
//! use snaprecord_storage::{InMemoryKv, KeyValueStore, KvClient, StorageAdapter};
//! use std::sync::Arc;
//!
//! let client: Arc<dyn KvClient> = Arc::new(InMemoryKv::new());
//! let store = KeyValueStore::new(Some(client)).unwrap();
//!
//! let mut post = Attributes::new();
//! post.insert("title".into(), Value::from("Hello"));
//! store.write("posts", &[post]).unwrap();
//! assert_eq!(store.read("posts").unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod error;
mod kv;
mod local;
mod memory;

pub use adapter::{Adapter, AdapterKind, StorageAdapter};
pub use error::{StorageError, StorageResult};
pub use kv::{KeyValueStore, KvClient, DEFAULT_NAMESPACE};
pub use local::LocalStore;
pub use memory::InMemoryKv;
