//! # snaprecord core
//!
//! Record lifecycle and whole-collection persistence for snaprecord.
//!
//! This crate provides:
//! - Record types declared once with a fixed property list ([`RecordType`])
//! - Records with dynamic attributes and id assignment ([`Record`])
//! - Save, update, destroy and reload over whole-collection snapshots
//! - Collection loading and linear queries ([`Collection`])
//! - Ordered lifecycle hooks ([`Hooks`])
//! - A registry that owns every declared type ([`Registry`])
//!
//! ## Persistence model
//!
//! Storage only supports "read whole collection" and "write whole
//! collection". Every save and destroy loads the full collection, changes
//! one element in memory and writes the full collection back, so sibling
//! records are never dropped. Concurrent writers are not serialized: the
//! last write wins. Use one writer at a time.
//!
//! ## Example
//!
//! ```rust
//! use snaprecord_core::{Config, RecordType, Registry};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let registry = Registry::new(Config::new().root(dir.path()));
//! let posts = registry
//!     .define(RecordType::builder("Post").properties(["title", "body"]))
//!     .unwrap();
//!
//! let mut post = posts
//!     .collection()
//!     .create([("title", "Hello"), ("body", "World")])
//!     .unwrap()
//!     .unwrap();
//! assert!(post.id().is_some());
//!
//! assert!(post.update_attributes([("title", "Hi")]).unwrap());
//! assert!(post.destroy().unwrap());
//! assert_eq!(posts.collection().count().unwrap(), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod error;
mod hooks;
mod record;
mod schema;

pub use collection::{Collection, Limited};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use hooks::{assign_id, Hook, HookPoint, Hooks};
pub use record::{Record, RecordId, ID, PERSISTED};
pub use schema::{AdapterConfig, RecordType, RecordTypeBuilder, Registry};

pub use snaprecord_codec::{Attributes, Format, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
