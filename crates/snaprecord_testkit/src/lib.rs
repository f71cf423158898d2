//! # snaprecord testkit
//!
//! Test utilities for snaprecord.
//!
//! This crate provides:
//! - Throwaway file and key-value stores
//! - Property-based test generators using proptest
//! - A cross-crate integration harness
//!
//! ## Usage
//!
//! ```rust
//! use snaprecord_testkit::prelude::*;
//!
//! with_kv_store(|store| {
//!     let posts = store.define("Post", &["title"]);
//!     let mut harness = IntegrationHarness::new(posts);
//!     harness.verify_all();
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
