//! # snaprecord codec
//!
//! Attribute values and whole-collection encoding for snaprecord.
//!
//! A record is stored as a flat map of attribute names to [`Value`]s, and a
//! record type's collection is stored as one encoded sequence of such maps.
//! This crate owns that representation and nothing else: it does not know
//! where bytes live or what a record's schema is.
//!
//! ## Formats
//!
//! - [`Format::Json`] - pretty-printed, sorted keys, one file per collection
//! - [`Format::Cbor`] - compact binary for key-value blobs
//!
//! ## Usage
//!
//! ```
//! use snaprecord_codec::{Attributes, Format, Value};
//!
//! let mut post = Attributes::new();
//! post.insert("title".into(), Value::from("Hello"));
//!
//! let bytes = Format::Json.encode(&[post.clone()]).unwrap();
//! let decoded = Format::Json.decode(&bytes).unwrap();
//! assert_eq!(decoded, vec![post]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod format;
mod value;

pub use error::{CodecError, CodecResult};
pub use format::{decode_collection, encode_collection, Format};
pub use value::{Attributes, Value};
