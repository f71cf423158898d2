//! Whole-collection encoding.
//!
//! A stored collection is a sequence of attribute maps, one per record,
//! encoded in one piece. There is no framing and no partial form: a
//! collection is always encoded and decoded as a whole.

use crate::error::{CodecError, CodecResult};
use crate::value::Attributes;
use std::fmt;
use std::str::FromStr;

/// The encoding used for a stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Pretty-printed JSON. Human-readable and diff-friendly.
    #[default]
    Json,
    /// CBOR. Compact binary, suited to key-value blobs.
    Cbor,
}

impl Format {
    /// File extension used for local sources in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Cbor => "cbor",
        }
    }

    /// Encodes a full collection.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncodingFailed`] if a value cannot be represented.
    pub fn encode(self, collection: &[Attributes]) -> CodecResult<Vec<u8>> {
        match self {
            Format::Json => {
                let mut bytes = serde_json::to_vec_pretty(collection)
                    .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            Format::Cbor => {
                let mut bytes = Vec::new();
                ciborium::into_writer(collection, &mut bytes)
                    .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
                Ok(bytes)
            }
        }
    }

    /// Decodes a full collection.
    ///
    /// Empty input and an encoded `null` both decode to an empty collection,
    /// so a cleared source reads the same as a missing one.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DecodingFailed`] if the bytes are not a
    /// sequence of attribute maps.
    pub fn decode(self, bytes: &[u8]) -> CodecResult<Vec<Attributes>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let decoded: Option<Vec<Attributes>> = match self {
            Format::Json => serde_json::from_slice(bytes)
                .map_err(|e| CodecError::decoding_failed(e.to_string()))?,
            Format::Cbor => ciborium::from_reader(bytes)
                .map_err(|e| CodecError::decoding_failed(e.to_string()))?,
        };

        Ok(decoded.unwrap_or_default())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "cbor" => Ok(Format::Cbor),
            other => Err(CodecError::decoding_failed(format!(
                "unknown format: {other}"
            ))),
        }
    }
}

/// Encodes a full collection with the given format.
///
/// # Errors
///
/// See [`Format::encode`].
pub fn encode_collection(format: Format, collection: &[Attributes]) -> CodecResult<Vec<u8>> {
    format.encode(collection)
}

/// Decodes a full collection with the given format.
///
/// # Errors
///
/// See [`Format::decode`].
pub fn decode_collection(format: Format, bytes: &[u8]) -> CodecResult<Vec<Attributes>> {
    format.decode(bytes)
}
