// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tagged document codec for wire-schema records.
//!
//! This crate provides:
//! - A closed value model ([`Value`]) covering registered records, ordered
//!   sequences, numeric N-D arrays, and scalar leaves.
//! - [`serialize`]/[`deserialize`] between values and self-describing JSON
//!   documents (`{"Wire": {...}}`, `{"array": {"shape", "elements"}}`).
//! - File persistence ([`dump`]/[`load`]) with the compression picked by
//!   the file suffix: `.json`, `.json.bz2`, or `.json.gz`.
//!
//! # Design
//!
//! Serialization is deliberately separated from the schema crate, which
//! stays free of any encoding concerns. Tag dispatch is an exhaustive match
//! over `wire_schema::EntityKind`; nothing is looked up by runtime type name.

use std::path::PathBuf;

use thiserror::Error;
use wire_schema::SchemaError;

/// Codec configuration and its loader.
pub mod config;
mod persist;
mod serial;
mod value;

pub use config::{CodecConfig, ConfigError};
pub use persist::{
    dump, dump_store, dump_store_with, dump_with, dumps, load, load_store, loads, Format,
};
pub use serial::{
    deserialize, from_value, serialize, serialize_entity, serialize_store, to_value, Document,
    ARRAY_TAG,
};
pub use value::Value;

/// Errors raised while encoding, decoding, or persisting documents.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file suffix selects none of the supported encodings.
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// A document is untagged, mistagged, or has missing, extra, or
    /// mistyped fields.
    #[error("schema violation: {0}")]
    SchemaViolation(String),
    /// A decoded store failed reference validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The document text is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Reading, writing, or (de)compressing failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn violation(message: impl Into<String>) -> CodecError {
    CodecError::SchemaViolation(message.into())
}
