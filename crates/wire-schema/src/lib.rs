// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wire geometry schema.
//!
//! This crate defines the closed set of records describing detector wire
//! geometry and the [`Store`] that owns them. It contains NO serialization
//! logic; the tagged document codec lives in `wire-codec`.
//!
//! # Model
//!
//! - End points are expressed in the Cartesian frame of the anode face that
//!   holds the wire. Distances are millimeters.
//! - A wire points from tail to head in the direction signals travel toward
//!   the electronics.
//! - Records reference each other by index into the owning [`Store`]'s
//!   per-type sequence, never by pointer.
//! - `ident` values are opaque and passed through unchanged.
//!
//! Records are built once through a [`StoreBuilder`] (or decoded by the
//! codec) and frozen into an immutable [`Store`].

use thiserror::Error;

mod builder;
/// Reader for line-oriented "celltree" wire dumps.
pub mod celltree;
mod entity;
mod registry;
mod store;

pub use builder::StoreBuilder;
pub use entity::{Anode, Face, Plane, Point, Wire};
pub use registry::{Entity, EntityKind, Record};
pub use store::Store;

/// Errors raised while building, validating, or reading schema records.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A record references an index outside the referenced sequence.
    #[error("{kind}.{field} references index {index} but only {len} entries exist")]
    DanglingIndex {
        /// Type of the record holding the reference.
        kind: EntityKind,
        /// Name of the referencing field.
        field: &'static str,
        /// Offending index.
        index: usize,
        /// Length of the referenced sequence.
        len: usize,
    },
    /// A geometry dump line could not be interpreted.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },
    /// The geometry dump could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
