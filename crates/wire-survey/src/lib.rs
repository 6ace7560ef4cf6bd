// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only surveys over wire geometry.
//!
//! Nothing here mutates a [`wire_schema::Store`]. The crate offers:
//! - [`bounding_box`] over anything with two end points ([`Endpoints`]).
//! - [`summarize`]: the per-plane wire/channel report.
//! - Store-level boxes ([`plane_bounding_box`], [`face_bounding_box`],
//!   [`anode_bounding_box`]) and [`wire_pitch`].

use thiserror::Error;
use wire_geom::{GeomError, Point3D};

mod bbox;
mod report;
mod store;

pub use bbox::{bounding_box, Endpoints};
pub use report::{rows_from_store, summarize, PlaneSummary, WireRow};
pub use store::{anode_bounding_box, face_bounding_box, plane_bounding_box, wire_pitch};

/// Errors raised by survey computations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SurveyError {
    /// The wire collection was empty.
    #[error("empty wire collection")]
    EmptyInput,
    /// A direction could not be normalized.
    #[error(transparent)]
    Geom(#[from] GeomError),
}

/// Lifts a schema point into the vector type.
pub fn to_point3(p: wire_schema::Point) -> Point3D {
    Point3D::new(p.x, p.y, p.z)
}
