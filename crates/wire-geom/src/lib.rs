// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for wire descriptions.

This crate provides:
- Fixed-dimension Cartesian points/vectors (`PointN`, `Point2D`, `Point3D`).
- Rays between two points (`Ray`, `Ray2D`, `Ray3D`).
- Axis-aligned 2D rectangles with containment and edge intersection
  (`Rectangle2D`).

Design notes:
- `f64` throughout; coordinates are millimeters when they describe wires.
- Dimensionality is a const generic, so mixing 2D and 3D operands does not
  type-check. Runtime slices convert through `TryFrom` and report
  `GeomError::TypeMismatch`.
- Division is checked: an exactly-zero divisor yields
  `GeomError::DivideByZero` instead of producing infinities.
"]

mod error;
/// N-dimensional points and vectors.
pub mod point;
/// Rays (ordered tail/head pairs).
pub mod ray;
/// Axis-aligned rectangles.
pub mod rect;

pub use error::GeomError;
pub use point::{Point2D, Point3D, PointN};
pub use ray::{Ray, Ray2D, Ray3D};
pub use rect::Rectangle2D;
