// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Schema record types.
//!
//! Each record is a plain struct whose constructor takes exactly the declared
//! fields in declaration order.

/// A point in the coordinate system of one anode face.
///
/// X points against the electron drift, Y against gravity, Z is X cross Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Measure along X (mm).
    pub x: f64,
    /// Measure along Y (mm).
    pub y: f64,
    /// Measure along Z (mm).
    pub z: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Midpoint of `self` and `other`.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            0.5 * (self.x + other.x),
            0.5 * (self.y + other.y),
            0.5 * (self.z + other.z),
        )
    }
}

/// One physical wire segment, pointing toward the electronics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wire {
    /// Identifier unique to this wire in the anode plane.
    pub ident: i64,
    /// Identifier of the conductor (electronics channel) this wire feeds.
    pub channel: i64,
    /// Number of wire segments between this one and the channel input.
    pub segment: i64,
    /// Index of the tail end point in [`crate::Store::points`].
    pub tail: usize,
    /// Index of the head (electronics-ward) end point.
    pub head: usize,
}

impl Wire {
    /// Creates a wire.
    pub const fn new(ident: i64, channel: i64, segment: i64, tail: usize, head: usize) -> Self {
        Self {
            ident,
            channel,
            segment,
            tail,
            head,
        }
    }
}

/// The wires making up one readout plane.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Plane {
    /// Identifier unique to this plane.
    pub ident: i64,
    /// Wire indices, ascending by wire midpoint Z.
    pub wires: Vec<usize>,
}

impl Plane {
    /// Creates a plane.
    pub const fn new(ident: i64, wires: Vec<usize>) -> Self {
        Self { ident, wires }
    }
}

/// The planes on one side of an anode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    /// Identifier unique to this face.
    pub ident: i64,
    /// Plane indices in the order drifting electrons pass them.
    pub planes: Vec<usize>,
}

impl Face {
    /// Creates a face.
    pub const fn new(ident: i64, planes: Vec<usize>) -> Self {
        Self { ident, planes }
    }
}

/// An anode and its faces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Anode {
    /// Identifier unique to this anode.
    pub ident: i64,
    /// Face indices; the first is the "front" face.
    pub faces: Vec<usize>,
}

impl Anode {
    /// Creates an anode.
    pub const fn new(ident: i64, faces: Vec<usize>) -> Self {
        Self { ident, faces }
    }
}
