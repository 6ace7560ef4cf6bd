// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::{Anode, Face, Plane, Point, SchemaError, Store, Wire};

/// Growth-phase accumulator for a [`Store`].
///
/// Loaders append records here, using the returned indices as references,
/// then call [`StoreBuilder::build`] to validate and freeze the result.
/// Appends take `&mut self`; sharing one builder across threads needs an
/// outer lock.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    anodes: Vec<Anode>,
    faces: Vec<Face>,
    planes: Vec<Plane>,
    wires: Vec<Wire>,
    points: Vec<Point>,
}

fn push<T>(collection: &mut Vec<T>, value: T) -> usize {
    collection.push(value);
    collection.len() - 1
}

impl StoreBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and returns its index.
    pub fn add_point(&mut self, point: Point) -> usize {
        push(&mut self.points, point)
    }

    /// Appends a wire and returns its index.
    pub fn add_wire(&mut self, wire: Wire) -> usize {
        push(&mut self.wires, wire)
    }

    /// Appends a plane and returns its index.
    pub fn add_plane(&mut self, plane: Plane) -> usize {
        push(&mut self.planes, plane)
    }

    /// Appends a face and returns its index.
    pub fn add_face(&mut self, face: Face) -> usize {
        push(&mut self.faces, face)
    }

    /// Appends an anode and returns its index.
    pub fn add_anode(&mut self, anode: Anode) -> usize {
        push(&mut self.anodes, anode)
    }

    /// Point previously added at `index`.
    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Wire previously added at `index`.
    pub fn wire(&self, index: usize) -> Option<&Wire> {
        self.wires.get(index)
    }

    /// Number of wires added so far.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Validates every reference and freezes the records into a [`Store`].
    pub fn build(self) -> Result<Store, SchemaError> {
        Store::new(self.anodes, self.faces, self.planes, self.wires, self.points)
    }
}
