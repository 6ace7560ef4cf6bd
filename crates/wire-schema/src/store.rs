// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::{Anode, EntityKind, Face, Plane, Point, SchemaError, Wire};

/// Root aggregate owning every record of a wire geometry.
///
/// Invariants:
/// - Every index held by a record is valid in the referenced sequence.
///   [`Store::new`] refuses to build a store otherwise.
/// - Sequences are read-only after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    anodes: Vec<Anode>,
    faces: Vec<Face>,
    planes: Vec<Plane>,
    wires: Vec<Wire>,
    points: Vec<Point>,
}

impl Store {
    /// Builds a store after checking every cross reference.
    pub fn new(
        anodes: Vec<Anode>,
        faces: Vec<Face>,
        planes: Vec<Plane>,
        wires: Vec<Wire>,
        points: Vec<Point>,
    ) -> Result<Self, SchemaError> {
        for anode in &anodes {
            check_refs(EntityKind::Anode, "faces", &anode.faces, faces.len())?;
        }
        for face in &faces {
            check_refs(EntityKind::Face, "planes", &face.planes, planes.len())?;
        }
        for plane in &planes {
            check_refs(EntityKind::Plane, "wires", &plane.wires, wires.len())?;
        }
        for wire in &wires {
            check_refs(EntityKind::Wire, "tail", &[wire.tail], points.len())?;
            check_refs(EntityKind::Wire, "head", &[wire.head], points.len())?;
        }
        Ok(Self {
            anodes,
            faces,
            planes,
            wires,
            points,
        })
    }

    /// All anodes.
    pub fn anodes(&self) -> &[Anode] {
        &self.anodes
    }

    /// All faces.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// All planes.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// All wires.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// All points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// First anode carrying `ident`.
    pub fn anode(&self, ident: i64) -> Option<&Anode> {
        self.anodes.iter().find(|a| a.ident == ident)
    }

    /// Faces referenced by `anode`, front first.
    pub fn faces_of<'a>(&'a self, anode: &'a Anode) -> impl Iterator<Item = &'a Face> + 'a {
        anode.faces.iter().filter_map(|&i| self.faces.get(i))
    }

    /// Planes referenced by `face`, in drift order.
    pub fn planes_of<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = &'a Plane> + 'a {
        face.planes.iter().filter_map(|&i| self.planes.get(i))
    }

    /// Wires referenced by `plane`, ascending in Z.
    pub fn wires_of<'a>(&'a self, plane: &'a Plane) -> impl Iterator<Item = &'a Wire> + 'a {
        plane.wires.iter().filter_map(|&i| self.wires.get(i))
    }

    /// Resolved `(tail, head)` points of `wire`.
    ///
    /// Returns `None` only for a wire that does not belong to this store.
    pub fn endpoints(&self, wire: &Wire) -> Option<(Point, Point)> {
        Some((*self.points.get(wire.tail)?, *self.points.get(wire.head)?))
    }

    /// Channel of every wire in `plane`, in plane order.
    pub fn channels(&self, plane: &Plane) -> Vec<i64> {
        self.wires_of(plane).map(|w| w.channel).collect()
    }
}

fn check_refs(
    kind: EntityKind,
    field: &'static str,
    indices: &[usize],
    len: usize,
) -> Result<(), SchemaError> {
    match indices.iter().find(|&&index| index >= len) {
        Some(&index) => Err(SchemaError::DanglingIndex {
            kind,
            field,
            index,
            len,
        }),
        None => Ok(()),
    }
}
