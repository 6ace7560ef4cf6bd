// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use tracing::instrument;
use wire_geom::{Point3D, Ray3D};
use wire_schema::{Anode, Face, Plane, Store, Wire};

use crate::{bounding_box, to_point3, SurveyError};

fn wire_ray(store: &Store, wire: &Wire) -> Option<Ray3D> {
    let (tail, head) = store.endpoints(wire)?;
    Some(Ray3D::new(to_point3(tail), to_point3(head)))
}

fn plane_rays<'a>(store: &'a Store, plane: &'a Plane) -> impl Iterator<Item = Ray3D> + 'a {
    store.wires_of(plane).filter_map(move |w| wire_ray(store, w))
}

/// Box around every wire of `plane`.
pub fn plane_bounding_box(store: &Store, plane: &Plane) -> Result<Ray3D, SurveyError> {
    bounding_box(plane_rays(store, plane))
}

/// Box around every wire of every plane of `face`.
pub fn face_bounding_box(store: &Store, face: &Face) -> Result<Ray3D, SurveyError> {
    bounding_box(store.planes_of(face).flat_map(|p| plane_rays(store, p)))
}

/// Box around every wire under `anode`.
pub fn anode_bounding_box(store: &Store, anode: &Anode) -> Result<Ray3D, SurveyError> {
    bounding_box(
        store
            .faces_of(anode)
            .flat_map(|f| store.planes_of(f))
            .flat_map(|p| plane_rays(store, p)),
    )
}

/// Wire and pitch directions of `plane` as `Ray3D(wire_dir, pitch_dir)`.
///
/// The wire direction is the normalized sum of all wire vectors. The pitch
/// direction is the component of the first-to-last wire-center offset that
/// is perpendicular to the wire direction, normalized.
#[instrument(skip_all, fields(plane = plane.ident))]
pub fn wire_pitch(store: &Store, plane: &Plane) -> Result<Ray3D, SurveyError> {
    let rays: Vec<Ray3D> = plane_rays(store, plane).collect();
    let (Some(first), Some(last)) = (rays.first(), rays.last()) else {
        return Err(SurveyError::EmptyInput);
    };
    let total = rays
        .iter()
        .fold(Point3D::ZERO, |acc, ray| acc.add(&ray.vector()));
    let wire_dir = total.unit()?;
    let center = |r: &Ray3D| r.tail().add(&r.head()).scale(0.5);
    let offset = center(last).sub(&center(first));
    let pitch_dir = wire_dir.cross(&offset).cross(&wire_dir).unit()?;
    Ok(Ray3D::new(wire_dir, pitch_dir))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use wire_geom::GeomError;
    use wire_schema::{Point, StoreBuilder};

    /// Two planes; U wires run along +y at z = 0, 5, 10, V holds one
    /// slanted wire.
    fn two_plane_store() -> Store {
        let mut b = StoreBuilder::new();
        let mut u = Vec::new();
        for (i, z) in [0.0, 5.0, 10.0].into_iter().enumerate() {
            let t = b.add_point(Point::new(0.0, 0.0, z));
            let h = b.add_point(Point::new(0.0, 100.0, z));
            u.push(b.add_wire(Wire::new(i64::try_from(i).unwrap(), 0, 0, t, h)));
        }
        let t = b.add_point(Point::new(-3.0, 10.0, 2.0));
        let h = b.add_point(Point::new(-3.0, 20.0, 12.0));
        let v = vec![b.add_wire(Wire::new(9, 9, 0, t, h))];
        let pu = b.add_plane(Plane::new(0, u));
        let pv = b.add_plane(Plane::new(1, v));
        let pe = b.add_plane(Plane::new(2, Vec::new()));
        let f = b.add_face(Face::new(0, vec![pu, pv, pe]));
        b.add_anode(Anode::new(0, vec![f]));
        b.build().unwrap()
    }

    #[test]
    fn boxes_nest() {
        let store = two_plane_store();
        let u = plane_bounding_box(&store, &store.planes()[0]).unwrap();
        assert_eq!(u.tail(), Point3D::new(0.0, 0.0, 0.0));
        assert_eq!(u.head(), Point3D::new(0.0, 100.0, 10.0));

        let face = face_bounding_box(&store, &store.faces()[0]).unwrap();
        assert_eq!(face.tail(), Point3D::new(-3.0, 0.0, 0.0));
        assert_eq!(face.head(), Point3D::new(0.0, 100.0, 12.0));

        let anode = anode_bounding_box(&store, &store.anodes()[0]).unwrap();
        assert_eq!(anode, face);
    }

    #[test]
    fn empty_plane_has_no_box() {
        let store = two_plane_store();
        assert_eq!(
            plane_bounding_box(&store, &store.planes()[2]),
            Err(SurveyError::EmptyInput)
        );
        assert_eq!(
            wire_pitch(&store, &store.planes()[2]),
            Err(SurveyError::EmptyInput)
        );
    }

    #[test]
    fn pitch_is_perpendicular_to_wires() {
        let store = two_plane_store();
        let pitch = wire_pitch(&store, &store.planes()[0]).unwrap();
        assert_eq!(pitch.tail(), Point3D::new(0.0, 1.0, 0.0));
        assert_eq!(pitch.head(), Point3D::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn single_wire_plane_has_no_pitch() {
        let store = two_plane_store();
        assert_eq!(
            wire_pitch(&store, &store.planes()[1]),
            Err(SurveyError::Geom(GeomError::DivideByZero))
        );
    }
}
