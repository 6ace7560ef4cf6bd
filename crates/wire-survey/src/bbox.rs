// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use wire_geom::{Point3D, Ray3D};

use crate::SurveyError;

/// Anything with a tail and a head in 3-space.
pub trait Endpoints {
    /// Tail end point.
    fn tail(&self) -> Point3D;
    /// Head end point.
    fn head(&self) -> Point3D;
}

impl Endpoints for Ray3D {
    fn tail(&self) -> Point3D {
        Self::tail(self)
    }

    fn head(&self) -> Point3D {
        Self::head(self)
    }
}

impl<T: Endpoints + ?Sized> Endpoints for &T {
    fn tail(&self) -> Point3D {
        (**self).tail()
    }

    fn head(&self) -> Point3D {
        (**self).head()
    }
}

/// Axis-aligned box around every tail and head, as `Ray3D(min, max)`.
pub fn bounding_box<I>(wires: I) -> Result<Ray3D, SurveyError>
where
    I: IntoIterator,
    I::Item: Endpoints,
{
    let mut iter = wires.into_iter();
    let first = iter.next().ok_or(SurveyError::EmptyInput)?;
    let mut lo = first.tail().to_array();
    let mut hi = lo;
    let mut grow = |p: Point3D| {
        for (axis, v) in p.iter().enumerate() {
            lo[axis] = lo[axis].min(v);
            hi[axis] = hi[axis].max(v);
        }
    };
    grow(first.head());
    for wire in iter {
        grow(wire.tail());
        grow(wire.head());
    }
    Ok(Ray3D::new(Point3D::from_array(lo), Point3D::from_array(hi)))
}
