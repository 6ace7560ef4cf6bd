// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::{GeomError, PointN};

/// Ordered pair of points of equal dimensionality, read as `tail -> head`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray<const N: usize> {
    tail: PointN<N>,
    head: PointN<N>,
}

/// Ray in the plane.
pub type Ray2D = Ray<2>;

/// Ray in 3-space. Also used as a `(min, max)` pair for bounding boxes.
pub type Ray3D = Ray<3>;

impl<const N: usize> Ray<N> {
    /// Creates a ray from `tail` to `head`.
    pub const fn new(tail: PointN<N>, head: PointN<N>) -> Self {
        Self { tail, head }
    }

    /// Starting point.
    pub fn tail(&self) -> PointN<N> {
        self.tail
    }

    /// Ending point.
    pub fn head(&self) -> PointN<N> {
        self.head
    }

    /// Displacement `head - tail`.
    pub fn vector(&self) -> PointN<N> {
        self.head.sub(&self.tail)
    }

    /// Unit displacement; fails when `tail == head`.
    pub fn unit(&self) -> Result<PointN<N>, GeomError> {
        self.vector().unit()
    }
}

impl<const N: usize> fmt::Display for Ray<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.tail, self.head)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::Point3D;

    #[test]
    fn vector_and_unit() {
        let r = Ray3D::new(Point3D::new(1.0, 1.0, 1.0), Point3D::new(1.0, 4.0, 5.0));
        assert_eq!(r.vector(), Point3D::new(0.0, 3.0, 4.0));
        assert_eq!(r.unit(), Ok(Point3D::new(0.0, 0.6, 0.8)));
    }

    #[test]
    fn degenerate_ray_has_no_unit() {
        let p = Point3D::new(2.0, 2.0, 2.0);
        assert_eq!(Ray3D::new(p, p).unit(), Err(GeomError::DivideByZero));
    }
}
