// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::{GeomError, Point2D};

/// Axis-aligned rectangle given by its extents and center.
///
/// Containment is inclusive on the boundary.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle2D {
    width: f64,
    height: f64,
    center: Point2D,
}

impl Rectangle2D {
    /// Rectangle of the given extents centered at the origin.
    pub const fn new(width: f64, height: f64) -> Self {
        Self::with_center(width, height, Point2D::new(0.0, 0.0))
    }

    /// Rectangle of the given extents centered at `center`.
    pub const fn with_center(width: f64, height: f64, center: Point2D) -> Self {
        Self {
            width,
            height,
            center,
        }
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Center point.
    pub fn center(&self) -> Point2D {
        self.center
    }

    /// Lower-left corner.
    pub fn ll(&self) -> Point2D {
        self.center
            .sub(&Point2D::new(0.5 * self.width, 0.5 * self.height))
    }

    /// `point` expressed relative to the center.
    pub fn relative(&self, point: &Point2D) -> Point2D {
        point.sub(&self.center)
    }

    /// Returns `true` if `point` lies inside or on the boundary.
    pub fn inside(&self, point: &Point2D) -> bool {
        let r = self.relative(point);
        r.x().abs() <= 0.5 * self.width && r.y().abs() <= 0.5 * self.height
    }

    /// Displacement that carries `point` along `direction` to the boundary.
    ///
    /// `point` is assumed to be inside or on the boundary. The exit is found
    /// by intersecting the ray with the two edges facing the direction of
    /// travel and keeping the nearer one; the Y edge is used only when it is
    /// strictly nearer, so exact ties resolve to the X edge.
    ///
    /// Fails with [`GeomError::DivideByZero`] when `direction` is zero or
    /// when either component of its unit vector is exactly zero. Exits along
    /// an axis-aligned direction are not defined by this routine.
    pub fn toedge(&self, point: &Point2D, direction: &Point2D) -> Result<Point2D, GeomError> {
        let p1 = self.relative(point);
        let d1 = direction.unit()?;

        let xsign = axis_sign(d1.x())?;
        let ysign = axis_sign(d1.y())?;

        let dx = xsign * 0.5 * self.width - p1.x();
        let dy = ysign * 0.5 * self.height - p1.y();

        let tx = dx / d1.x();
        let ty = dy / d1.y();

        let jump = if ty < tx { ty } else { tx };
        Ok(d1.scale(jump))
    }
}

fn axis_sign(component: f64) -> Result<f64, GeomError> {
    if component == 0.0 {
        return Err(GeomError::DivideByZero);
    }
    Ok(component / component.abs())
}
