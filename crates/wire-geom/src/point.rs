// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::GeomError;

/// Cartesian point of fixed dimensionality `N`.
///
/// * The same type serves as a position or a displacement depending on the
///   calling context.
/// * Binary operations pair components by axis; the `*_scalar` variants and
///   [`PointN::scale`] broadcast a scalar to every component.
/// * Division is checked and reports [`GeomError::DivideByZero`] rather than
///   producing infinities.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointN<const N: usize> {
    data: [f64; N],
}

/// Two-dimensional point with `x`/`y` accessors.
pub type Point2D = PointN<2>;

/// Three-dimensional point with `x`/`y`/`z` accessors.
pub type Point3D = PointN<3>;

impl<const N: usize> PointN<N> {
    /// The origin.
    pub const ZERO: Self = Self { data: [0.0; N] };

    /// Creates a point from its components.
    pub const fn from_array(data: [f64; N]) -> Self {
        Self { data }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; N] {
        self.data
    }

    /// Borrows the components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Number of components.
    pub const fn dim(&self) -> usize {
        N
    }

    /// Component along `axis`, or `None` when out of range.
    pub fn get(&self, axis: usize) -> Option<f64> {
        self.data.get(axis).copied()
    }

    /// Iterates the components in axis order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: core::array::from_fn(|i| f(self.data[i])),
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            data: core::array::from_fn(|i| f(self.data[i], other.data[i])),
        }
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Component-wise difference.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Component-wise product.
    pub fn mul(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a * b)
    }

    /// Component-wise quotient.
    ///
    /// Fails with [`GeomError::DivideByZero`] if any component of `other` is
    /// exactly zero.
    pub fn div(&self, other: &Self) -> Result<Self, GeomError> {
        if other.data.iter().any(|&b| b == 0.0) {
            return Err(GeomError::DivideByZero);
        }
        Ok(self.zip_with(other, |a, b| a / b))
    }

    /// Adds `scalar` to every component.
    pub fn add_scalar(&self, scalar: f64) -> Self {
        self.map(|a| a + scalar)
    }

    /// Subtracts `scalar` from every component.
    pub fn sub_scalar(&self, scalar: f64) -> Self {
        self.map(|a| a - scalar)
    }

    /// Multiplies every component by `scalar`.
    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|a| a * scalar)
    }

    /// Divides every component by `scalar`.
    ///
    /// Fails with [`GeomError::DivideByZero`] when `scalar` is exactly zero.
    pub fn div_scalar(&self, scalar: f64) -> Result<Self, GeomError> {
        if scalar == 0.0 {
            return Err(GeomError::DivideByZero);
        }
        Ok(self.map(|a| a / scalar))
    }

    /// Sum of pairwise component products.
    pub fn dot(&self, other: &Self) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean length, `sqrt(self · self)`.
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector pointing along `self`.
    ///
    /// Unlike a degeneracy-threshold normalize, only an exactly-zero
    /// magnitude is rejected (with [`GeomError::DivideByZero`]).
    pub fn unit(&self) -> Result<Self, GeomError> {
        self.div_scalar(self.magnitude())
    }
}

impl Point2D {
    /// Creates a 2D point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { data: [x, y] }
    }

    /// X component.
    pub fn x(&self) -> f64 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f64 {
        self.data[1]
    }

    /// Mutable access to the X component.
    pub fn x_mut(&mut self) -> &mut f64 {
        &mut self.data[0]
    }

    /// Mutable access to the Y component.
    pub fn y_mut(&mut self) -> &mut f64 {
        &mut self.data[1]
    }

    /// Overwrites the X component in place.
    pub fn set_x(&mut self, value: f64) {
        self.data[0] = value;
    }

    /// Overwrites the Y component in place.
    pub fn set_y(&mut self, value: f64) {
        self.data[1] = value;
    }
}

impl Point3D {
    /// Creates a 3D point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    /// X component.
    pub fn x(&self) -> f64 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f64 {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> f64 {
        self.data[2]
    }

    /// Mutable access to the X component.
    pub fn x_mut(&mut self) -> &mut f64 {
        &mut self.data[0]
    }

    /// Mutable access to the Y component.
    pub fn y_mut(&mut self) -> &mut f64 {
        &mut self.data[1]
    }

    /// Mutable access to the Z component.
    pub fn z_mut(&mut self) -> &mut f64 {
        &mut self.data[2]
    }

    /// Overwrites the X component in place.
    pub fn set_x(&mut self, value: f64) {
        self.data[0] = value;
    }

    /// Overwrites the Y component in place.
    pub fn set_y(&mut self, value: f64) {
        self.data[1] = value;
    }

    /// Overwrites the Z component in place.
    pub fn set_z(&mut self, value: f64) {
        self.data[2] = value;
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

impl<const N: usize> Default for PointN<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Index<usize> for PointN<N> {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.data[axis]
    }
}

impl<const N: usize> IndexMut<usize> for PointN<N> {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.data[axis]
    }
}

impl<const N: usize> From<[f64; N]> for PointN<N> {
    fn from(value: [f64; N]) -> Self {
        Self { data: value }
    }
}

/// Converts a runtime slice, rejecting a length other than `N`.
///
/// # Examples
/// ```
/// use wire_geom::{GeomError, Point3D};
/// let p = Point3D::try_from(&[1.0, 2.0, 3.0][..]).unwrap();
/// assert_eq!(p.z(), 3.0);
/// let err = Point3D::try_from(&[1.0, 2.0][..]).unwrap_err();
/// assert_eq!(err, GeomError::TypeMismatch { expected: 3, found: 2 });
/// ```
impl<const N: usize> TryFrom<&[f64]> for PointN<N> {
    type Error = GeomError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        let data: [f64; N] = value.try_into().map_err(|_| GeomError::TypeMismatch {
            expected: N,
            found: value.len(),
        })?;
        Ok(Self { data })
    }
}

impl<const N: usize> fmt::Display for PointN<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Point(")?;
        for (i, c) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}
