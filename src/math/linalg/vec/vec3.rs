//! Three-dimensional vector.

use crate::{clone, core::Real, math::Dir3};
use nalgebra::Vector3;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// Three-dimensional real-number vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    /// Internal data.
    data: Vector3<Real>,
}

impl Vec3 {
    clone!(data: Vector3<Real>);

    /// Construct a new instance.
    #[inline]
    #[must_use]
    pub fn new(x: Real, y: Real, z: Real) -> Self {
        Self {
            data: Vector3::new(x, y, z),
        }
    }

    /// Unit vector along the x-axis.
    #[inline]
    #[must_use]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Unit vector along the y-axis.
    #[inline]
    #[must_use]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// Unit vector along the z-axis.
    #[inline]
    #[must_use]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Access the first component.
    #[inline]
    #[must_use]
    pub fn x(&self) -> Real {
        self.data.x
    }

    /// Access the second component.
    #[inline]
    #[must_use]
    pub fn y(&self) -> Real {
        self.data.y
    }

    /// Access the third component.
    #[inline]
    #[must_use]
    pub fn z(&self) -> Real {
        self.data.z
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn norm(&self) -> Real {
        self.data.norm()
    }

    /// Dot product against another vector.
    #[inline]
    #[must_use]
    pub fn dot(&self, rhs: &Self) -> Real {
        self.data.dot(&rhs.data)
    }

    /// Dot product against a unit direction.
    #[inline]
    #[must_use]
    pub fn dot_vec(&self, rhs: &Dir3) -> Real {
        self.data.dot(rhs.data())
    }

    /// Cross product against another vector.
    #[inline]
    #[must_use]
    pub fn cross(&self, rhs: &Self) -> Self {
        Self::from(self.data.cross(&rhs.data))
    }

    /// Cross product against another vector (alias used at mixed call sites).
    #[inline]
    #[must_use]
    pub fn cross_vec(&self, rhs: &Self) -> Self {
        self.cross(rhs)
    }
}

impl From<Vector3<Real>> for Vec3 {
    #[inline]
    #[must_use]
    fn from(v: Vector3<Real>) -> Self {
        Self { data: v }
    }
}

impl From<Dir3> for Vec3 {
    #[inline]
    #[must_use]
    fn from(d: Dir3) -> Self {
        Self { data: *d.data() }
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    #[must_use]
    fn neg(self) -> Self {
        Self::from(-self.data)
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    #[must_use]
    fn add(self, rhs: Self) -> Self {
        Self::from(self.data + rhs.data)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    #[must_use]
    fn sub(self, rhs: Self) -> Self {
        Self::from(self.data - rhs.data)
    }
}

impl Mul<Real> for Vec3 {
    type Output = Self;

    #[inline]
    #[must_use]
    fn mul(self, rhs: Real) -> Self {
        Self::from(self.data * rhs)
    }
}

impl Div<Real> for Vec3 {
    type Output = Self;

    #[inline]
    #[must_use]
    fn div(self, rhs: Real) -> Self {
        Self::from(self.data / rhs)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.data += rhs.data;
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.data -= rhs.data;
    }
}

impl MulAssign<Real> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Real) {
        self.data *= rhs;
    }
}

impl DivAssign<Real> for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: Real) {
        self.data /= rhs;
    }
}

impl Index<usize> for Vec3 {
    type Output = Real;

    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.data.x,
            1 => &self.data.y,
            2 => &self.data.z,
            _ => panic!("Out of bounds index for three-dimensional vector."),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        match i {
            0 => &mut self.data.x,
            1 => &mut self.data.y,
            2 => &mut self.data.z,
            _ => panic!("Out of bounds index for three-dimensional vector."),
        }
    }
}
