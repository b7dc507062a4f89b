//! Three-dimensional unit vector.

use crate::{core::Real, math::Vec3};
use nalgebra::{Unit, Vector3};
use std::ops::{Index, Mul, Neg};

/// Normalised three-dimensional real-number vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dir3 {
    /// Internal data.
    data: Unit<Vector3<Real>>,
}

impl Dir3 {
    /// Construct a new instance, normalising the given components.
    #[inline]
    #[must_use]
    pub fn new(x: Real, y: Real, z: Real) -> Self {
        Self {
            data: Unit::new_normalize(Vector3::new(x, y, z)),
        }
    }

    /// Reference the underlying unit vector.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &Vector3<Real> {
        self.data.as_ref()
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

    /// Re-normalise after accumulated floating-point drift.
    #[inline]
    pub fn renormalize(&mut self) {
        self.data.renormalize();
    }

    /// Dot product against a plain vector.
    #[inline]
    #[must_use]
    pub fn dot(&self, rhs: &Vec3) -> Real {
        self.data.dot(&rhs.data())
    }

    /// Dot product against another unit direction.
    #[inline]
    #[must_use]
    pub fn dot_dir(&self, rhs: &Self) -> Real {
        self.data.dot(&rhs.data)
    }

    /// Cross product against a plain vector.
    #[inline]
    #[must_use]
    pub fn cross(&self, rhs: &Vec3) -> Vec3 {
        Vec3::from(self.data.cross(&rhs.data()))
    }

    /// Cross product against a plain vector (alias used at mixed call sites).
    #[inline]
    #[must_use]
    pub fn cross_vec(&self, rhs: &Vec3) -> Vec3 {
        self.cross(rhs)
    }
}

impl From<Unit<Vector3<Real>>> for Dir3 {
    #[inline]
    #[must_use]
    fn from(d: Unit<Vector3<Real>>) -> Self {
        Self { data: d }
    }
}

impl From<Vector3<Real>> for Dir3 {
    #[inline]
    #[must_use]
    fn from(v: Vector3<Real>) -> Self {
        Self {
            data: Unit::new_normalize(v),
        }
    }
}

impl From<Vec3> for Dir3 {
    #[inline]
    #[must_use]
    fn from(v: Vec3) -> Self {
        Self::from(v.data())
    }
}

impl Neg for Dir3 {
    type Output = Self;

    #[inline]
    #[must_use]
    fn neg(self) -> Self {
        Self {
            data: Unit::new_unchecked(-*self.data),
        }
    }
}

impl Mul<Real> for Dir3 {
    type Output = Vec3;

    #[inline]
    #[must_use]
    fn mul(self, rhs: Real) -> Vec3 {
        Vec3::from(*self.data() * rhs)
    }
}

impl Index<usize> for Dir3 {
    type Output = Real;

    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.data.x,
            1 => &self.data.y,
            2 => &self.data.z,
            _ => panic!("Out of bounds index for three-dimensional direction."),
        }
    }
}
