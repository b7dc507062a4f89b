//! Quadrature-point value types shared by the octree seeder, the trimmed
//! domain's boundary sampler and the moment-fitting synthesizer (spec.md
//! S3's `IntegrationPoint`/`BoundaryIntegrationPoint` entities).

use crate::{
    access,
    core::Real,
    math::{Dir3, Point3},
};

/// A final (post-NNLS) interior cubature point: non-negative weight once
/// published.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationPoint {
    /// Physical position.
    pos: Point3,
    /// Cubature weight; strictly positive once published to an `Element`.
    weight: Real,
}

impl IntegrationPoint {
    access!(pos: Point3);
    access!(weight: Real);

    /// Construct a new instance.
    #[inline]
    #[must_use]
    pub const fn new(pos: Point3, weight: Real) -> Self {
        Self { pos, weight }
    }
}

/// A boundary (surface) cubature point produced by sampling a
/// `TrimmedDomain`'s closed mesh: position, weight, and the outward unit
/// normal of the originating facet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryIntegrationPoint {
    /// Physical position.
    pos: Point3,
    /// Area-weighted quadrature weight.
    weight: Real,
    /// Outward unit normal of the facet this point was sampled from.
    norm: Dir3,
}

impl BoundaryIntegrationPoint {
    access!(pos: Point3);
    access!(weight: Real);
    access!(norm: Dir3);

    /// Construct a new instance.
    #[inline]
    #[must_use]
    pub const fn new(pos: Point3, weight: Real, norm: Dir3) -> Self {
        Self { pos, weight, norm }
    }
}
