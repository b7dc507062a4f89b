//! Flat triangle primitive.
//!
//! A single flat triangle with one outward unit normal (not a
//! normal-interpolating "smooth" triangle) — surface meshes in this crate
//! are piecewise-planar, so per-triangle flat normals are all that is
//! needed by the inside/outside oracle and the divergence-theorem surface
//! integrals.

use crate::{
    access,
    core::{Real, ALPHA, BETA, EPS_BARY, GAMMA},
    geom::{Collide, Cube, Ray, Side, Trace},
    math::{Dir3, Point3, Vec3},
};

/// Flat triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Vertex points.
    verts: [Point3; 3],
    /// Outward-facing unit normal.
    norm: Dir3,
}

/// Detailed result of a Moller-Trumbore ray-triangle intersection, carrying
/// the flags the inside/outside oracle (`geom::brep::BRep::is_inside`) needs
/// to detect and retry degenerate casts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the ray to the intersection point.
    pub dist: Real,
    /// Barycentric coordinates `(u, v, w)` with `w = 1 - u - v`.
    pub bary: (Real, Real, Real),
    /// True when the ray approaches from the side the normal points away
    /// from (`dir . n > 0`).
    pub back_facing: bool,
    /// True when the ray direction lies in the triangle's plane.
    pub parallel: bool,
    /// True when the hit lies within `EPS_BARY` of one of the triangle's
    /// edges (including its vertices).
    pub on_boundary: bool,
}

impl Triangle {
    access!(verts: [Point3; 3]);
    access!(norm: Dir3);

    /// Construct a new instance, computing the outward normal from vertex
    /// winding order (right-hand rule over `ALPHA -> BETA -> GAMMA`).
    #[inline]
    #[must_use]
    pub fn new(verts: [Point3; 3]) -> Self {
        let norm = Self::init_norm(&verts);
        Self { verts, norm }
    }

    /// Construct a new instance with an explicitly supplied outward normal,
    /// as read from an STL facet record.
    #[inline]
    #[must_use]
    pub fn new_with_normal(verts: [Point3; 3], norm: Dir3) -> Self {
        Self { verts, norm }
    }

    /// Compute a right-hand-rule normal from vertex winding.
    #[inline]
    #[must_use]
    fn init_norm(verts: &[Point3; 3]) -> Dir3 {
        Dir3::from((verts[BETA] - verts[ALPHA]).cross(&(verts[GAMMA] - verts[ALPHA])))
    }

    /// Side lengths `(ab, bc, ca)`.
    #[inline]
    #[must_use]
    pub fn side_lengths(&self) -> [Real; 3] {
        let ab = (self.verts[BETA] - self.verts[ALPHA]).norm();
        let bc = (self.verts[GAMMA] - self.verts[BETA]).norm();
        let ca = (self.verts[ALPHA] - self.verts[GAMMA]).norm();
        [ab, bc, ca]
    }

    /// Perimeter length.
    #[inline]
    #[must_use]
    pub fn perimeter(&self) -> Real {
        let [ab, bc, ca] = self.side_lengths();
        ab + bc + ca
    }

    /// Surface area (Heron's formula).
    #[inline]
    #[must_use]
    pub fn area(&self) -> Real {
        let [ab, bc, ca] = self.side_lengths();
        let s = (ab + bc + ca) * 0.5;
        (s * (s - ab) * (s - bc) * (s - ca)).max(0.0).sqrt()
    }

    /// Centroid.
    #[inline]
    #[must_use]
    pub fn centre(&self) -> Point3 {
        let origin = Point3::new(0.0, 0.0, 0.0);
        let sum = (self.verts[ALPHA] - origin) + (self.verts[BETA] - origin) + (self.verts[GAMMA] - origin);
        origin + sum / 3.0
    }

    /// Position at barycentric coordinates `(u, v)` with implied `w = 1 - u - v`.
    #[inline]
    #[must_use]
    pub fn at_bary(&self, u: Real, v: Real) -> Point3 {
        let w = 1.0 - u - v;
        let e1 = self.verts[BETA] - self.verts[ALPHA];
        let e2 = self.verts[GAMMA] - self.verts[ALPHA];
        let _ = w;
        self.verts[ALPHA] + e1 * u + e2 * v
    }

    /// Moller-Trumbore ray-triangle intersection with the parallel/back-face
    /// flags needed by the robust inside/outside oracle (spec.md S4.1).
    ///
    /// Unlike `Trace::dist`, this does not reject parallel or edge-grazing
    /// hits up front — callers (the ray-cast oracle) need to see those cases
    /// to decide whether to retry with a different cast direction.
    #[inline]
    #[must_use]
    pub fn intersect_detailed(&self, ray: &Ray, eps_parallel: Real) -> Option<RayHit> {
        let verts = self.verts;
        let e1 = verts[BETA] - verts[ALPHA];
        let e2 = verts[GAMMA] - verts[ALPHA];

        let dir_vec: Vec3 = (*ray.dir()).into();
        let d_cross_e2 = dir_vec.cross(&e2);
        let det = e1.dot(&d_cross_e2);
        let dir_len = dir_vec.norm();

        let parallel = det.abs() / dir_len.max(Real::EPSILON) < eps_parallel;

        if det.abs() <= Real::EPSILON {
            // `dist` is a sentinel, not a real hit distance: it must never
            // win `brep::cast_classify`'s origin-distance check, even if a
            // caller compares distances before checking `parallel`/
            // `on_boundary`.
            return Some(RayHit {
                dist: Real::INFINITY,
                bary: (0.0, 0.0, 1.0),
                back_facing: dir_vec.dot(&self.norm.into()) > 0.0,
                parallel: true,
                on_boundary: true,
            });
        }

        let inv_det = 1.0 / det;
        let rel_pos = *ray.pos() - verts[ALPHA];
        let u = inv_det * rel_pos.dot(&d_cross_e2);

        let q = rel_pos.cross(&e1);
        let v = inv_det * dir_vec.dot(&q);
        let w = 1.0 - u - v;

        let dist = inv_det * e2.dot(&q);
        if dist <= 0.0 {
            return None;
        }

        let on_boundary =
            u.abs() < EPS_BARY || v.abs() < EPS_BARY || w.abs() < EPS_BARY || parallel;

        if !(-EPS_BARY..=1.0 + EPS_BARY).contains(&u)
            || !(-EPS_BARY..=1.0 + EPS_BARY).contains(&v)
            || (u + v) > 1.0 + EPS_BARY
        {
            return None;
        }

        let back_facing = dir_vec.dot(&self.norm.into()) > 0.0;

        Some(RayHit {
            dist,
            bary: (u, v, w),
            back_facing,
            parallel,
            on_boundary,
        })
    }

    /// This triangle's vertices as an ordered polygon, the seed for
    /// Sutherland-Hodgman half-space clipping in `geom::clip`.
    #[inline]
    #[must_use]
    pub fn polygon(&self) -> Vec<Point3> {
        self.verts.to_vec()
    }
}

impl Collide for Triangle {
    #[inline]
    fn overlap(&self, cube: &Cube) -> bool {
        // Separating-axis test (Akenine-Moller) between a triangle and an
        // axis-aligned box.
        let c = cube.centre();
        let e = cube.half_widths();

        let v0 = self.verts[ALPHA] - c;
        let v1 = self.verts[BETA] - c;
        let v2 = self.verts[GAMMA] - c;

        let f0 = v1 - v0;
        let f1 = v2 - v1;
        let f2 = v0 - v2;

        let u0 = Vec3::x_axis();
        let u1 = Vec3::y_axis();
        let u2 = Vec3::z_axis();

        let axis_test = |axis: &Vec3| {
            if axis.norm() < 1.0e-14 {
                return true;
            }
            let p0 = v0.dot(axis);
            let p1 = v1.dot(axis);
            let p2 = v2.dot(axis);

            let r = e.x() * u0.dot(axis).abs()
                + e.y() * u1.dot(axis).abs()
                + e.z() * u2.dot(axis).abs();

            (-(p0.max(p1).max(p2))).max(p0.min(p1).min(p2)) <= r
        };

        let axes = [
            u0,
            u1,
            u2,
            u0.cross(&f0),
            u0.cross(&f1),
            u0.cross(&f2),
            u1.cross(&f0),
            u1.cross(&f1),
            u1.cross(&f2),
            u2.cross(&f0),
            u2.cross(&f1),
            u2.cross(&f2),
            (*self.norm()).into(),
        ];

        axes.iter().all(axis_test)
    }
}

impl Trace for Triangle {
    #[inline]
    fn hit(&self, ray: &Ray) -> bool {
        self.intersect_detailed(ray, 1.0e-10)
            .map(|h| !h.parallel)
            .unwrap_or(false)
    }

    #[inline]
    fn dist(&self, ray: &Ray) -> Option<Real> {
        self.intersect_detailed(ray, 1.0e-10)
            .filter(|h| !h.parallel)
            .map(|h| h.dist)
    }

    #[inline]
    fn dist_side(&self, ray: &Ray) -> Option<(Real, Side)> {
        self.dist(ray).map(|dist| (dist, Side::new(ray.dir(), self.norm)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn unit_triangle() -> Triangle {
        Triangle::new([
            Point3::new(0., 0., 0.),
            Point3::new(1., 0., 0.),
            Point3::new(0., 1., 0.),
        ])
    }

    #[test]
    fn area_and_perimeter() {
        let tri = unit_triangle();
        assert_approx_eq!(tri.area(), 0.5);
        assert_approx_eq!(tri.perimeter(), 2.0 + 2.0_f64.sqrt());
    }

    #[test]
    fn normal_points_up() {
        let tri = unit_triangle();
        assert_approx_eq!(tri.norm().z(), 1.0);
    }

    #[test]
    fn ray_hits_interior() {
        let tri = unit_triangle();
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Dir3::new(0.0, 0.0, -1.0));
        let hit = tri.intersect_detailed(&ray, 1.0e-10).unwrap();
        assert_approx_eq!(hit.dist, 1.0);
        assert!(!hit.back_facing);
        assert!(!hit.parallel);
    }

    #[test]
    fn ray_misses_outside_triangle() {
        let tri = unit_triangle();
        let ray = Ray::new(Point3::new(0.9, 0.9, 1.0), Dir3::new(0.0, 0.0, -1.0));
        assert!(tri.intersect_detailed(&ray, 1.0e-10).is_none());
    }

    #[test]
    fn ray_parallel_is_flagged() {
        let tri = unit_triangle();
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Dir3::new(1.0, 0.0, 0.0));
        let hit = tri.intersect_detailed(&ray, 1.0e-10).unwrap();
        assert!(hit.parallel);
    }

    #[test]
    fn back_facing_detected() {
        let tri = unit_triangle();
        let ray = Ray::new(Point3::new(0.25, 0.25, -1.0), Dir3::new(0.0, 0.0, 1.0));
        let hit = tri.intersect_detailed(&ray, 1.0e-10).unwrap();
        assert!(hit.back_facing);
    }

    #[test]
    fn overlap_with_containing_cube() {
        let tri = unit_triangle();
        let cube = Cube::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        assert!(tri.overlap(&cube));
    }

    #[test]
    fn overlap_with_disjoint_cube() {
        let tri = unit_triangle();
        let cube = Cube::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        assert!(!tri.overlap(&cube));
    }
}
