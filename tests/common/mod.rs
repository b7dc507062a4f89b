//! Shared solid-mesh builders for the scenario tests in this directory.
//!
//! Not itself a test binary (Cargo only treats direct children of `tests/`
//! that way); each scenario file pulls this in with `mod common;`.

#![allow(dead_code)]

use embedquad::core::Real;
use embedquad::geom::{Cube, Triangle, TriangleMesh};
use embedquad::math::{Point3, Vec3};
use std::f64::consts::PI;

/// Build a triangle from three points, flipping its winding if needed so its
/// normal has a non-negative dot product with `desired`. Lets every shell
/// builder below place vertices without hand-tracking winding order.
pub fn oriented_triangle(a: Point3, b: Point3, c: Point3, desired: Vec3) -> Triangle {
    let tri = Triangle::new([a, b, c]);
    let n: Vec3 = (*tri.norm()).into();
    if n.dot(&desired) < 0.0 {
        Triangle::new([a, c, b])
    } else {
        tri
    }
}

fn centroid3(a: Point3, b: Point3, c: Point3) -> Point3 {
    let origin = Point3::new(0.0, 0.0, 0.0);
    origin + ((a - origin) + (b - origin) + (c - origin)) / 3.0
}

fn centroid4(a: Point3, b: Point3, c: Point3, d: Point3) -> Point3 {
    let origin = Point3::new(0.0, 0.0, 0.0);
    origin + ((a - origin) + (b - origin) + (c - origin) + (d - origin)) / 4.0
}

/// Closed axis-aligned box surface, outward normals, 12 triangles.
pub fn cube_shell(lo: Point3, hi: Point3) -> Vec<Triangle> {
    let verts = [
        Point3::new(lo.x(), lo.y(), lo.z()),
        Point3::new(hi.x(), lo.y(), lo.z()),
        Point3::new(hi.x(), hi.y(), lo.z()),
        Point3::new(lo.x(), hi.y(), lo.z()),
        Point3::new(lo.x(), lo.y(), hi.z()),
        Point3::new(hi.x(), lo.y(), hi.z()),
        Point3::new(hi.x(), hi.y(), hi.z()),
        Point3::new(lo.x(), hi.y(), hi.z()),
    ];
    let center = Point3::new(
        (lo.x() + hi.x()) * 0.5,
        (lo.y() + hi.y()) * 0.5,
        (lo.z() + hi.z()) * 0.5,
    );
    let quads: [[usize; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    let mut tris = Vec::with_capacity(12);
    for q in quads {
        let a = verts[q[0]];
        let b = verts[q[1]];
        let c = verts[q[2]];
        let d = verts[q[3]];
        let desired = centroid4(a, b, c, d) - center;
        tris.push(oriented_triangle(a, b, c, desired));
        tris.push(oriented_triangle(a, c, d, desired));
    }
    tris
}

/// Closed cylinder surface (axis along Z), outward normals, capped top and
/// bottom. `n_segments` controls the polygonal approximation of the curved
/// wall; a facet-induced sagitta of roughly `radius * (pi/n_segments)^2 / 2`
/// is the price for approximating a circle with straight edges.
pub fn cylinder_shell(radius: Real, z0: Real, z1: Real, n_segments: usize) -> Vec<Triangle> {
    let bottom: Vec<Point3> = (0..n_segments)
        .map(|i| {
            let theta = 2.0 * PI * (i as Real) / (n_segments as Real);
            Point3::new(radius * theta.cos(), radius * theta.sin(), z0)
        })
        .collect();
    let top: Vec<Point3> = (0..n_segments)
        .map(|i| {
            let theta = 2.0 * PI * (i as Real) / (n_segments as Real);
            Point3::new(radius * theta.cos(), radius * theta.sin(), z1)
        })
        .collect();

    let mut tris = Vec::with_capacity(4 * n_segments);
    for i in 0..n_segments {
        let j = (i + 1) % n_segments;
        let radial = Vec3::new(bottom[i].x(), bottom[i].y(), 0.0);
        tris.push(oriented_triangle(bottom[i], bottom[j], top[j], radial));
        tris.push(oriented_triangle(bottom[i], top[j], top[i], radial));
    }

    let bottom_centre = Point3::new(0.0, 0.0, z0);
    let top_centre = Point3::new(0.0, 0.0, z1);
    for i in 0..n_segments {
        let j = (i + 1) % n_segments;
        tris.push(oriented_triangle(
            bottom_centre,
            bottom[i],
            bottom[j],
            Vec3::new(0.0, 0.0, -1.0),
        ));
        tris.push(oriented_triangle(
            top_centre,
            top[i],
            top[j],
            Vec3::new(0.0, 0.0, 1.0),
        ));
    }
    tris
}

/// Closed UV-sphere surface. `outward` selects normals pointing away from
/// (true) or towards (false) `center` — the latter is what a spherical
/// cavity cut into a solid needs, so the B-Rep's own `Inside` test reads
/// "inside the material", not "inside the cavity".
pub fn sphere_shell(
    center: Point3,
    radius: Real,
    n_lat: usize,
    n_lon: usize,
    outward: bool,
) -> Vec<Triangle> {
    assert!(n_lat >= 2 && n_lon >= 3);

    let point_at = |phi: Real, theta: Real| -> Point3 {
        Point3::new(
            center.x() + radius * phi.sin() * theta.cos(),
            center.y() + radius * phi.sin() * theta.sin(),
            center.z() + radius * phi.cos(),
        )
    };
    let desired_dir = |p: Point3| -> Vec3 {
        let d = p - center;
        if outward {
            d
        } else {
            d * -1.0
        }
    };

    let north = point_at(0.0, 0.0);
    let south = point_at(PI, 0.0);
    let rings: Vec<Vec<Point3>> = (1..n_lat)
        .map(|i| {
            let phi = PI * (i as Real) / (n_lat as Real);
            (0..n_lon)
                .map(|j| {
                    let theta = 2.0 * PI * (j as Real) / (n_lon as Real);
                    point_at(phi, theta)
                })
                .collect()
        })
        .collect();

    let mut tris = Vec::new();

    let first_ring = &rings[0];
    for j in 0..n_lon {
        let k = (j + 1) % n_lon;
        let (a, b, c) = (north, first_ring[j], first_ring[k]);
        tris.push(oriented_triangle(a, b, c, desired_dir(centroid3(a, b, c))));
    }

    for ring_i in 0..rings.len().saturating_sub(1) {
        let r0 = &rings[ring_i];
        let r1 = &rings[ring_i + 1];
        for j in 0..n_lon {
            let k = (j + 1) % n_lon;
            let (a, b, c, d) = (r0[j], r0[k], r1[k], r1[j]);
            let mid = centroid4(a, b, c, d);
            tris.push(oriented_triangle(a, b, c, desired_dir(mid)));
            tris.push(oriented_triangle(a, c, d, desired_dir(mid)));
        }
    }

    let last_ring = &rings[rings.len() - 1];
    for j in 0..n_lon {
        let k = (j + 1) % n_lon;
        let (a, b, c) = (south, last_ring[k], last_ring[j]);
        tris.push(oriented_triangle(a, b, c, desired_dir(centroid3(a, b, c))));
    }

    tris
}

pub fn mesh_from(tris: Vec<Triangle>) -> TriangleMesh {
    TriangleMesh::from_triangles(tris)
}

/// A cube with a concentric spherical cavity: the cube's outward-normal
/// shell plus an inward-normal sphere shell, as two disjoint closed
/// surfaces sharing one mesh (spec.md S8 scenario 2).
pub fn cube_with_spherical_cavity(
    half_extent: Real,
    cavity_radius: Real,
    n_lat: usize,
    n_lon: usize,
) -> TriangleMesh {
    let lo = Point3::new(-half_extent, -half_extent, -half_extent);
    let hi = Point3::new(half_extent, half_extent, half_extent);
    let mut tris = cube_shell(lo, hi);
    tris.extend(sphere_shell(
        Point3::new(0.0, 0.0, 0.0),
        cavity_radius,
        n_lat,
        n_lon,
        false,
    ));
    mesh_from(tris)
}
