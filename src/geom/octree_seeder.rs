//! Octree-based candidate point seeder (spec.md S4.4).
//!
//! Recursively subdivides a `TrimmedDomain`'s bounding box into 8 children,
//! discarding a child whose centre falls outside the trimmed domain, and
//! placing a tensor-product Gauss-Legendre rule on every kept leaf reached
//! at the target depth. Grounded on `geom::domain::tree`'s octree
//! `Tree::init_children`/`init_child` recursive-split machinery, generalised
//! from triangle-collection to inside/outside leaf classification.

use crate::{
    core::Real,
    geom::{shape::Cube, trimmed_domain::TrimmedDomain},
    math::{poly::tensor_gauss_3d, Point3},
};

/// Seed candidate interior points for one trimmed domain (spec.md S4.4).
///
/// Only the candidate *positions* are returned: the naive per-leaf Gauss
/// weight has no standing once moment fitting runs, since `fit::nnls`
/// determines the actual cubature weights from scratch.
///
/// `orders = (p_u, p_v, p_w)` are the per-axis tensor polynomial orders
/// (spec.md S6 `polynomial_order` is validated independently per axis, so
/// anisotropic orders are a reachable configuration); each axis gets its
/// own `p+1` Gauss-Legendre point count rather than a single scalar order
/// applied to all three.
///
/// Refinement starts at depth 1 and increases until the yield meets
/// `min_points = (p_u+1)(p_v+1)(p_w+1) * distribution_factor` or `max_depth`
/// is reached (spec.md S4.4).
#[inline]
#[must_use]
pub fn seed_candidate_points(
    domain: &TrimmedDomain,
    orders: (usize, usize, usize),
    distribution_factor: Real,
    max_depth: u32,
) -> Vec<Point3> {
    let points_per_axis = [orders.0 + 1, orders.1 + 1, orders.2 + 1];
    let min_points = (points_per_axis[0] * points_per_axis[1] * points_per_axis[2]) as Real
        * distribution_factor;

    let mut depth = 1;
    let mut points = collect_at_depth(domain, points_per_axis, depth, max_depth);

    while (points.len() as Real) < min_points && depth < max_depth {
        depth += 1;
        points = collect_at_depth(domain, points_per_axis, depth, max_depth);
    }

    points
}

/// Run the octree subdivision to exactly `target_depth`, collecting the
/// inside points of every kept leaf's tensor-Gauss rule.
#[inline]
#[must_use]
fn collect_at_depth(
    domain: &TrimmedDomain,
    points_per_axis: [usize; 3],
    target_depth: u32,
    max_depth: u32,
) -> Vec<Point3> {
    let root = domain.bounding_box();
    let mut out = Vec::new();
    recurse(domain, &root, 1, target_depth.min(max_depth), points_per_axis, &mut out);
    out
}

/// Recurse one octree level. `depth` is the depth of `node` (the root is
/// depth 1); the node is leafed once `depth == target_depth`.
fn recurse(
    domain: &TrimmedDomain,
    node: &Cube,
    depth: u32,
    target_depth: u32,
    points_per_axis: [usize; 3],
    out: &mut Vec<Point3>,
) {
    if !domain.is_inside(&node.centre()) {
        return;
    }

    if depth >= target_depth {
        seed_leaf(domain, node, points_per_axis, out);
        return;
    }

    for child in split_octants(node) {
        recurse(domain, &child, depth + 1, target_depth, points_per_axis, out);
    }
}

/// Place a tensor-product Gauss-Legendre rule on a leaf box, keeping only
/// points for which `IsInside` is true (spec.md S4.4).
fn seed_leaf(domain: &TrimmedDomain, leaf: &Cube, points_per_axis: [usize; 3], out: &mut Vec<Point3>) {
    let mins = *leaf.mins();
    let widths = leaf.widths();

    for tp in tensor_gauss_3d(points_per_axis) {
        let pos = Point3::new(
            mins.x() + tp.local.0 * widths.x(),
            mins.y() + tp.local.1 * widths.y(),
            mins.z() + tp.local.2 * widths.z(),
        );
        if domain.is_inside(&pos) {
            out.push(pos);
        }
    }
}

/// Split a box into its 8 octants (spec.md S4.4), following the same
/// `init_children`/`make_child` pattern of building from mins + half-widths.
fn split_octants(parent: &Cube) -> [Cube; 8] {
    let hws = parent.half_widths();
    let mins = *parent.mins();

    let mut make_child = |dx: Real, dy: Real, dz: Real| {
        let lo = Point3::new(mins.x() + dx, mins.y() + dy, mins.z() + dz);
        let hi = lo + hws;
        Cube::new(lo, hi)
    };

    [
        make_child(0.0, 0.0, 0.0),
        make_child(hws.x(), 0.0, 0.0),
        make_child(0.0, hws.y(), 0.0),
        make_child(hws.x(), hws.y(), 0.0),
        make_child(0.0, 0.0, hws.z()),
        make_child(hws.x(), 0.0, hws.z()),
        make_child(0.0, hws.y(), hws.z()),
        make_child(hws.x(), hws.y(), hws.z()),
    ]
}
