//! Axis-aligned bounding-box tree over a surface mesh's triangles.
//!
//! Built once by recursively sorting triangle centroids along the parent
//! box's longest axis and partitioning at the median (spec.md S4.1); never
//! mutated afterwards. Internal nodes store the union box of their subtree;
//! leaves store a single triangle id.

use crate::{
    fmt_report,
    geom::{Collide, Cube, Ray, Trace, TriangleMesh},
    ord::cartesian::{X, Y, Z},
};
use std::fmt::{Display, Formatter};

/// AABB tree node.
pub enum Tree {
    /// Branching node: the union box of both children.
    Branch {
        /// Boundary.
        boundary: Cube,
        /// Left child.
        left: Box<Tree>,
        /// Right child.
        right: Box<Tree>,
    },
    /// Terminal node holding a single triangle.
    Leaf {
        /// Boundary (the triangle's own bounding box).
        boundary: Cube,
        /// Index of the triangle in the owning mesh.
        tri_id: usize,
    },
}

impl Tree {
    /// Build a tree over every triangle in `mesh`. Panics if the mesh has no
    /// triangles — an empty surface is a caller error, not a degeneracy the
    /// tree should paper over.
    #[inline]
    #[must_use]
    pub fn build(mesh: &TriangleMesh) -> Self {
        assert!(
            mesh.num_tris() > 0,
            "cannot build an AABB tree over an empty mesh"
        );

        let mut entries: Vec<(usize, Cube)> = (0..mesh.num_tris())
            .map(|i| (i, Self::tri_bbox(mesh, i)))
            .collect();

        Self::build_rec(&mut entries)
    }

    /// Padded bounding box of a single triangle (triangles lying exactly in
    /// an axis-aligned plane would otherwise produce a zero-thickness box).
    #[inline]
    #[must_use]
    fn tri_bbox(mesh: &TriangleMesh, i: usize) -> Cube {
        let tri = mesh.triangle(i);
        let verts = tri.verts();
        let mut mins = verts[0];
        let mut maxs = verts[0];
        for v in &verts[1..] {
            for axis in 0..3 {
                if v[axis] < mins[axis] {
                    mins[axis] = v[axis];
                }
                if v[axis] > maxs[axis] {
                    maxs[axis] = v[axis];
                }
            }
        }
        for axis in 0..3 {
            if (maxs[axis] - mins[axis]).abs() < 1.0e-12 {
                mins[axis] -= 1.0e-9;
                maxs[axis] += 1.0e-9;
            }
        }
        Cube::new(mins, maxs)
    }

    /// Recursively partition `entries` (triangle id + bbox pairs) into a
    /// subtree, splitting at the median centroid along the longest axis of
    /// the union box.
    #[inline]
    #[must_use]
    fn build_rec(entries: &mut [(usize, Cube)]) -> Self {
        let boundary = Self::union_box(entries);

        if entries.len() == 1 {
            return Self::Leaf {
                boundary,
                tri_id: entries[0].0,
            };
        }

        let widths = boundary.widths();
        let axis = if widths.x() >= widths.y() && widths.x() >= widths.z() {
            X
        } else if widths.y() >= widths.z() {
            Y
        } else {
            Z
        };

        entries.sort_by(|a, b| {
            let ca = a.1.centre()[axis];
            let cb = b.1.centre()[axis];
            ca.partial_cmp(&cb).unwrap()
        });

        let mid = entries.len() / 2;
        let (lo, hi) = entries.split_at_mut(mid);

        let left = Box::new(Self::build_rec(lo));
        let right = Box::new(Self::build_rec(hi));

        Self::Branch {
            boundary,
            left,
            right,
        }
    }

    /// Union box of a set of triangle bounding boxes.
    #[inline]
    #[must_use]
    fn union_box(entries: &[(usize, Cube)]) -> Cube {
        let mut mins = *entries[0].1.mins();
        let mut maxs = *entries[0].1.maxs();

        for (_, bb) in &entries[1..] {
            for axis in 0..3 {
                if bb.mins()[axis] < mins[axis] {
                    mins[axis] = bb.mins()[axis];
                }
                if bb.maxs()[axis] > maxs[axis] {
                    maxs[axis] = bb.maxs()[axis];
                }
            }
        }

        Cube::new(mins, maxs)
    }

    /// Reference the node's boundary.
    #[inline]
    #[must_use]
    pub fn boundary(&self) -> &Cube {
        match *self {
            Self::Branch { ref boundary, .. } | Self::Leaf { ref boundary, .. } => boundary,
        }
    }

    /// Total number of nodes (branches + leaves) in this subtree.
    #[inline]
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        match *self {
            Self::Branch {
                ref left, ref right, ..
            } => 1 + left.num_nodes() + right.num_nodes(),
            Self::Leaf { .. } => 1,
        }
    }

    /// Number of leaf (triangle) nodes in this subtree.
    #[inline]
    #[must_use]
    pub fn num_leaves(&self) -> usize {
        match *self {
            Self::Branch {
                ref left, ref right, ..
            } => left.num_leaves() + right.num_leaves(),
            Self::Leaf { .. } => 1,
        }
    }

    /// Maximum depth of this subtree (a lone leaf has depth 1).
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        match *self {
            Self::Branch {
                ref left, ref right, ..
            } => 1 + left.depth().max(right.depth()),
            Self::Leaf { .. } => 1,
        }
    }

    /// Collect the ids of every triangle whose leaf box the given ray enters
    /// (an unordered candidate set — `geom::brep::BRep` does the actual
    /// ray-triangle tests and distance ordering).
    #[inline]
    pub fn query_ray(&self, ray: &Ray, out: &mut Vec<usize>) {
        if !self.boundary().hit(ray) {
            return;
        }
        match *self {
            Self::Branch {
                ref left, ref right, ..
            } => {
                left.query_ray(ray, out);
                right.query_ray(ray, out);
            }
            Self::Leaf { tri_id, .. } => out.push(tri_id),
        }
    }

    /// Collect the ids of every triangle whose leaf box overlaps the given
    /// box (used by cell classification and clipping).
    #[inline]
    pub fn query_box(&self, aabb: &Cube, out: &mut Vec<usize>) {
        if !self.boundary().overlap(aabb) {
            return;
        }
        match *self {
            Self::Branch {
                ref left, ref right, ..
            } => {
                left.query_box(aabb, out);
                right.query_box(aabb, out);
            }
            Self::Leaf { tri_id, .. } => out.push(tri_id),
        }
    }
}

impl Display for Tree {
    #[inline]
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), std::fmt::Error> {
        writeln!(fmt, "...")?;
        fmt_report!(fmt, self.boundary(), "boundary");
        fmt_report!(fmt, self.num_nodes(), "total nodes");
        fmt_report!(fmt, self.num_leaves(), "leaf (triangle) nodes");
        fmt_report!(fmt, self.depth(), "maximum depth");
        Ok(())
    }
}
