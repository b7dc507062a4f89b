//! Dense indexed triangle mesh.
//!
//! A `TriangleMesh` owns a flat vertex array and a list of triangles given
//! as index triples plus a per-triangle outward unit normal, exactly the
//! "dense vertex array / triangle = triple of vertex indices / per-triangle
//! unit normal" layout spec.md S3 calls for. Optional per-edge face tags
//! (added by `geom::clip` when a clipped edge lies on a cell face) support
//! cap-polygon assembly in `geom::brep::BRep::build_trimmed_domain`.

use crate::{
    core::Real,
    geom::{Collide, Cube, Triangle},
    math::{Dir3, Point3},
};
use std::collections::HashMap;

/// A triple of vertex indices describing one triangle's winding order.
pub type TriIndices = [usize; 3];

/// Tag attached to a clipped edge that lies exactly on one of a cell's six
/// faces: which face, and the outward normal of the triangle that edge came
/// from (used to orient the assembled cap loop).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceTag {
    /// Index of the cell face the edge lies on, `0..6` as `-x,+x,-y,+y,-z,+z`.
    pub face: usize,
    /// Outward normal of the originating triangle.
    pub source_normal: Dir3,
}

/// Dense indexed triangle mesh with per-triangle normals.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    vertices: Vec<Point3>,
    /// Triangle vertex-index triples.
    tris: Vec<TriIndices>,
    /// Per-triangle outward unit normals.
    normals: Vec<Dir3>,
    /// Tags on edges (by sorted vertex-index pair) that lie on a cell face.
    edge_tags: HashMap<(usize, usize), FaceTag>,
}

impl TriangleMesh {
    /// Construct an empty mesh.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a mesh from a flat vertex array, triangle index triples and
    /// per-triangle normals (as read from a parsed STL file).
    #[inline]
    #[must_use]
    pub fn from_indexed(vertices: Vec<Point3>, tris: Vec<TriIndices>, normals: Vec<Dir3>) -> Self {
        debug_assert_eq!(tris.len(), normals.len());
        for t in &tris {
            debug_assert!(t.iter().all(|&i| i < vertices.len()));
        }
        Self {
            vertices,
            tris,
            normals,
            edge_tags: HashMap::new(),
        }
    }

    /// Construct a mesh from a set of standalone (non-shared-vertex)
    /// triangles, e.g. the output of clipping. Vertices are *not*
    /// deduplicated: each triangle gets its own three fresh vertex slots.
    #[inline]
    #[must_use]
    pub fn from_triangles(tris: Vec<Triangle>) -> Self {
        let mut vertices = Vec::with_capacity(tris.len() * 3);
        let mut indices = Vec::with_capacity(tris.len());
        let mut normals = Vec::with_capacity(tris.len());

        for tri in tris {
            let base = vertices.len();
            vertices.extend_from_slice(tri.verts());
            indices.push([base, base + 1, base + 2]);
            normals.push(*tri.norm());
        }

        Self {
            vertices,
            tris: indices,
            normals,
            edge_tags: HashMap::new(),
        }
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn num_tris(&self) -> usize {
        self.tris.len()
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn num_verts(&self) -> usize {
        self.vertices.len()
    }

    /// Reference the vertex array.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Reference the triangle index triples.
    #[inline]
    #[must_use]
    pub fn tri_indices(&self) -> &[TriIndices] {
        &self.tris
    }

    /// Reference the per-triangle normals.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[Dir3] {
        &self.normals
    }

    /// Build the flat `Triangle` primitive for triangle `i`.
    #[inline]
    #[must_use]
    pub fn triangle(&self, i: usize) -> Triangle {
        let [a, b, c] = self.tris[i];
        Triangle::new_with_normal(
            [self.vertices[a], self.vertices[b], self.vertices[c]],
            self.normals[i],
        )
    }

    /// Iterate over all triangles as flat `Triangle` values.
    #[inline]
    pub fn iter_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.num_tris()).map(move |i| self.triangle(i))
    }

    /// Append a new triangle (with its own fresh vertex slots) to the mesh,
    /// returning its index.
    #[inline]
    pub fn push_triangle(&mut self, tri: Triangle) -> usize {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(tri.verts());
        self.tris.push([base, base + 1, base + 2]);
        self.normals.push(*tri.norm());
        self.tris.len() - 1
    }

    /// Tag an edge (unordered vertex-index pair) of the most recently pushed
    /// triangle as lying on a cell face, recording the tag for later cap
    /// loop assembly.
    #[inline]
    pub fn tag_edge(&mut self, a: usize, b: usize, tag: FaceTag) {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edge_tags.insert(key, tag);
    }

    /// Read the face tag, if any, on an unordered vertex-index edge.
    #[inline]
    #[must_use]
    pub fn edge_tag(&self, a: usize, b: usize) -> Option<FaceTag> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edge_tags.get(&key).copied()
    }

    /// All tagged edges, as `((v0, v1), tag)`.
    #[inline]
    pub fn tagged_edges(&self) -> impl Iterator<Item = (&(usize, usize), &FaceTag)> {
        self.edge_tags.iter()
    }

    /// Extend this mesh in place with another mesh's triangles (fresh vertex
    /// slots; edge tags are re-indexed into the combined vertex space).
    #[inline]
    pub fn extend(&mut self, other: &Self) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        for t in &other.tris {
            self.tris.push([t[0] + offset, t[1] + offset, t[2] + offset]);
        }
        self.normals.extend_from_slice(&other.normals);
        for (&(a, b), &tag) in &other.edge_tags {
            self.edge_tags.insert((a + offset, b + offset), tag);
        }
    }

    /// Vertex-wise axis-aligned bounding box, padded so degenerate (planar)
    /// meshes still yield a non-degenerate box.
    #[inline]
    #[must_use]
    pub fn bounding_box(&self) -> Cube {
        debug_assert!(!self.vertices.is_empty());

        let mut mins = self.vertices[0];
        let mut maxs = self.vertices[0];
        for v in &self.vertices[1..] {
            for axis in 0..3 {
                if v[axis] < mins[axis] {
                    mins[axis] = v[axis];
                }
                if v[axis] > maxs[axis] {
                    maxs[axis] = v[axis];
                }
            }
        }

        const PAD: Real = 1.0e-9;
        for axis in 0..3 {
            if (maxs[axis] - mins[axis]).abs() < 1.0e-12 {
                mins[axis] -= PAD;
                maxs[axis] += PAD;
            }
        }

        Cube::new(mins, maxs)
    }

    /// Total surface area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> Real {
        self.iter_triangles().map(|t| t.area()).sum()
    }

    /// Triangle indices whose bounding boxes overlap the given box
    /// (brute-force; the AABB tree is the indexed counterpart of this).
    #[inline]
    #[must_use]
    pub fn overlapping(&self, cube: &Cube) -> Vec<usize> {
        (0..self.num_tris())
            .filter(|&i| self.triangle(i).overlap(cube))
            .collect()
    }
}
