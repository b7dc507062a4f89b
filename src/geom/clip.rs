//! Sutherland-Hodgman clipping of a triangle against an axis-aligned box.
//!
//! Each overlapping surface triangle is clipped against the six half-spaces
//! of a cell box in turn (spec.md S4.2); the resulting convex polygon is
//! fan-triangulated and appended to the cell-local mesh. Edges introduced by
//! a clip plane are tagged with that face's index so
//! `geom::brep::BRep::build_trimmed_domain` can later assemble them into
//! closed cap loops.

use crate::{
    core::Real,
    geom::{FaceTag, Triangle, TriangleMesh},
    math::{Dir3, Point3},
};

/// One of a cube's six faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    /// `-x`
    NegX = 0,
    /// `+x`
    PosX = 1,
    /// `-y`
    NegY = 2,
    /// `+y`
    PosY = 3,
    /// `-z`
    NegZ = 4,
    /// `+z`
    PosZ = 5,
}

impl Face {
    /// All six faces in a fixed order.
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
        Face::NegZ,
        Face::PosZ,
    ];

    /// Cartesian axis this face is perpendicular to.
    #[inline]
    #[must_use]
    const fn axis(self) -> usize {
        match self {
            Face::NegX | Face::PosX => 0,
            Face::NegY | Face::PosY => 1,
            Face::NegZ | Face::PosZ => 2,
        }
    }

    /// Outward unit normal of the face.
    #[inline]
    #[must_use]
    pub fn outward_normal(self) -> Dir3 {
        match self {
            Face::NegX => Dir3::new(-1.0, 0.0, 0.0),
            Face::PosX => Dir3::new(1.0, 0.0, 0.0),
            Face::NegY => Dir3::new(0.0, -1.0, 0.0),
            Face::PosY => Dir3::new(0.0, 1.0, 0.0),
            Face::NegZ => Dir3::new(0.0, 0.0, -1.0),
            Face::PosZ => Dir3::new(0.0, 0.0, 1.0),
        }
    }

    /// Signed "inside" test value for a point: non-negative means the point
    /// is on the box's side of this face's plane.
    #[inline]
    #[must_use]
    fn inside_value(self, p: &Point3, mins: &Point3, maxs: &Point3) -> Real {
        match self {
            Face::NegX => p.x() - mins.x(),
            Face::PosX => maxs.x() - p.x(),
            Face::NegY => p.y() - mins.y(),
            Face::PosY => maxs.y() - p.y(),
            Face::NegZ => p.z() - mins.z(),
            Face::PosZ => maxs.z() - p.z(),
        }
    }

    /// The plane coordinate this face sits at.
    #[inline]
    #[must_use]
    fn plane_coord(self, mins: &Point3, maxs: &Point3) -> Real {
        match self {
            Face::NegX => mins.x(),
            Face::PosX => maxs.x(),
            Face::NegY => mins.y(),
            Face::PosY => maxs.y(),
            Face::NegZ => mins.z(),
            Face::PosZ => maxs.z(),
        }
    }

    #[inline]
    #[must_use]
    const fn index(self) -> usize {
        self as usize
    }
}

/// A polygon vertex carrying, for each face, whether it lies exactly on
/// that face's plane (set when the vertex was introduced by clipping
/// against it).
#[derive(Clone, Copy, Debug)]
struct ClipVertex {
    pos: Point3,
    on_face: [bool; 6],
}

/// Clip a single triangle against a box (given as `mins`/`maxs`), returning
/// the resulting convex polygon fan-triangulated into flat triangles, each
/// keeping the original triangle's normal, plus face tags on every edge
/// that was introduced by (lies exactly on) one of the six clip planes.
///
/// Returns an empty mesh if the triangle lies entirely outside the box.
#[inline]
#[must_use]
pub fn clip_triangle_to_box(tri: &Triangle, mins: &Point3, maxs: &Point3) -> TriangleMesh {
    let mut poly: Vec<ClipVertex> = tri
        .verts()
        .iter()
        .map(|&pos| ClipVertex {
            pos,
            on_face: [false; 6],
        })
        .collect();

    for face in Face::ALL {
        if poly.is_empty() {
            break;
        }
        poly = clip_against_face(&poly, face, mins, maxs);
    }

    let mut mesh = TriangleMesh::new();
    if poly.len() < 3 {
        return mesh;
    }

    // Fan-triangulate the convex polygon from vertex 0.
    for k in 1..poly.len() - 1 {
        let a = poly[0];
        let b = poly[k];
        let c = poly[k + 1];
        let sub = Triangle::new_with_normal([a.pos, b.pos, c.pos], *tri.norm());
        let idx = mesh.push_triangle(sub);
        let base = mesh.tri_indices()[idx];

        tag_if_shared_face(&mut mesh, base[0], base[1], &a, &b, tri.norm());
        tag_if_shared_face(&mut mesh, base[1], base[2], &b, &c, tri.norm());
        tag_if_shared_face(&mut mesh, base[2], base[0], &c, &a, tri.norm());
    }

    mesh
}

/// Tag the mesh edge `(vi, vj)` with every face both `ClipVertex`s agree
/// lies on.
fn tag_if_shared_face(
    mesh: &mut TriangleMesh,
    vi: usize,
    vj: usize,
    a: &ClipVertex,
    b: &ClipVertex,
    source_normal: &Dir3,
) {
    for face in Face::ALL {
        let i = face.index();
        if a.on_face[i] && b.on_face[i] {
            mesh.tag_edge(
                vi,
                vj,
                FaceTag {
                    face: i,
                    source_normal: *source_normal,
                },
            );
        }
    }
}

/// One Sutherland-Hodgman clip pass against a single face's half-space.
fn clip_against_face(
    poly: &[ClipVertex],
    face: Face,
    mins: &Point3,
    maxs: &Point3,
) -> Vec<ClipVertex> {
    let n = poly.len();
    let mut out = Vec::with_capacity(n + 1);

    for i in 0..n {
        let curr = poly[i];
        let prev = poly[(i + n - 1) % n];

        let curr_in = face.inside_value(&curr.pos, mins, maxs) >= 0.0;
        let prev_in = face.inside_value(&prev.pos, mins, maxs) >= 0.0;

        if curr_in {
            if !prev_in {
                out.push(intersect_edge(prev, curr, face, mins, maxs));
            }
            out.push(curr);
        } else if prev_in {
            out.push(intersect_edge(prev, curr, face, mins, maxs));
        }
    }

    out
}

/// Intersect the segment `prev -> curr` with a face's plane, producing a
/// new vertex tagged as lying on that face.
fn intersect_edge(
    prev: ClipVertex,
    curr: ClipVertex,
    face: Face,
    mins: &Point3,
    maxs: &Point3,
) -> ClipVertex {
    let axis = face.axis();
    let plane = face.plane_coord(mins, maxs);

    let p0 = prev.pos[axis];
    let p1 = curr.pos[axis];
    let t = if (p1 - p0).abs() < 1.0e-15 {
        0.5
    } else {
        (plane - p0) / (p1 - p0)
    };
    let t = t.clamp(0.0, 1.0);

    let mut pos = prev.pos;
    for ax in 0..3 {
        pos[ax] = prev.pos[ax] + t * (curr.pos[ax] - prev.pos[ax]);
    }
    pos[axis] = plane;

    let mut on_face = [false; 6];
    on_face[face.index()] = true;
    ClipVertex { pos, on_face }
}
