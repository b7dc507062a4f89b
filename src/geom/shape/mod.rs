//! Geometric primitives: the AABB cube, flat triangles, and the indexed
//! triangle mesh built from them.

pub mod cube;
pub mod triangle;
pub mod triangle_mesh;

pub use self::{cube::*, triangle::*, triangle_mesh::*};
