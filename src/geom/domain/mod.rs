//! Spatial-domain module: the regular background grid and the AABB tree
//! built over a surface mesh's triangles.

pub mod grid;
pub mod tree;

pub use self::{grid::*, tree::*};
