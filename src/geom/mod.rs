//! Geometry module: shapes, ray-tracing primitives, the AABB tree, the
//! B-Rep inside/outside oracle, clipping, trimmed domains, the octree
//! seeder, and the regular background grid.

pub mod brep;
pub mod clip;
pub mod domain;
pub mod octree_seeder;
pub mod properties;
pub mod quadrature;
pub mod rt;
pub mod shape;
pub mod trimmed_domain;

pub use self::{
    brep::*, clip::*, domain::*, octree_seeder::*, properties::*, quadrature::*, rt::*, shape::*,
    trimmed_domain::*,
};
