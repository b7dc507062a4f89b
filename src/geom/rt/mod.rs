//! Ray-tracing primitives module.
//!
//! Shared by both the inside/outside oracle (casting through the surface
//! mesh) and the AABB tree traversal (casting through grid cells).

pub mod ray;
pub mod side;

pub use self::{ray::*, side::*};
