//! Shared geometric property traits.
//!
//! Implemented by the triangle, AABB cube and mesh types so the AABB tree
//! and the inside/outside oracle can stay generic over shape.

pub mod collide;
pub mod trace;

pub use self::{collide::*, trace::*};
