//! Ordering and indexing.
//!
//! Small fixed-arity index types used to keep Cartesian-axis bookkeeping
//! consistent across the grid, mesh and linear-algebra modules, plus the
//! `Build` trait shared by every JSON5-loaded configuration type.

pub mod build;
pub mod cartesian;

pub use self::{build::*, cartesian::*};
