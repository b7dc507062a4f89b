//! Element ownership and neighbour-walk bookkeeping (spec.md S4.6).
//!
//! Distinct from [`crate::geom::domain`] (the regular background `Grid`):
//! this module owns the *results* of classification/fitting, one [`Element`]
//! per occupied grid cell, addressed by the grid's linear index.

pub mod container;
pub mod element;

pub use self::{container::ElementContainer, element::Element};
