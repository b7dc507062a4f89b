//! Polynomial and quadrature utilities used by the octree seeder and the
//! moment-fitting cubature synthesizer: the shifted-Legendre moment basis
//! (spec.md S4.5) and the fixed Gauss-Legendre/triangle quadrature tables
//! (spec.md S4.4/S4.5).

pub mod gauss;
pub mod legendre;

pub use self::{gauss::*, legendre::*};
