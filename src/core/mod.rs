//! Core numeric aliases and tolerances shared across the crate.

/// Real-number type used throughout the geometry and fitting pipeline.
pub type Real = f64;

/// Index of the first vertex of a triangle.
pub const ALPHA: usize = 0;
/// Index of the second vertex of a triangle.
pub const BETA: usize = 1;
/// Index of the third vertex of a triangle.
pub const GAMMA: usize = 2;

/// Barycentric-coordinate slack tolerated when deciding a ray hit lies
/// within a triangle (Moller-Trumbore numerator/denominator checks).
pub const EPS_BARY: Real = 1.0e-9;

/// Distance below which a ray origin is considered coincident with a
/// mesh vertex or edge, triggering a re-cast with a perturbed direction.
pub const EPS_ORIGIN: Real = 1.0e-9;

/// Distance under which two coordinates are treated as equal when
/// snapping clipped-polygon vertices back onto a cutting plane.
pub const SNAPTOL: Real = 1.0e-10;
