//! Error handling.

use thiserror;

/// Error enumeration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Description error.
    #[error("Text error: {0}")]
    Text(String),
    /// Parallelisation poison.
    #[error("Parallelisation poison.")]
    Parallel,
    /// Formatting error.
    #[error("Formatting")]
    Format(#[from] std::fmt::Error),
    /// File loading error.
    #[error("File loading")]
    LoadFile(#[from] std::io::Error),
    /// Integer parsing error.
    #[error("Integer parsing")]
    ParseInt(#[from] std::num::ParseIntError),
    /// Float parsing error.
    #[error("Float parsing")]
    ParseFloat(#[from] std::num::ParseFloatError),
    /// Json reading error.
    #[error("Json reading")]
    ReadJson(#[from] json5::Error),
    /// Json writing error.
    #[error("Json writing")]
    WriteJson(#[from] serde_json::Error),
    /// STL mesh read/write error.
    #[error("STL mesh IO: {0}")]
    Stl(String),
    /// VTK debug-dump write error.
    #[error("VTK write: {0}")]
    Vtk(String),
    /// The surface mesh failed a watertightness or orientation check.
    #[error("Invalid surface mesh: {0}")]
    InvalidMesh(String),
    /// A ray cast used by the inside/outside oracle repeatedly hit mesh
    /// degeneracies (grazing or vertex/edge incidence) even after
    /// perturbation retries; the cell is conservatively classified `Outside`.
    #[error("Ray-cast oracle exhausted retries at a degenerate direction")]
    DegenerateRayCast,
    /// A trimmed cell's clipped domain was rejected (near-zero volume,
    /// self-intersecting cap, or too few facets to be watertight).
    #[error("Trimmed cell rejected: {0}")]
    CellRejection(String),
    /// Moment-fitting/NNLS failed to reach the target residual within the
    /// configured candidate-point budget.
    #[error("Moment-fitting exhausted candidate points before meeting residual tolerance")]
    MomentFittingExhausted,
    /// A structural invariant (e.g. a non-positive cubature weight escaping
    /// the elimination loop) was violated; this indicates a logic defect
    /// rather than a malformed input.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
    /// Configuration file failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Wrapper for error variants originating from third-party crates used
    /// only ad hoc.
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

unsafe impl Send for Error {}
unsafe impl Sync for Error {}

impl From<&str> for Error {
    #[inline]
    fn from(err: &str) -> Self {
        Self::Text(err.to_owned())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::from(err.as_str())
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    #[inline]
    fn from(_e: std::sync::PoisonError<T>) -> Self {
        Self::Parallel
    }
}
