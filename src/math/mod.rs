//! Mathematics module.

pub mod linalg;
pub mod poly;

pub use self::linalg::*;
