//! Unit vector module.

pub mod dir3;

pub use self::dir3::*;
