//! General utility module.

pub mod index;
pub mod progress_bar;
pub mod range;

pub use self::{index::*, progress_bar::*, range::*};
