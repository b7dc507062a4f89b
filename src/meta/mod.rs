//! Boilerplate-reducing macros.

pub mod access;
pub mod clone;
pub mod fmt_report;
