//! File I/O: STL surface mesh ingestion/export and VTK debug dumps.
//!
//! Both are thin, format-translation-only wrappers (spec.md S1: "out of
//! scope beyond the interface boundary") — `stl` talks to [`TriangleMesh`],
//! `vtk` talks to [`crate::domain::ElementContainer`] and
//! [`crate::geom::trimmed_domain::TrimmedDomain`], and neither module
//! participates in classification or fitting.

pub mod stl;
pub mod vtk;
