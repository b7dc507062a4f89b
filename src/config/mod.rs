//! Run configuration: the flat name→typed-value option table of spec.md S6,
//! loaded from a JSON5 parameter file the same way
//! `sim::param::ParametersBuilder` loads a simulation's settings.

use crate::{
    access, fmt_report,
    err::Error,
    math::Point3,
    ord::Build,
};
use arctk_attr::file;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

// `#[file]` (arctk_attr) derives `Serialize`/`Deserialize` itself for the
// struct it decorates; `IntegrationMethod` is a plain nested enum field so
// it still needs the explicit derive below.

/// Cubature strategy selected for Inside/Trimmed cells (spec.md S6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationMethod {
    /// Plain tensor-product Gauss-Legendre rule, per cell.
    Gauss,
    /// Moment-fitted NNLS rule with no multi-cell reduction.
    GgqOptimal,
    /// Generalized-Gaussian rule reduced along one strip axis.
    GgqReduced1,
    /// Generalized-Gaussian rule reduced along two strip axes.
    GgqReduced2,
}

/// Not-yet-validated run configuration, deserialised directly from a JSON5
/// parameter file (spec.md S6's option table).
#[file]
#[derive(Clone)]
pub struct ConfigBuilder {
    /// Path to the primary STL surface.
    input_filename: String,
    /// Paths to optional additional boundary-condition STL surfaces.
    #[serde(default)]
    boundary_condition_filenames: Vec<String>,
    /// Physical lower bound of the background grid.
    lower_bound_xyz: [f64; 3],
    /// Physical upper bound of the background grid.
    upper_bound_xyz: [f64; 3],
    /// Parametric lower bound, defaulting to `lower_bound_xyz` if absent.
    #[serde(default)]
    lower_bound_uvw: Option<[f64; 3]>,
    /// Parametric upper bound, defaulting to `upper_bound_xyz` if absent.
    #[serde(default)]
    upper_bound_uvw: Option<[f64; 3]>,
    /// Grid resolution per axis.
    number_of_elements: [usize; 3],
    /// Tensor polynomial degree per axis, each in `1..=4`.
    polynomial_order: [usize; 3],
    /// Cubature strategy.
    #[serde(default = "default_integration_method")]
    integration_method: IntegrationMethod,
    /// If false, every cell is treated as Inside (the classifier is skipped).
    #[serde(default = "default_true")]
    embedding_flag: bool,
    /// Trimmed-cell rejection threshold `rho`.
    #[serde(default = "default_min_element_volume_ratio")]
    min_element_volume_ratio: f64,
    /// Lower bound on surface-integration sampling per cell.
    #[serde(default = "default_min_num_boundary_triangles")]
    min_num_boundary_triangles: usize,
    /// `r_target` of spec.md S4.5.
    #[serde(default = "default_moment_fitting_residual")]
    moment_fitting_residual: f64,
    /// Initial octree-seeding multiplier.
    #[serde(default = "default_init_point_distribution_factor")]
    init_point_distribution_factor: usize,
    /// Skip (true) vs fail (false) on cap-closure failure.
    #[serde(default = "default_true")]
    neglect_elements_if_mesh_is_flawed: bool,
    /// Enables the per-cell parametric (IGA) mapping.
    #[serde(default)]
    b_spline_mesh: bool,
    /// Logging verbosity.
    #[serde(default)]
    echo_level: usize,
    /// Debug VTK output directory; empty disables all debug output.
    #[serde(default)]
    output_directory_name: String,
}

const fn default_true() -> bool {
    true
}

const fn default_integration_method() -> IntegrationMethod {
    IntegrationMethod::Gauss
}

const fn default_min_element_volume_ratio() -> f64 {
    1.0e-3
}

const fn default_min_num_boundary_triangles() -> usize {
    64
}

const fn default_moment_fitting_residual() -> f64 {
    1.0e-10
}

const fn default_init_point_distribution_factor() -> usize {
    2
}

impl ConfigBuilder {
    /// Construct a builder from the required options, defaulting every
    /// optional one (spec.md S6).
    #[inline]
    #[must_use]
    pub fn new(
        input_filename: String,
        lower_bound_xyz: [f64; 3],
        upper_bound_xyz: [f64; 3],
        number_of_elements: [usize; 3],
        polynomial_order: [usize; 3],
        integration_method: IntegrationMethod,
    ) -> Self {
        Self {
            input_filename,
            boundary_condition_filenames: Vec::new(),
            lower_bound_xyz,
            upper_bound_xyz,
            lower_bound_uvw: None,
            upper_bound_uvw: None,
            number_of_elements,
            polynomial_order,
            integration_method,
            embedding_flag: default_true(),
            min_element_volume_ratio: default_min_element_volume_ratio(),
            min_num_boundary_triangles: default_min_num_boundary_triangles(),
            moment_fitting_residual: default_moment_fitting_residual(),
            init_point_distribution_factor: default_init_point_distribution_factor(),
            neglect_elements_if_mesh_is_flawed: default_true(),
            b_spline_mesh: false,
            echo_level: 0,
            output_directory_name: String::new(),
        }
    }
}

impl Build for ConfigBuilder {
    type Inst = Config;

    #[inline]
    fn build(self) -> Result<Config, Error> {
        if self.input_filename.trim().is_empty() {
            return Err(Error::Config("input_filename must not be empty".to_owned()));
        }
        for axis in 0..3 {
            if self.lower_bound_xyz[axis] >= self.upper_bound_xyz[axis] {
                return Err(Error::Config(format!(
                    "lower_bound_xyz must be strictly less than upper_bound_xyz on axis {axis}"
                )));
            }
            if self.number_of_elements[axis] == 0 {
                return Err(Error::Config(format!(
                    "number_of_elements must be positive on axis {axis}"
                )));
            }
            if !(1..=4).contains(&self.polynomial_order[axis]) {
                return Err(Error::Config(format!(
                    "polynomial_order must be in 1..=4 on axis {axis}, got {}",
                    self.polynomial_order[axis]
                )));
            }
        }
        if self.min_element_volume_ratio < 0.0 {
            return Err(Error::Config(
                "min_element_volume_ratio must be non-negative".to_owned(),
            ));
        }

        let lower_bound_uvw = self.lower_bound_uvw.unwrap_or(self.lower_bound_xyz);
        let upper_bound_uvw = self.upper_bound_uvw.unwrap_or(self.upper_bound_xyz);
        for axis in 0..3 {
            if lower_bound_uvw[axis] >= upper_bound_uvw[axis] {
                return Err(Error::Config(format!(
                    "lower_bound_uvw must be strictly less than upper_bound_uvw on axis {axis}"
                )));
            }
        }

        Ok(Config {
            input_filename: self.input_filename,
            boundary_condition_filenames: self.boundary_condition_filenames,
            lower_bound_xyz: self.lower_bound_xyz,
            upper_bound_xyz: self.upper_bound_xyz,
            lower_bound_uvw,
            upper_bound_uvw,
            number_of_elements: self.number_of_elements,
            polynomial_order: self.polynomial_order,
            integration_method: self.integration_method,
            embedding_flag: self.embedding_flag,
            min_element_volume_ratio: self.min_element_volume_ratio,
            min_num_boundary_triangles: self.min_num_boundary_triangles,
            moment_fitting_residual: self.moment_fitting_residual,
            init_point_distribution_factor: self.init_point_distribution_factor,
            neglect_elements_if_mesh_is_flawed: self.neglect_elements_if_mesh_is_flawed,
            b_spline_mesh: self.b_spline_mesh,
            echo_level: self.echo_level,
            output_directory_name: self.output_directory_name,
        })
    }
}

impl Display for ConfigBuilder {
    #[inline]
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), std::fmt::Error> {
        writeln!(fmt, "...")?;
        fmt_report!(fmt, &self.input_filename, "input_filename");
        fmt_report!(fmt, format!("{:?}", self.number_of_elements), "number_of_elements");
        fmt_report!(fmt, format!("{:?}", self.polynomial_order), "polynomial_order");
        fmt_report!(fmt, format!("{:?}", self.integration_method), "integration_method");
        Ok(())
    }
}

/// Validated run configuration (spec.md S6).
#[derive(Clone)]
pub struct Config {
    input_filename: String,
    boundary_condition_filenames: Vec<String>,
    lower_bound_xyz: [f64; 3],
    upper_bound_xyz: [f64; 3],
    lower_bound_uvw: [f64; 3],
    upper_bound_uvw: [f64; 3],
    number_of_elements: [usize; 3],
    polynomial_order: [usize; 3],
    integration_method: IntegrationMethod,
    embedding_flag: bool,
    min_element_volume_ratio: f64,
    min_num_boundary_triangles: usize,
    moment_fitting_residual: f64,
    init_point_distribution_factor: usize,
    neglect_elements_if_mesh_is_flawed: bool,
    b_spline_mesh: bool,
    echo_level: usize,
    output_directory_name: String,
}

impl Config {
    access!(input_filename: String);
    access!(boundary_condition_filenames: Vec<String>);
    access!(number_of_elements: [usize; 3]);
    access!(polynomial_order: [usize; 3]);
    access!(integration_method: IntegrationMethod);
    access!(embedding_flag: bool);
    access!(min_element_volume_ratio: f64);
    access!(min_num_boundary_triangles: usize);
    access!(moment_fitting_residual: f64);
    access!(init_point_distribution_factor: usize);
    access!(neglect_elements_if_mesh_is_flawed: bool);
    access!(b_spline_mesh: bool);
    access!(echo_level: usize);
    access!(output_directory_name: String);

    /// The physical grid boundary as a `(lower, upper)` point pair.
    #[inline]
    #[must_use]
    pub fn physical_bounds(&self) -> (Point3, Point3) {
        (Point3::new(
            self.lower_bound_xyz[0],
            self.lower_bound_xyz[1],
            self.lower_bound_xyz[2],
        ), Point3::new(
            self.upper_bound_xyz[0],
            self.upper_bound_xyz[1],
            self.upper_bound_xyz[2],
        ))
    }

    /// The parametric grid boundary as a `(lower, upper)` point pair
    /// (equal to the physical bounds unless `lower/upper_bound_uvw` was set).
    #[inline]
    #[must_use]
    pub fn parametric_bounds(&self) -> (Point3, Point3) {
        (Point3::new(
            self.lower_bound_uvw[0],
            self.lower_bound_uvw[1],
            self.lower_bound_uvw[2],
        ), Point3::new(
            self.upper_bound_uvw[0],
            self.upper_bound_uvw[1],
            self.upper_bound_uvw[2],
        ))
    }

    /// Tensor polynomial order as a `(p_u, p_v, p_w)` triple.
    #[inline]
    #[must_use]
    pub const fn orders(&self) -> (usize, usize, usize) {
        (
            self.polynomial_order[0],
            self.polynomial_order[1],
            self.polynomial_order[2],
        )
    }
}
