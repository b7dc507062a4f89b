//! The run driver (spec.md S4.7): classify every background cell against
//! the B-Rep, build and moment-fit a cubature rule for every occupied
//! cell, fold `Inside` cells into reduced generalized-Gaussian strip rules
//! when a `GGQ_*` integration method is configured, then clip the
//! surviving trimmed surfaces against any configured boundary-condition
//! patches.

pub mod driver;
pub mod reduced;

use crate::{
    config::Config,
    core::Real,
    domain::ElementContainer,
    err::Error,
    geom::{brep::BRep, domain::Grid, shape::TriangleMesh},
};

/// Summary counters over one run's classify phase (spec.md S4.7).
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineStats {
    /// Cells classified entirely outside the solid.
    pub num_outside: usize,
    /// Cells classified entirely inside the solid.
    pub num_inside: usize,
    /// Cells the solid's boundary crosses.
    pub num_trimmed: usize,
    /// Trimmed cells rejected during the build/fit phase.
    pub num_rejected: usize,
}

/// Result of a complete pipeline run.
pub struct PipelineOutput {
    /// Every published element, keyed by linear grid index.
    pub container: ElementContainer,
    /// Classify-phase counters.
    pub stats: PipelineStats,
    /// Accumulated boundary-condition surfaces, `(source filename, mesh)`.
    pub boundary_conditions: Vec<(String, TriangleMesh)>,
}

/// Run the full pipeline: classify, build+fit+publish, then boundary-
/// condition clipping (spec.md S4.7).
///
/// # Errors
/// Propagates any [`Error`] raised while loading a boundary-condition STL
/// surface, plus the first fatal per-cell error raised during the
/// build/fit phase: a strict-policy cap-closure failure or a
/// moment-fitting exhaustion (spec.md S6).
pub fn run(
    surface: TriangleMesh,
    boundary_condition_paths: &[std::path::PathBuf],
    config: &Config,
) -> Result<PipelineOutput, Error> {
    let brep = BRep::new(surface);

    let (phys_lo, phys_hi) = config.physical_bounds();
    let (param_lo, param_hi) = config.parametric_bounds();
    let res = *config.number_of_elements();

    let phys_grid = Grid::new(crate::geom::shape::Cube::new(phys_lo, phys_hi), res);
    let param_grid = Grid::new(crate::geom::shape::Cube::new(param_lo, param_hi), res);

    const SHRINK_TAU: Real = 0.0;
    let classes = if *config.embedding_flag() {
        driver::classify_phase(&brep, &phys_grid, SHRINK_TAU)
    } else {
        log::info!("embedding_flag is false: skipping the classifier, every cell is Inside");
        vec![crate::geom::brep::CellClass::Inside; phys_grid.num_cells()]
    };

    let mut stats = PipelineStats::default();
    for class in &classes {
        match class {
            crate::geom::brep::CellClass::Outside => stats.num_outside += 1,
            crate::geom::brep::CellClass::Inside => stats.num_inside += 1,
            crate::geom::brep::CellClass::Trimmed => stats.num_trimmed += 1,
        }
    }

    let (mut container, num_rejected) =
        driver::build_fit_publish_phase(&brep, &phys_grid, &param_grid, &classes, config)?;
    stats.num_rejected = num_rejected;

    reduced::reduce_inside_cells(&mut container, config.orders(), config)?;

    let mut bc_surfaces = Vec::with_capacity(boundary_condition_paths.len());
    for path in boundary_condition_paths {
        let mesh = crate::io::stl::load_mesh(path)?;
        bc_surfaces.push((
            path.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            mesh,
        ));
    }
    let boundary_conditions = driver::clip_boundary_conditions(&container, &bc_surfaces);

    Ok(PipelineOutput {
        container,
        stats,
        boundary_conditions,
    })
}
