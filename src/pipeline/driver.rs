//! Thread/block-based phase implementations, grounded on
//! `sim::run::multi_thread`/`thread`'s pattern: a shared, mutex-guarded
//! [`ProgressBar`] hands out index blocks to a fixed rayon thread pool, and
//! workers batch their results locally before taking the (coarse,
//! spec.md S9-sanctioned) container lock to publish them.

use std::sync::{Arc, Mutex};

use rayon::prelude::*;

use crate::{
    config::Config,
    core::Real,
    domain::{Element, ElementContainer},
    err::Error,
    geom::{
        brep::{BRep, CellClass},
        domain::Grid,
        quadrature::IntegrationPoint,
        shape::{Cube, TriangleMesh},
        Collide,
    },
    math::{poly::tensor_gauss_3d, Point3},
    tools::{index::linear_to_three_dim, progress_bar::ProgressBar},
};

/// Cells handed to a worker per `ProgressBar::block` request.
const CLASSIFY_BLOCK_SIZE: usize = 64;
/// Cells handed to a worker per `ProgressBar::block` request in the
/// build/fit/publish phase (smaller: the per-cell work is far more
/// expensive here).
const FIT_BLOCK_SIZE: usize = 8;

/// Phase 1 (spec.md S4.7): classify every background cell against the
/// B-Rep, in parallel, returning one [`CellClass`] per linear grid index.
#[must_use]
pub fn classify_phase(brep: &BRep, grid: &Grid, tau: Real) -> Vec<CellClass> {
    let total = grid.num_cells();
    let pb = Arc::new(Mutex::new(ProgressBar::new("classify", total)));
    let results: Mutex<Vec<(usize, CellClass)>> = Mutex::new(Vec::with_capacity(total));

    let num_threads = num_cpus::get();
    (0..num_threads).into_par_iter().for_each(|_| {
        let mut local = Vec::new();
        loop {
            let block = {
                let mut guard = pb.lock().expect("poisoned progress-bar lock");
                guard.block(CLASSIFY_BLOCK_SIZE)
            };
            let Some((start, end)) = block else {
                break;
            };
            for id in start..end {
                let grid_index = linear_to_three_dim(id, grid.res());
                let cell = grid.gen_voxel(&grid_index);
                local.push((id, brep.classify_cell(&cell, tau)));
            }
        }
        results.lock().expect("poisoned results lock").append(&mut local);
    });

    pb.lock().expect("poisoned progress-bar lock").finish_with_message("classify: done");

    let mut out = vec![CellClass::Outside; total];
    for (id, class) in results.into_inner().expect("poisoned results lock") {
        out[id] = class;
    }
    out
}

/// Phase 2 (spec.md S4.7): for every occupied cell, build (and for
/// `Trimmed` cells, moment-fit) its cubature rule, publishing the result
/// into a shared [`ElementContainer`]. Returns the container plus the
/// number of trimmed cells rejected along the way.
///
/// # Errors
/// Returns the first [`Error::CellRejection`] raised while a cell's
/// cap-loop assembly fails under the strict (non-`neglect_flawed`) policy
/// (spec.md S6 "exit status ... non-zero when a closed trimmed-domain cap
/// cannot be constructed and the strict policy is selected"). Other cells'
/// workers keep running to completion before the error is surfaced, since
/// rayon gives no cheap way to cancel in-flight work early.
pub fn build_fit_publish_phase(
    brep: &BRep,
    phys_grid: &Grid,
    param_grid: &Grid,
    classes: &[CellClass],
    config: &Config,
) -> Result<(ElementContainer, usize), Error> {
    let total = classes.len();
    let pb = Arc::new(Mutex::new(ProgressBar::new("build+fit", total)));
    let container = Arc::new(Mutex::new(ElementContainer::new(*phys_grid.res())));
    let rejected = Arc::new(Mutex::new(0_usize));
    let fatal: Arc<Mutex<Option<Error>>> = Arc::new(Mutex::new(None));

    let num_threads = num_cpus::get();
    (0..num_threads).into_par_iter().for_each(|_| {
        let mut batch: Vec<Element> = Vec::with_capacity(FIT_BLOCK_SIZE);
        loop {
            let block = {
                let mut guard = pb.lock().expect("poisoned progress-bar lock");
                guard.block(FIT_BLOCK_SIZE)
            };
            let Some((start, end)) = block else {
                break;
            };

            for id in start..end {
                let grid_index = linear_to_three_dim(id, phys_grid.res());
                let phys_box = phys_grid.gen_voxel(&grid_index);
                let param_box = param_grid.gen_voxel(&grid_index);
                let class = classes[id];

                let mut element = Element::new(id, grid_index, phys_box, param_box, class);
                build_one(brep, &mut element, &phys_box, &param_box, config, &rejected, &fatal);
                batch.push(element);
            }

            flush(&container, &mut batch);
        }
        flush(&container, &mut batch);
    });

    pb.lock().expect("poisoned progress-bar lock").finish_with_message("build+fit: done");

    if let Some(e) = fatal.lock().expect("poisoned fatal-error lock").take() {
        return Err(e);
    }

    let container = Arc::try_unwrap(container)
        .unwrap_or_else(|_| panic!("element container still shared after pipeline join"))
        .into_inner()
        .expect("poisoned container lock");
    let rejected = *rejected.lock().expect("poisoned rejected-count lock");

    Ok((container, rejected))
}

fn flush(container: &Arc<Mutex<ElementContainer>>, batch: &mut Vec<Element>) {
    if batch.is_empty() {
        return;
    }
    let mut guard = container.lock().expect("poisoned container lock");
    for element in batch.drain(..) {
        guard.insert(element);
    }
}

/// Builds one element's cubature rule. A [`CellClass::Trimmed`] cell whose
/// domain construction fails under the strict policy, or whose
/// moment-fitting exhausts its retries, is a fatal error (spec.md S6): the
/// first one seen is recorded in `fatal` and surfaces once every worker has
/// drained its queue. The permissive (`neglect_flawed = true`) cap-loop
/// failure and the min-volume-ratio rejection both come back as `Ok(None)`
/// from `build_trimmed_domain` and are counted in `rejected` instead.
fn build_one(
    brep: &BRep,
    element: &mut Element,
    phys_box: &Cube,
    param_box: &Cube,
    config: &Config,
    rejected: &Arc<Mutex<usize>>,
    fatal: &Arc<Mutex<Option<Error>>>,
) {
    match element.class() {
        CellClass::Outside => {}
        CellClass::Inside => {
            element.publish(gauss_cell_rule(phys_box, config.orders()));
        }
        CellClass::Trimmed => {
            match brep.build_trimmed_domain(
                phys_box,
                *config.min_element_volume_ratio(),
                *config.neglect_elements_if_mesh_is_flawed(),
            ) {
                Ok(Some(domain)) => {
                    match crate::fit::fit_trimmed_cell(&domain, param_box, config.orders(), config) {
                        Ok(points) => {
                            element.publish(points);
                            element.set_trimmed_domain(domain);
                        }
                        Err(e) => {
                            log::error!("element {}: moment fitting failed fatally: {e}", element.id());
                            let mut guard = fatal.lock().expect("poisoned fatal-error lock");
                            if guard.is_none() {
                                *guard = Some(e);
                            }
                        }
                    }
                }
                Ok(None) => {
                    *rejected.lock().expect("poisoned rejected-count lock") += 1;
                }
                Err(e) => {
                    log::error!("element {}: trimmed-domain construction failed fatally: {e}", element.id());
                    let mut guard = fatal.lock().expect("poisoned fatal-error lock");
                    if guard.is_none() {
                        *guard = Some(e);
                    }
                }
            }
        }
    }
}

/// Plain tensor-product Gauss-Legendre rule for a fully-`Inside` cell
/// (spec.md S4.4/S6 `integration_method = Gauss`).
#[must_use]
fn gauss_cell_rule(cell: &Cube, orders: (usize, usize, usize)) -> Vec<IntegrationPoint> {
    let points_per_axis = [orders.0 + 1, orders.1 + 1, orders.2 + 1];
    let mins = *cell.mins();
    let widths = cell.widths();
    let vol = cell.vol();

    tensor_gauss_3d(points_per_axis)
        .into_iter()
        .map(|tp| {
            let pos = Point3::new(
                mins.x() + tp.local.0 * widths.x(),
                mins.y() + tp.local.1 * widths.y(),
                mins.z() + tp.local.2 * widths.z(),
            );
            IntegrationPoint::new(pos, tp.weight * vol)
        })
        .collect()
}

/// Phase 3 (spec.md S4.7): for every configured boundary-condition surface,
/// clip its surface against every occupied cell box and accumulate the
/// resulting local meshes into that condition's per-cell conforming mesh.
/// Reuses the same per-cell clip routine
/// (`geom::clip::clip_triangle_to_box`) that Phase 2 uses to build each
/// trimmed cell's solid-surface domain.
#[must_use]
pub fn clip_boundary_conditions(
    container: &ElementContainer,
    bc_surfaces: &[(String, TriangleMesh)],
) -> Vec<(String, TriangleMesh)> {
    bc_surfaces
        .iter()
        .map(|(name, bc_mesh)| {
            let mut accum = TriangleMesh::new();
            if bc_mesh.num_tris() == 0 {
                return (name.clone(), accum);
            }
            let bc_tree = crate::geom::domain::Tree::build(bc_mesh);

            for element in container.iter() {
                let cell = element.phys_box();
                let mut ids = Vec::new();
                bc_tree.query_box(cell, &mut ids);
                let (mins, maxs) = cell.mins_maxs();
                for id in ids {
                    let tri = bc_mesh.triangle(id);
                    if !tri.overlap(cell) {
                        continue;
                    }
                    accum.extend(&crate::geom::clip::clip_triangle_to_box(&tri, &mins, &maxs));
                }
            }

            (name.clone(), accum)
        })
        .collect()
}
