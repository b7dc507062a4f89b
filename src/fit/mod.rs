//! Moment-fitting cubature synthesis for trimmed cells (spec.md S4.5).
//!
//! Combines [`moment`]'s divergence-theorem constant-term assembly with
//! [`nnls`]'s active-set solver inside the 4-step iterative
//! point-elimination loop of spec.md S4.5, including the outer
//! distribution-factor-doubling retry and hard-cutoff rejection.

pub mod moment;
pub mod nnls;

use nalgebra::DVector;

use crate::{
    config::Config,
    core::Real,
    err::Error,
    geom::{octree_seeder::seed_candidate_points, quadrature::IntegrationPoint, shape::Cube, trimmed_domain::TrimmedDomain},
    math::Point3,
};

use self::{
    moment::{assemble_constant_terms, assemble_fitting_matrix},
    nnls::nnls,
};

/// Minimum number of points the elimination loop will leave behind
/// (spec.md S4.5, S9 "EPS1..EPS4" open question: `N_min` kept as a named
/// constant separate from the relative/absolute weight tolerances below).
const N_MIN: usize = 4;

/// Relative weight-pruning tolerance: a point is a candidate for removal
/// once its weight drops below `EPS_REL * max(weights)`.
const EPS_REL: Real = 1.0e-2;

/// Absolute weight-pruning tolerance applied once after elimination
/// converges, discarding points with negligible absolute contribution
/// regardless of the relative-to-max comparison.
const EPS_ABS: Real = 1.0e-13;

/// Hard ceiling on elimination-loop pivots per NNLS refit (spec.md S4.5).
const MAX_ITERATIONS: usize = 1000;

/// Residual above which a cell is rejected outright even after exhausting
/// every distribution-factor retry (spec.md S4.5).
const HARD_CUTOFF: Real = 1.0e-2;

/// Number of times `init_point_distribution_factor` is doubled before
/// giving up (spec.md S4.5).
const MAX_RETRIES: u32 = 4;

/// Synthesize a positive-weight cubature rule for one trimmed cell
/// (spec.md S4.5).
///
/// `param_box` is the cell's parametric-space box (equal to `phys_box`
/// unless `b_spline_mesh` remaps it); the final weights are rescaled by
/// `phys_vol / param_vol` so a caller integrating in parametric measure
/// gets a consistent rule.
///
/// # Errors
/// Returns [`Error::CellRejection`] if no interior candidate points can be
/// seeded, and [`Error::MomentFittingExhausted`] if the residual still
/// exceeds the hard cutoff after every retry.
#[inline]
pub fn fit_trimmed_cell(
    domain: &TrimmedDomain,
    param_box: &Cube,
    orders: (usize, usize, usize),
    config: &Config,
) -> Result<Vec<IntegrationPoint>, Error> {
    let use_six_point = true;
    let (indices, m) = assemble_constant_terms(domain, orders, use_six_point);

    let mut distribution_factor = *config.init_point_distribution_factor() as Real;
    let mut best: Option<(Vec<Point3>, DVector<Real>, Real)> = None;

    for _attempt in 0..=MAX_RETRIES {
        let candidates = seed_candidate_points(domain, orders, distribution_factor, 6);
        if candidates.is_empty() {
            return Err(Error::CellRejection(
                "no interior candidate points seeded for trimmed cell".to_owned(),
            ));
        }

        let (points, weights, r) =
            eliminate(domain.cell_box(), &indices, &m, candidates, *config.moment_fitting_residual())?;

        let improves = best.as_ref().map_or(true, |(_, _, best_r)| r < *best_r);
        if improves {
            best = Some((points, weights, r));
        }
        if r <= *config.moment_fitting_residual() {
            break;
        }
        distribution_factor *= 2.0;
    }

    let (points, weights, r) = best.ok_or(Error::MomentFittingExhausted)?;
    if r > HARD_CUTOFF {
        return Err(Error::MomentFittingExhausted);
    }

    let jacobian = domain.cell_box().vol() / param_box.vol();

    let mut out = Vec::with_capacity(points.len());
    for (p, w) in points.into_iter().zip(weights.iter()) {
        if *w > EPS_ABS {
            out.push(IntegrationPoint::new(p, w * jacobian));
        }
    }
    Ok(out)
}

/// Run the 4-step iterative point-elimination loop (spec.md S4.5) starting
/// from `candidates`, returning the surviving points, their fitted weights,
/// and the normalized residual `r = ||Aw - m|| / N`.
fn eliminate(
    cell: &Cube,
    indices: &[(usize, usize, usize)],
    m: &DVector<Real>,
    mut active: Vec<Point3>,
    r_target: Real,
) -> Result<(Vec<Point3>, DVector<Real>, Real), Error> {
    let num_moments = indices.len() as Real;
    let n_target = indices.len();
    let mut last_good: Option<(Vec<Point3>, DVector<Real>, Real)> = None;

    for iteration in 0..MAX_ITERATIONS {
        let a = assemble_fitting_matrix(&active, cell, indices);
        let sol = nnls(&a, m, 1.0e-12, 3 * active.len().max(1));
        let r = sol.residual / num_moments;

        if iteration == 0 {
            // Step 2 (spec.md S4.5): the first iteration only ever
            // truncates to the N points with the largest fitted weight; it
            // does not check `r_target` or touch `last_good` yet.
            if active.len() > n_target {
                let mut order: Vec<usize> = (0..active.len()).collect();
                order.sort_by(|&i, &j| {
                    sol.weights[j]
                        .partial_cmp(&sol.weights[i])
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                order.truncate(n_target);
                active = order.into_iter().map(|i| active[i]).collect();
            }
            continue;
        }

        if r > r_target {
            break;
        }
        last_good = Some((active.clone(), sol.weights.clone(), r));

        if active.len() <= N_MIN {
            break;
        }

        let max_w = sol.weights.iter().cloned().fold(0.0_f64, Real::max);
        let mut kept = Vec::with_capacity(active.len());
        let mut removed_any = false;
        for (idx, p) in active.iter().enumerate() {
            if sol.weights[idx] < EPS_REL * max_w {
                removed_any = true;
            } else {
                kept.push(*p);
            }
        }

        if !removed_any {
            if let Some(min_idx) = (0..active.len()).min_by(|&i, &j| {
                sol.weights[i]
                    .partial_cmp(&sol.weights[j])
                    .unwrap_or(std::cmp::Ordering::Equal)
            }) {
                kept = active
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != min_idx)
                    .map(|(_, p)| *p)
                    .collect();
            } else {
                break;
            }
        }

        if kept.len() >= active.len() || kept.is_empty() {
            break;
        }
        active = kept;
    }

    last_good.ok_or(Error::MomentFittingExhausted)
}
