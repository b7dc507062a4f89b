//! Non-negative least squares via the classical Lawson-Hanson active-set
//! algorithm (spec.md S4.5, S9: "NNLS is a black-box numerical kernel").
//!
//! Solves `min_{w >= 0} ||Aw - b||` for a dense `A` built from the moment
//! basis evaluated at the candidate quadrature points.

use nalgebra::{DMatrix, DVector};

use crate::core::Real;

/// Outcome of one NNLS solve: the non-negative weight vector and the
/// residual norm `||Aw - b||` actually achieved.
pub struct NnlsSolution {
    /// Solution weights, one per column of `a`. Always `>= 0`.
    pub weights: DVector<Real>,
    /// Achieved residual norm.
    pub residual: Real,
}

/// Solve `min_{w >= 0} ||a*w - b||_2` with the Lawson-Hanson active-set
/// method.
///
/// `tol` gates both the dual-feasibility stopping test (on the gradient
/// `a^T(b - a*w)`) and the numerical rank used by the passive-set
/// sub-solves. `max_iter` caps the number of active-set pivots; a
/// conservative default (used by callers that do not have a better bound)
/// is `3 * a.ncols()`.
#[inline]
#[must_use]
pub fn nnls(a: &DMatrix<Real>, b: &DVector<Real>, tol: Real, max_iter: usize) -> NnlsSolution {
    let n = a.ncols();
    let mut x = DVector::<Real>::zeros(n);
    let mut passive = vec![false; n];

    if n == 0 {
        return NnlsSolution {
            weights: x,
            residual: b.norm(),
        };
    }

    let mut iter = 0;
    loop {
        let residual_vec = b - a * &x;
        let gradient = a.transpose() * &residual_vec;

        let mut best_idx: Option<usize> = None;
        let mut best_val = tol;
        for j in 0..n {
            if passive[j] {
                continue;
            }
            if gradient[j] > best_val {
                best_val = gradient[j];
                best_idx = Some(j);
            }
        }

        let Some(enter) = best_idx else {
            break;
        };
        if iter >= max_iter {
            break;
        }
        iter += 1;
        passive[enter] = true;

        loop {
            let cols: Vec<usize> = (0..n).filter(|&j| passive[j]).collect();
            let sub = a.select_columns(&cols);
            let solved = match sub.clone().pseudo_inverse(1.0e-12) {
                Ok(pinv) => pinv * b,
                Err(_) => break,
            };

            if solved.iter().all(|&v| v > 0.0) {
                for (k, &j) in cols.iter().enumerate() {
                    x[j] = solved[k];
                }
                for j in 0..n {
                    if !passive[j] {
                        x[j] = 0.0;
                    }
                }
                break;
            }

            let mut alpha = Real::MAX;
            for (k, &j) in cols.iter().enumerate() {
                if solved[k] <= 0.0 {
                    let denom = x[j] - solved[k];
                    if denom > 0.0 {
                        alpha = alpha.min(x[j] / denom);
                    }
                }
            }
            if !alpha.is_finite() || alpha < 0.0 {
                alpha = 0.0;
            }

            for (k, &j) in cols.iter().enumerate() {
                x[j] += alpha * (solved[k] - x[j]);
            }
            for j in 0..n {
                if passive[j] && x[j].abs() < 1.0e-12 {
                    passive[j] = false;
                    x[j] = 0.0;
                }
            }

            if iter >= max_iter {
                break;
            }
            iter += 1;
        }

        if iter >= max_iter {
            break;
        }
    }

    let residual = (a * &x - b).norm();
    NnlsSolution { weights: x, residual }
}
