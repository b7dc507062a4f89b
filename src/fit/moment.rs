//! Constant-term and fitting-matrix assembly for moment fitting
//! (spec.md S4.5).
//!
//! Every basis function is evaluated at the cell-local fractional
//! coordinate `u = (p - cell.mins) / cell.widths`, so the shifted-Legendre
//! recurrence always sees an argument in `[0, 1]` regardless of the cell's
//! physical size. The constant-term vector field is scaled per axis by the
//! matching cell width so its divergence reduces exactly to the tensor
//! basis function itself (no leftover `1/width` factor from the chain rule):
//!
//! `F = (w_x * Phi_a(u_x) L_b(u_y) L_g(u_z),`
//! `    w_y * L_a(u_x) Phi_b(u_y) L_g(u_z),`
//! `    w_z * L_a(u_x) L_b(u_y) Phi_g(u_z))`
//!
//! so `m_{a,b,g} = (1/3) ∮_∂D F . n dS = ∫_D phi_{a,b,g}(u(x)) dV` directly in
//! physical volume units.

use nalgebra::{DMatrix, DVector};

use crate::{
    core::Real,
    geom::{shape::Cube, trimmed_domain::TrimmedDomain},
    math::{
        poly::legendre::{moment_basis, moment_indices, shifted_legendre, shifted_legendre_antideriv},
        Point3, Vec3,
    },
};

/// Cell-local fractional coordinate of `p` within `cell`.
#[inline]
#[must_use]
pub fn local_fraction(p: &Point3, cell: &Cube) -> (Real, Real, Real) {
    let mins = *cell.mins();
    let widths = cell.widths();
    (
        (p.x() - mins.x()) / widths.x(),
        (p.y() - mins.y()) / widths.y(),
        (p.z() - mins.z()) / widths.z(),
    )
}

/// Assemble the moment multi-indices and the constant-term vector `m` for a
/// trimmed domain, via the divergence-theorem flux integral over its
/// boundary (spec.md S4.5).
#[inline]
#[must_use]
pub fn assemble_constant_terms(
    domain: &TrimmedDomain,
    orders: (usize, usize, usize),
    use_six_point: bool,
) -> (Vec<(usize, usize, usize)>, DVector<Real>) {
    let indices = moment_indices(orders);
    let boundary = domain.boundary_points(use_six_point);
    let widths = domain.cell_box().widths();

    let mut m = DVector::zeros(indices.len());
    for (r, &(alpha, beta, gamma)) in indices.iter().enumerate() {
        let mut acc = 0.0;
        for bp in &boundary {
            let u = local_fraction(bp.pos(), domain.cell_box());

            let field = Vec3::new(
                widths.x()
                    * shifted_legendre_antideriv(alpha, u.0)
                    * shifted_legendre(beta, u.1)
                    * shifted_legendre(gamma, u.2),
                widths.y()
                    * shifted_legendre(alpha, u.0)
                    * shifted_legendre_antideriv(beta, u.1)
                    * shifted_legendre(gamma, u.2),
                widths.z()
                    * shifted_legendre(alpha, u.0)
                    * shifted_legendre(beta, u.1)
                    * shifted_legendre_antideriv(gamma, u.2),
            );

            acc += field.dot_vec(bp.norm()) * *bp.weight();
        }
        m[r] = acc / 3.0;
    }

    (indices, m)
}

/// Assemble the fitting matrix `A_{r,j} = phi_r(u(q_j))` for a set of
/// candidate points against a cell box (spec.md S4.5).
#[inline]
#[must_use]
pub fn assemble_fitting_matrix(
    points: &[Point3],
    cell: &Cube,
    indices: &[(usize, usize, usize)],
) -> DMatrix<Real> {
    let mut a = DMatrix::zeros(indices.len(), points.len());
    for (j, p) in points.iter().enumerate() {
        let u = local_fraction(p, cell);
        for (r, &order) in indices.iter().enumerate() {
            a[(r, j)] = moment_basis(order, u);
        }
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{clip::clip_triangle_to_box, trimmed_domain::close_with_caps, Collide, Triangle};
    use crate::geom::shape::TriangleMesh;
    use assert_approx_eq::assert_approx_eq;

    fn full_unit_cell_domain() -> TrimmedDomain {
        let verts = [
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(2.0, -1.0, -1.0),
            Point3::new(2.0, 2.0, -1.0),
            Point3::new(-1.0, 2.0, -1.0),
            Point3::new(-1.0, -1.0, 2.0),
            Point3::new(2.0, -1.0, 2.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(-1.0, 2.0, 2.0),
        ];
        let quads: [[usize; 4]; 6] = [
            [0, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [0, 4, 7, 3],
            [1, 2, 6, 5],
        ];
        let mut tris = Vec::new();
        for q in quads {
            let a = verts[q[0]];
            let b = verts[q[1]];
            let c = verts[q[2]];
            let d = verts[q[3]];
            tris.push(Triangle::new([a, b, c]));
            tris.push(Triangle::new([a, c, d]));
        }
        let mesh = TriangleMesh::from_triangles(tris);
        let cell = Cube::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let mut clipped = TriangleMesh::new();
        for tri in mesh.iter_triangles() {
            if Collide::overlap(&tri, &cell) {
                clipped.extend(&clip_triangle_to_box(&tri, cell.mins(), cell.maxs()));
            }
        }
        let closed = close_with_caps(clipped, &cell).unwrap();
        TrimmedDomain::new(closed, cell)
    }

    #[test]
    fn zeroth_moment_matches_cell_volume() {
        let domain = full_unit_cell_domain();
        let (_, m) = assemble_constant_terms(&domain, (0, 0, 0), true);
        assert_approx_eq!(m[0], 1.0, 1.0e-6);
    }

    #[test]
    fn fitting_matrix_has_one_column_per_point() {
        let domain = full_unit_cell_domain();
        let indices = moment_indices((1, 1, 1));
        let points = vec![Point3::new(0.25, 0.25, 0.25), Point3::new(0.75, 0.75, 0.75)];
        let a = assemble_fitting_matrix(&points, domain.cell_box(), &indices);
        assert_eq!(a.ncols(), 2);
        assert_eq!(a.nrows(), indices.len());
    }
}
