//! Fixed Gauss-Legendre quadrature tables.
//!
//! 1D nodes/weights on `[0, 1]` for the tensor-product cell rules used by
//! untrimmed cells and octree leaf seeding (spec.md S4.4), plus the fixed
//! 3-point/6-point symmetric triangle rules used for the divergence-theorem
//! boundary integration in moment fitting (spec.md S4.5).

use crate::core::Real;

/// 1D Gauss-Legendre nodes and weights on `[0, 1]` for `n in 1..=6` points,
/// exact for polynomials up to degree `2n-1`. `n` is clamped to that range
/// since `polynomial_order` is configured `1..=4`, needing at most 5 points
/// per axis (`p+1`).
#[inline]
#[must_use]
pub fn gauss_legendre_1d(n: usize) -> (Vec<Real>, Vec<Real>) {
    let n = n.clamp(1, 6);

    let (nodes, weights): (&[Real], &[Real]) = match n {
        1 => (&[0.0], &[2.0]),
        2 => (
            &[-0.577_350_269_189_625_7, 0.577_350_269_189_625_7],
            &[1.0, 1.0],
        ),
        3 => (
            &[-0.774_596_669_241_483_4, 0.0, 0.774_596_669_241_483_4],
            &[
                0.555_555_555_555_555_6,
                0.888_888_888_888_888_9,
                0.555_555_555_555_555_6,
            ],
        ),
        4 => (
            &[
                -0.861_136_311_594_052_6,
                -0.339_981_043_584_856_3,
                0.339_981_043_584_856_3,
                0.861_136_311_594_052_6,
            ],
            &[
                0.347_854_845_137_453_8,
                0.652_145_154_862_546_1,
                0.652_145_154_862_546_1,
                0.347_854_845_137_453_8,
            ],
        ),
        5 => (
            &[
                -0.906_179_845_938_664_0,
                -0.538_469_310_105_683_1,
                0.0,
                0.538_469_310_105_683_1,
                0.906_179_845_938_664_0,
            ],
            &[
                0.236_926_885_056_189_1,
                0.478_628_670_499_366_5,
                0.568_888_888_888_888_9,
                0.478_628_670_499_366_5,
                0.236_926_885_056_189_1,
            ],
        ),
        _ => (
            &[
                -0.932_469_514_203_152_1,
                -0.661_209_386_466_264_5,
                -0.238_619_186_083_196_9,
                0.238_619_186_083_196_9,
                0.661_209_386_466_264_5,
                0.932_469_514_203_152_1,
            ],
            &[
                0.171_324_492_379_170_4,
                0.360_761_573_048_138_6,
                0.467_913_934_572_691_0,
                0.467_913_934_572_691_0,
                0.360_761_573_048_138_6,
                0.171_324_492_379_170_4,
            ],
        ),
    };

    let shifted_nodes = nodes.iter().map(|&x| 0.5 * (x + 1.0)).collect();
    let shifted_weights = weights.iter().map(|&w| 0.5 * w).collect();
    (shifted_nodes, shifted_weights)
}

/// One tensor-product quadrature point in the unit cube `[0,1]^3`: a local
/// coordinate plus the product of the three 1D weights (these weights sum
/// to 1 over the whole rule; the caller scales by the physical cell
/// volume).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TensorPoint {
    /// Local coordinate in `[0,1]^3`.
    pub local: (Real, Real, Real),
    /// Product weight, already normalized to integrate to 1 over the cube.
    pub weight: Real,
}

/// Build the tensor-product Gauss-Legendre rule of order `(p_u+1, p_v+1,
/// p_w+1)` points per axis on the unit cube.
#[inline]
#[must_use]
pub fn tensor_gauss_3d(points_per_axis: [usize; 3]) -> Vec<TensorPoint> {
    let (xu, wu) = gauss_legendre_1d(points_per_axis[0]);
    let (xv, wv) = gauss_legendre_1d(points_per_axis[1]);
    let (xw, ww) = gauss_legendre_1d(points_per_axis[2]);

    let mut out = Vec::with_capacity(xu.len() * xv.len() * xw.len());
    for (k, &z) in xw.iter().enumerate() {
        for (j, &y) in xv.iter().enumerate() {
            for (i, &x) in xu.iter().enumerate() {
                out.push(TensorPoint {
                    local: (x, y, z),
                    weight: wu[i] * wv[j] * ww[k],
                });
            }
        }
    }
    out
}

/// A quadrature point on a triangle, given in barycentric coordinates
/// `(u, v, w)` with `u + v + w = 1`, and a weight expressed as a fraction
/// of the triangle's area (the rule's weights sum to 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriGaussPoint {
    /// Barycentric coordinates.
    pub bary: (Real, Real, Real),
    /// Weight as a fraction of the triangle's total area.
    pub weight: Real,
}

/// 3-point symmetric triangle rule, exact for polynomials up to degree 2.
#[inline]
#[must_use]
pub fn triangle_gauss_3pt() -> [TriGaussPoint; 3] {
    const A: Real = 2.0 / 3.0;
    const B: Real = 1.0 / 6.0;
    const W: Real = 1.0 / 3.0;
    [
        TriGaussPoint {
            bary: (A, B, B),
            weight: W,
        },
        TriGaussPoint {
            bary: (B, A, B),
            weight: W,
        },
        TriGaussPoint {
            bary: (B, B, A),
            weight: W,
        },
    ]
}

/// 6-point symmetric triangle rule (Dunavant degree-4), exact for
/// polynomials up to degree 4.
#[inline]
#[must_use]
pub fn triangle_gauss_6pt() -> [TriGaussPoint; 6] {
    const A1: Real = 0.445_948_490_915_965;
    const B1: Real = 0.108_103_018_168_070;
    const W1: Real = 0.223_381_589_678_011;
    const A2: Real = 0.091_576_213_509_771;
    const B2: Real = 0.816_847_572_980_459;
    const W2: Real = 0.109_951_743_655_322;
    [
        TriGaussPoint {
            bary: (B1, A1, A1),
            weight: W1,
        },
        TriGaussPoint {
            bary: (A1, B1, A1),
            weight: W1,
        },
        TriGaussPoint {
            bary: (A1, A1, B1),
            weight: W1,
        },
        TriGaussPoint {
            bary: (B2, A2, A2),
            weight: W2,
        },
        TriGaussPoint {
            bary: (A2, B2, A2),
            weight: W2,
        },
        TriGaussPoint {
            bary: (A2, A2, B2),
            weight: W2,
        },
    ]
}

/// Select a triangle rule meeting `min_points` total samples per triangle
/// (spec.md S6's `min_num_boundary_triangles` is a *per-cell* floor enforced
/// by the caller summing over triangles; here we just pick the more
/// accurate rule once a caller asks for it).
#[inline]
#[must_use]
pub fn triangle_rule(use_six_point: bool) -> Vec<TriGaussPoint> {
    if use_six_point {
        triangle_gauss_6pt().to_vec()
    } else {
        triangle_gauss_3pt().to_vec()
    }
}
