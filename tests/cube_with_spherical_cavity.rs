//! Scenario: "Cube with spherical cavity" (spec.md S8 scenario 2).
//!
//! `[-1.5,1.5]^3` cube with a concentric unit-sphere cavity cut out;
//! sampled points at 0.15 spacing must be `IsInside` iff `|p|_inf < 1.5`
//! (strict) and `|p|_2 > 1`.
//!
//! The cavity's sphere is a polygonal approximation, so points within
//! `SPHERE_MARGIN` of the unit sphere are skipped, and likewise for the
//! cube's exact flat faces (`CUBE_MARGIN`, smaller since those facets are
//! exact).

mod common;

use embedquad::geom::brep::BRep;
use embedquad::math::Point3;

const HALF_EXTENT: f64 = 1.5;
const CAVITY_RADIUS: f64 = 1.0;
const SPHERE_MARGIN: f64 = 0.03;
const CUBE_MARGIN: f64 = 0.01;

#[test]
fn cube_with_cavity_matches_analytic_inside_outside() {
    let mesh = common::cube_with_spherical_cavity(HALF_EXTENT, CAVITY_RADIUS, 16, 32);
    let brep = BRep::new(mesh);

    let spacing = 0.15;
    let n_steps = ((2.0 * HALF_EXTENT) / spacing).round() as i64;

    let mut checked = 0usize;
    for ix in 0..=n_steps {
        for iy in 0..=n_steps {
            for iz in 0..=n_steps {
                let x = -HALF_EXTENT + (ix as f64) * spacing;
                let y = -HALF_EXTENT + (iy as f64) * spacing;
                let z = -HALF_EXTENT + (iz as f64) * spacing;

                let inf_norm = x.abs().max(y.abs()).max(z.abs());
                if (inf_norm - HALF_EXTENT).abs() < CUBE_MARGIN {
                    continue;
                }

                let two_norm = (x * x + y * y + z * z).sqrt();
                if (two_norm - CAVITY_RADIUS).abs() < SPHERE_MARGIN {
                    continue;
                }

                let expect_inside = inf_norm < HALF_EXTENT && two_norm > CAVITY_RADIUS;
                let p = Point3::new(x, y, z);
                assert_eq!(
                    brep.is_inside(&p),
                    expect_inside,
                    "mismatch at ({x}, {y}, {z}): inf={inf_norm}, two={two_norm}"
                );
                checked += 1;
            }
        }
    }
    assert!(checked > 1000, "sanity: expected a substantial sample, got {checked}");
}
