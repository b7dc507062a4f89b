//! Scenarios: "Elephant mesh, 14x22x12 grid, p=2, Gauss" and "same mesh,
//! GGQ_Reduced2, p=2" (spec.md S8 scenarios 4 and 5).
//!
//! The elephant-mesh STL benchmark scenarios 4/5 measure isn't available
//! in this repository (no such asset ships anywhere in the retrieved
//! corpus), so its literal figures (108 fully-inside cells, 0.0462012
//! total volume, 406 reduced points) cannot be reproduced bit-for-bit here.
//! What *is* checked, on the same `14x22x12` grid shape at the same `p=2`
//! with a solid whose geometry is fully reconstructible (an axis-aligned
//! box, so every trimmed cell's moment assembly is over exact flat
//! boundary facets, not a curved polygonal approximation):
//!
//! - scenario 4's own volume identity is a direct consequence of `Gauss`
//!   integrating an `Inside` cell's constant-one moment exactly: inside-
//!   only weighted volume must equal `num_inside * cell_volume` to near
//!   machine precision, for any solid shape.
//! - total published volume (inside + trimmed) approximates the solid's
//!   exact analytic volume within a loose but confidently-safe tolerance,
//!   for both `Gauss` and `GgqReduced2`.
//! - `GgqReduced2` publishes strictly fewer total interior points over the
//!   `Inside` cells than the unreduced per-cell tensor rule would.

use embedquad::config::{ConfigBuilder, IntegrationMethod};
use embedquad::geom::brep::CellClass;
use embedquad::math::Point3;
use embedquad::ord::Build;
use embedquad::pipeline;

mod common;

const GRID_LO: [f64; 3] = [-0.37, -0.55, -0.31];
const GRID_HI: [f64; 3] = [0.37, 0.55, 0.31];
const RES: [usize; 3] = [14, 22, 12];
const ORDERS: [usize; 3] = [2, 2, 2];

// Deliberately not aligned with any grid line on any axis (grid cell
// widths are 0.74/14, 1.1/22 = 0.05, and 0.62/12), so every cut face has a
// genuinely nonzero overlap with its straddled cell rather than a
// degenerate zero-width touch.
const SOLID_LO: [f64; 3] = [-0.24, -0.34, -0.19];
const SOLID_HI: [f64; 3] = [0.24, 0.34, 0.19];

fn solid_lo() -> Point3 {
    Point3::new(SOLID_LO[0], SOLID_LO[1], SOLID_LO[2])
}

fn solid_hi() -> Point3 {
    Point3::new(SOLID_HI[0], SOLID_HI[1], SOLID_HI[2])
}

fn solid_volume() -> f64 {
    (SOLID_HI[0] - SOLID_LO[0]) * (SOLID_HI[1] - SOLID_LO[1]) * (SOLID_HI[2] - SOLID_LO[2])
}

fn cell_volume() -> f64 {
    let dx = (GRID_HI[0] - GRID_LO[0]) / RES[0] as f64;
    let dy = (GRID_HI[1] - GRID_LO[1]) / RES[1] as f64;
    let dz = (GRID_HI[2] - GRID_LO[2]) / RES[2] as f64;
    dx * dy * dz
}

fn config(method: IntegrationMethod) -> embedquad::config::Config {
    ConfigBuilder::new("mesh.stl".to_owned(), GRID_LO, GRID_HI, RES, ORDERS, method)
        .build()
        .unwrap()
}

fn run(method: IntegrationMethod) -> pipeline::PipelineOutput {
    let tris = common::cube_shell(solid_lo(), solid_hi());
    let mesh = common::mesh_from(tris);
    let cfg = config(method);
    pipeline::run(mesh, &[], &cfg).unwrap()
}

#[test]
fn inside_only_volume_matches_the_exact_gauss_identity() {
    let output = run(IntegrationMethod::Gauss);

    let inside_volume: f64 = output
        .container
        .iter()
        .filter(|e| *e.class() == CellClass::Inside)
        .map(|e| e.points().iter().map(|p| *p.weight()).sum::<f64>())
        .sum();

    let expected = output.stats.num_inside as f64 * cell_volume();
    assert!(
        (inside_volume - expected).abs() < 1.0e-10 * expected.max(1.0),
        "inside_volume={inside_volume}, expected={expected}"
    );
    assert!(output.stats.num_inside > 0);
    assert!(output.stats.num_trimmed > 0);
}

#[test]
fn total_published_volume_approximates_the_solid_under_gauss_and_reduced2() {
    let exact = solid_volume();

    for method in [IntegrationMethod::Gauss, IntegrationMethod::GgqReduced2] {
        let output = run(method);
        let total: f64 = output
            .container
            .iter()
            .map(|e| e.points().iter().map(|p| *p.weight()).sum::<f64>())
            .sum();
        let rel_err = (total - exact).abs() / exact;
        assert!(
            rel_err < 1.0e-3,
            "{method:?}: total={total}, exact={exact}, rel_err={rel_err}"
        );
    }
}

#[test]
fn ggq_reduced2_uses_fewer_points_over_inside_cells_than_plain_gauss() {
    let gauss = run(IntegrationMethod::Gauss);
    let reduced = run(IntegrationMethod::GgqReduced2);

    let gauss_inside_points: usize = gauss
        .container
        .iter()
        .filter(|e| *e.class() == CellClass::Inside)
        .map(|e| e.points().len())
        .sum();
    let reduced_inside_points: usize = reduced
        .container
        .iter()
        .filter(|e| *e.class() == CellClass::Inside)
        .map(|e| e.points().len())
        .sum();

    assert!(
        reduced_inside_points < gauss_inside_points,
        "reduced={reduced_inside_points}, gauss={gauss_inside_points}"
    );
}
