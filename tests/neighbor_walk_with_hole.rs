//! Scenario: "Neighbor walk on 3x4x2 grid with index 10 absent"
//! (spec.md S8 scenario 6).
//!
//! spec.md's "local_end... at multiples of 3" only lines up with this
//! crate's 0-based `ElementContainer` addressing if read as 1-based (the
//! last cell of every x-row is 0-based id 2, 5, 8, ...; only `id+1` is a
//! multiple of 3). Its "index 10 absent" is taken literally as this
//! crate's own 0-based id 10 — the simplest reading, and the only one
//! under which a `next_x` call can actually land on the hole at all (id 10
//! has x-index 1, reachable as `next_x(9)`; 0-based id 9 has x-index 0 and
//! is never any cell's forward-x neighbour, so "index 10" read as 1-based
//! would describe a hole no walk could ever strike).
//!
//! So: a 3x4x2 grid (24 cells, ids 0..23) missing id 10; `next_x` reports
//! `found=false` only for the single call whose neighbour is the hole
//! (`next_x(9)`), and `local_end` is true exactly when `(id+1)` is a
//! multiple of 3.

use embedquad::domain::{Element, ElementContainer};
use embedquad::geom::brep::CellClass;
use embedquad::geom::Cube;
use embedquad::math::Point3;
use embedquad::tools::index::linear_to_three_dim;

const RES: [usize; 3] = [3, 4, 2];
const HOLE: usize = 10;

fn unit_box() -> Cube {
    Cube::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
}

fn grid_with_hole() -> ElementContainer {
    let mut container = ElementContainer::new(RES);
    for id in 0..(RES[0] * RES[1] * RES[2]) {
        if id == HOLE {
            continue;
        }
        let grid_index = linear_to_three_dim(id, &RES);
        container.insert(Element::new(id, grid_index, unit_box(), unit_box(), CellClass::Inside));
    }
    container
}

#[test]
fn local_end_true_exactly_at_multiples_of_three_one_based() {
    let container = grid_with_hole();
    for id in 0..24 {
        let walk = container.next_x(id);
        let one_based = id + 1;
        assert_eq!(
            walk.local_end,
            one_based % 3 == 0,
            "id={id} (1-based {one_based}): local_end={}",
            walk.local_end
        );
    }
}

#[test]
fn forward_x_walk_finds_every_neighbour_except_the_hole() {
    let container = grid_with_hole();
    let mut not_found_ids = Vec::new();

    for id in 0..24 {
        let walk = container.next_x(id);
        if walk.local_end {
            assert_eq!(walk.neighbour_id, None);
            continue;
        }
        assert_eq!(walk.neighbour_id, Some(id + 1));
        if !walk.found {
            not_found_ids.push(id);
        }
    }

    // Only the step landing on the hole (neighbour_id == HOLE) should ever
    // report `found=false`; that is the single call from id = HOLE - 1.
    assert_eq!(not_found_ids, vec![HOLE - 1]);
}

#[test]
fn forward_and_backward_walks_invert_around_the_hole() {
    let container = grid_with_hole();
    for id in 0..24 {
        let fwd = container.next_x(id);
        if let Some(nb) = fwd.neighbour_id {
            let back = container.prev_x(nb);
            assert_eq!(back.neighbour_id, Some(id));
        }
    }
}
