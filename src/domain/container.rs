//! Sparse, hash-mapped element container with axis-wise neighbour walks
//! (spec.md S4.6).
//!
//! Only occupied cells carry an [`Element`]; a grid with holes (rejected
//! cells, or cells never visited) simply has gaps in the map. The container
//! never allocates the full dense `nx*ny*nz` array, matching spec.md S4.6's
//! "hash map keyed on linear index" requirement.

use std::collections::HashMap;

use crate::{
    ord::cartesian::{X, Y, Z},
    tools::index::{linear_to_three_dim, three_dim_to_linear},
};

use super::element::Element;

/// Owns every [`Element`] published by the pipeline, keyed by linear grid
/// index, plus the grid resolution needed to walk neighbours.
pub struct ElementContainer {
    /// Cartesian resolution of the background grid.
    res: [usize; 3],
    /// Sparse linear-index -> element map.
    elements: HashMap<usize, Element>,
}

/// Result of a single-step directional neighbour walk (spec.md S4.6):
/// the neighbour's id (if the grid extends that far), whether an element is
/// actually published there, and whether `id` sits on that axis's boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighbourWalk {
    /// Linear index of the neighbouring cell, if the grid extends that far.
    pub neighbour_id: Option<usize>,
    /// Whether an `Element` is actually published at `neighbour_id`.
    pub found: bool,
    /// True when `id` already sits on the grid boundary along this axis
    /// and direction, so there is no neighbouring cell at all.
    pub local_end: bool,
}

impl ElementContainer {
    /// Construct an empty container over a grid of the given resolution.
    #[inline]
    #[must_use]
    pub fn new(res: [usize; 3]) -> Self {
        Self {
            res,
            elements: HashMap::new(),
        }
    }

    /// The background grid resolution.
    #[inline]
    #[must_use]
    pub const fn res(&self) -> [usize; 3] {
        self.res
    }

    /// Number of published elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if no elements have been published yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Publish (or overwrite) an element at its own linear index.
    #[inline]
    pub fn insert(&mut self, element: Element) {
        let id = element.id();
        self.elements.insert(id, element);
    }

    /// Retrieve the element at a linear index, if published.
    #[inline]
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Retrieve a mutable reference to the element at a linear index.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, id: usize) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Iterate over every published element.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Convert a grid index to its linear index under this container's
    /// resolution.
    #[inline]
    #[must_use]
    pub fn linear_index(&self, grid_index: [usize; 3]) -> usize {
        three_dim_to_linear(grid_index, &self.res)
    }

    fn step(&self, id: usize, axis: usize, positive: bool) -> NeighbourWalk {
        let index = linear_to_three_dim(id, &self.res);

        let local_end = if positive {
            index[axis] + 1 >= self.res[axis]
        } else {
            index[axis] == 0
        };

        if local_end {
            return NeighbourWalk {
                neighbour_id: None,
                found: false,
                local_end: true,
            };
        }

        let mut neighbour = index;
        if positive {
            neighbour[axis] += 1;
        } else {
            neighbour[axis] -= 1;
        }

        let neighbour_id = three_dim_to_linear(neighbour, &self.res);
        NeighbourWalk {
            neighbour_id: Some(neighbour_id),
            found: self.elements.contains_key(&neighbour_id),
            local_end: false,
        }
    }

    /// Step one cell in `+X` from `id` (spec.md S4.6 `Next[X]`).
    #[inline]
    #[must_use]
    pub fn next_x(&self, id: usize) -> NeighbourWalk {
        self.step(id, X, true)
    }

    /// Step one cell in `-X` from `id` (spec.md S4.6 `Prev[X]`).
    #[inline]
    #[must_use]
    pub fn prev_x(&self, id: usize) -> NeighbourWalk {
        self.step(id, X, false)
    }

    /// Step one cell in `+Y` from `id` (spec.md S4.6 `Next[Y]`).
    #[inline]
    #[must_use]
    pub fn next_y(&self, id: usize) -> NeighbourWalk {
        self.step(id, Y, true)
    }

    /// Step one cell in `-Y` from `id` (spec.md S4.6 `Prev[Y]`).
    #[inline]
    #[must_use]
    pub fn prev_y(&self, id: usize) -> NeighbourWalk {
        self.step(id, Y, false)
    }

    /// Step one cell in `+Z` from `id` (spec.md S4.6 `Next[Z]`).
    #[inline]
    #[must_use]
    pub fn next_z(&self, id: usize) -> NeighbourWalk {
        self.step(id, Z, true)
    }

    /// Step one cell in `-Z` from `id` (spec.md S4.6 `Prev[Z]`).
    #[inline]
    #[must_use]
    pub fn prev_z(&self, id: usize) -> NeighbourWalk {
        self.step(id, Z, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::brep::CellClass;
    use crate::geom::shape::Cube;
    use crate::math::Point3;

    fn unit_box() -> Cube {
        Cube::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    fn filled_container(res: [usize; 3], holes: &[usize]) -> ElementContainer {
        let mut container = ElementContainer::new(res);
        for id in 0..(res[0] * res[1] * res[2]) {
            if holes.contains(&id) {
                continue;
            }
            let grid_index = linear_to_three_dim(id, &res);
            container.insert(Element::new(id, grid_index, unit_box(), unit_box(), CellClass::Inside));
        }
        container
    }

    #[test]
    fn forward_and_backward_walks_are_inverse() {
        let container = filled_container([3, 4, 2], &[]);
        for id in 0..24 {
            let fwd = container.next_x(id);
            if let Some(nb) = fwd.neighbour_id {
                let back = container.prev_x(nb);
                assert_eq!(back.neighbour_id, Some(id));
            }
        }
    }

    #[test]
    fn local_end_true_exactly_at_grid_boundary() {
        let container = filled_container([3, 4, 2], &[]);
        // id=2 is at grid_index [2,0,0], the last along X (res[X]=3).
        let at_edge = container.next_x(2);
        assert!(at_edge.local_end);
        assert_eq!(at_edge.neighbour_id, None);

        let not_edge = container.next_x(0);
        assert!(!not_edge.local_end);
        assert_eq!(not_edge.neighbour_id, Some(1));
    }

    #[test]
    fn walk_into_a_hole_reports_not_found_but_not_local_end() {
        // 3x4x2 grid with one interior cell missing (spec.md S8 scenario 6).
        let container = filled_container([3, 4, 2], &[5]);
        let walk = container.prev_x(6);
        assert_eq!(walk.neighbour_id, Some(5));
        assert!(!walk.local_end);
        assert!(!walk.found);
    }

    #[test]
    fn container_reports_len() {
        let container = filled_container([2, 2, 2], &[0, 1]);
        assert_eq!(container.len(), 6);
    }
}
