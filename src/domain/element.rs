//! A single background-grid cell and its published cubature rule.

use crate::{
    access,
    geom::{brep::CellClass, quadrature::IntegrationPoint, shape::Cube, trimmed_domain::TrimmedDomain},
};

/// One occupied cell of the background grid, carrying the classification
/// decided during the classify phase and the cubature rule published during
/// the build/fit phase (spec.md S4.6, S4.7).
pub struct Element {
    /// Linear grid index (spec.md S4.6).
    id: usize,
    /// Cartesian grid index `[i, j, k]`.
    grid_index: [usize; 3],
    /// Physical-space cell box.
    phys_box: Cube,
    /// Parametric-space cell box (equal to `phys_box` unless `b_spline_mesh`
    /// is enabled).
    param_box: Cube,
    /// Inside / Outside / Trimmed, as decided by the classify phase.
    class: CellClass,
    /// Published cubature rule. Empty until the build/fit phase runs, and
    /// permanently empty for `Outside` cells.
    points: Vec<IntegrationPoint>,
    /// The clipped-and-capped trimmed sub-domain, kept for debug dumps and
    /// boundary-condition clipping (S4.7 phase 3). Only present for
    /// `Trimmed` cells that survived moment fitting.
    trimmed_domain: Option<TrimmedDomain>,
}

impl Element {
    access!(phys_box: Cube);
    access!(param_box: Cube);
    access!(class: CellClass);
    access!(points: Vec<IntegrationPoint>);
    access!(grid_index: [usize; 3]);

    /// Construct a new, not-yet-fitted element.
    #[inline]
    #[must_use]
    pub const fn new(id: usize, grid_index: [usize; 3], phys_box: Cube, param_box: Cube, class: CellClass) -> Self {
        Self {
            id,
            grid_index,
            phys_box,
            param_box,
            class,
            points: Vec::new(),
            trimmed_domain: None,
        }
    }

    /// The element's linear grid index.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Record the published cubature rule.
    #[inline]
    pub fn publish(&mut self, points: Vec<IntegrationPoint>) {
        self.points = points;
    }

    /// Attach the trimmed sub-domain used to derive the published rule.
    #[inline]
    pub fn set_trimmed_domain(&mut self, domain: TrimmedDomain) {
        self.trimmed_domain = Some(domain);
    }

    /// The trimmed sub-domain, if this is a surviving `Trimmed` cell.
    #[inline]
    #[must_use]
    pub const fn trimmed_domain(&self) -> Option<&TrimmedDomain> {
        self.trimmed_domain.as_ref()
    }

    /// True once a non-empty rule has been published for this element.
    #[inline]
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.points.is_empty() || matches!(self.class, CellClass::Outside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn unit_box() -> Cube {
        Cube::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn freshly_built_element_has_no_points() {
        let elem = Element::new(0, [0, 0, 0], unit_box(), unit_box(), CellClass::Inside);
        assert!(elem.points().is_empty());
        assert!(!elem.is_fitted());
    }

    #[test]
    fn outside_element_counts_as_fitted() {
        let elem = Element::new(0, [0, 0, 0], unit_box(), unit_box(), CellClass::Outside);
        assert!(elem.is_fitted());
    }

    #[test]
    fn publish_records_points() {
        let mut elem = Element::new(0, [0, 0, 0], unit_box(), unit_box(), CellClass::Inside);
        elem.publish(vec![IntegrationPoint::new(Point3::new(0.5, 0.5, 0.5), 1.0)]);
        assert_eq!(elem.points().len(), 1);
        assert!(elem.is_fitted());
    }
}
