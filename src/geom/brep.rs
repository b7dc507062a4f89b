//! B-Rep operator: the façade combining a closed surface mesh with its AABB
//! tree to answer `IsInside`/`ClassifyCell`/`ClipMesh`/`BuildTrimmedDomain`
//! (spec.md S4.2). A single concrete type, not a trait object — spec.md S9's
//! design note prefers "a single concrete implementation with a stable
//! interface rather than open inheritance".

use crate::{
    access,
    core::{Real, EPS_ORIGIN},
    err::Error,
    geom::{
        clip::clip_triangle_to_box, domain::Tree, shape::Cube, shape::Triangle,
        shape::TriangleMesh, trimmed_domain::TrimmedDomain, Collide, Ray,
    },
    math::{Dir3, Point3},
};

/// Default tolerance passed to `Triangle::intersect_detailed` when deciding
/// a ray is parallel to the facet it is tested against (spec.md S4.1).
const EPS_PARALLEL: Real = 1.0e-10;

/// A cell's classification against the solid (spec.md S2/S4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellClass {
    /// Entirely outside the solid.
    Outside,
    /// Entirely inside the solid.
    Inside,
    /// The solid's boundary crosses the cell.
    Trimmed,
}

/// Combines a closed triangle mesh with its AABB tree.
pub struct BRep {
    /// The global surface mesh.
    mesh: TriangleMesh,
    /// AABB tree over the mesh's triangles.
    tree: Tree,
}

impl BRep {
    access!(mesh: TriangleMesh);
    access!(tree: Tree);

    /// Build the operator over a closed surface mesh.
    #[inline]
    #[must_use]
    pub fn new(mesh: TriangleMesh) -> Self {
        let tree = Tree::build(&mesh);
        Self { mesh, tree }
    }

    /// Robust ray-casting inside/outside oracle (spec.md S4.1).
    #[inline]
    #[must_use]
    pub fn is_inside(&self, p: &Point3) -> bool {
        is_inside_mesh(&self.mesh, &self.tree, p)
    }

    /// Classify a cell box against the solid (spec.md S4.2). `tau` shrinks
    /// the box inward before the overlap test so touch-only contact is not
    /// reported as an intersection.
    #[inline]
    #[must_use]
    pub fn classify_cell(&self, cell: &Cube, tau: Real) -> CellClass {
        let query_box = shrink_inward(cell, tau).unwrap_or(*cell);

        let mut ids = Vec::new();
        self.tree.query_box(&query_box, &mut ids);
        let any_overlap = ids
            .iter()
            .any(|&i| self.mesh.triangle(i).overlap(&query_box));

        if any_overlap {
            return CellClass::Trimmed;
        }

        if self.is_inside(&cell.centre()) {
            CellClass::Inside
        } else {
            CellClass::Outside
        }
    }

    /// Clip every overlapping triangle against the cell's six half-spaces,
    /// returning the (possibly non-watertight) local surface mesh, with
    /// face-tagged edges on the cut planes (spec.md S4.2).
    #[inline]
    #[must_use]
    pub fn clip_mesh(&self, cell: &Cube) -> TriangleMesh {
        let mut ids = Vec::new();
        self.tree.query_box(cell, &mut ids);

        let (mins, maxs) = cell.mins_maxs();
        let mut out = TriangleMesh::new();
        for id in ids {
            let tri = self.mesh.triangle(id);
            if !tri.overlap(cell) {
                continue;
            }
            let clipped = clip_triangle_to_box(&tri, &mins, &maxs);
            out.extend(&clipped);
        }
        out
    }

    /// Build the closed trimmed domain for a cell: `ClipMesh` plus
    /// synthesized cap polygons on the cell's six faces (spec.md S4.2).
    ///
    /// Returns `Ok(None)` when the trimmed interior is rejected (volume
    /// below `min_element_volume_ratio * |B|`, or a flawed cap-loop
    /// assembly under the permissive policy). Returns
    /// `Err(Error::CellRejection)` when cap assembly fails and
    /// `neglect_flawed` is `false` (spec.md S4.2's "otherwise loop-assembly
    /// failure is fatal").
    ///
    /// # Errors
    /// See above.
    pub fn build_trimmed_domain(
        &self,
        cell: &Cube,
        min_element_volume_ratio: Real,
        neglect_flawed: bool,
    ) -> Result<Option<TrimmedDomain>, Error> {
        let clipped = self.clip_mesh(cell);
        if clipped.num_tris() == 0 {
            return Ok(None);
        }

        let closed = match crate::geom::trimmed_domain::close_with_caps(clipped, cell) {
            Ok(mesh) => mesh,
            Err(e) => {
                if neglect_flawed {
                    log::warn!("cap-loop assembly failed, neglecting cell: {e}");
                    return Ok(None);
                }
                return Err(Error::CellRejection(format!(
                    "cap-loop assembly failed and neglect_elements_if_mesh_is_flawed is false: {e}"
                )));
            }
        };

        let domain = TrimmedDomain::new(closed, *cell);
        let volume = domain.volume_via_divergence(false);
        if volume < min_element_volume_ratio * cell.vol() {
            log::warn!(
                "trimmed cell rejected: volume {volume} below ratio {min_element_volume_ratio} of cell volume {}",
                cell.vol()
            );
            return Ok(None);
        }

        Ok(Some(domain))
    }
}

/// Shrink a box inward by an absolute margin `tau` on every face. Returns
/// `None` if the shrunk box would be degenerate (`tau` too large for the
/// box's extent).
#[inline]
#[must_use]
fn shrink_inward(cube: &Cube, tau: Real) -> Option<Cube> {
    if tau <= 0.0 {
        return Some(*cube);
    }
    let (mins, maxs) = cube.mins_maxs();
    let mut new_mins = mins;
    let mut new_maxs = maxs;
    for axis in 0..3 {
        new_mins[axis] += tau;
        new_maxs[axis] -= tau;
    }
    if new_mins < new_maxs {
        Some(Cube::new(new_mins, new_maxs))
    } else {
        None
    }
}

/// Robust ray-casting inside/outside oracle (spec.md S4.1), shared by
/// `BRep::is_inside` and `TrimmedDomain::is_inside`.
///
/// Casts from `p` towards each triangle's centroid in turn until a
/// non-degenerate nearest hit is found; if the origin itself lies on a
/// triangle, the point is reported not strictly inside. If every triangle
/// is exhausted without a clean cast, the point is conservatively
/// classified `Outside` (spec.md S4.1, S7).
#[inline]
#[must_use]
pub fn is_inside_mesh(mesh: &TriangleMesh, tree: &Tree, p: &Point3) -> bool {
    for i in 0..mesh.num_tris() {
        let centroid = mesh.triangle(i).centre();
        let diff = centroid - *p;
        if diff.norm() < EPS_ORIGIN {
            continue;
        }
        let dir = Dir3::from(diff);
        let ray = Ray::new(*p, dir);

        match cast_classify(mesh, tree, &ray) {
            Some(inside) => return inside,
            None => continue,
        }
    }
    false
}

/// Cast a single ray and classify it, or signal that the cast was
/// degenerate and should be retried with a different direction.
#[inline]
#[must_use]
fn cast_classify(mesh: &TriangleMesh, tree: &Tree, ray: &Ray) -> Option<bool> {
    let mut ids = Vec::new();
    tree.query_ray(ray, &mut ids);

    let hits: Vec<_> = ids
        .iter()
        .filter_map(|&i| mesh.triangle(i).intersect_detailed(ray, EPS_PARALLEL))
        .collect();

    // Every kept hit has `dist > 0` (`intersect_detailed` already rejects
    // `dist <= 0`), so the nearest hit's distance is the minimum over all
    // hits: checking the origin-distance test against just the nearest hit
    // is equivalent to checking it against every hit, but lets the
    // parallel/on_boundary triage run first on that same hit, before its
    // (possibly sentinel) `dist` is consulted at all.
    let nearest = hits
        .iter()
        .min_by(|a, b| a.dist.partial_cmp(&b.dist).unwrap());

    match nearest {
        None => Some(false),
        Some(h) if h.parallel || h.on_boundary => None,
        Some(h) if h.dist < EPS_ORIGIN => Some(false),
        Some(h) => Some(h.back_facing),
    }
}
