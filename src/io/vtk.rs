//! Legacy VTK debug dumps (spec.md S6: "VTK dumps at verbose echo levels"),
//! written via `vtkio`'s `UnstructuredGrid` model. Purely diagnostic: none
//! of classification, fitting, or the pipeline reads these files back.

use std::path::Path;

use vtkio::model::{
    Attribute, Attributes, ByteOrder, CellType, Cells, DataArray, DataSet, ElementType, IOBuffer,
    Piece, UnstructuredGridPiece, Version, VertexNumbers, Vtk,
};

use crate::{
    core::Real,
    domain::ElementContainer,
    err::Error,
    geom::{
        quadrature::IntegrationPoint,
        shape::{Cube, TriangleMesh},
    },
};

fn legacy_vtk(data: DataSet) -> Vtk {
    Vtk {
        version: Version::new((4, 2)),
        title: "embedquad debug dump".to_owned(),
        byte_order: ByteOrder::BigEndian,
        data,
        file_path: None,
    }
}

fn hexahedron_points_and_cells(boxes: &[Cube]) -> (Vec<Real>, Vec<u32>, Vec<CellType>) {
    let mut points = Vec::with_capacity(boxes.len() * 8 * 3);
    let mut connectivity = Vec::with_capacity(boxes.len() * 9);
    let mut types = Vec::with_capacity(boxes.len());

    for (cell_idx, cube) in boxes.iter().enumerate() {
        let (mins, maxs) = cube.mins_maxs();
        let corners = [
            (mins.x(), mins.y(), mins.z()),
            (maxs.x(), mins.y(), mins.z()),
            (maxs.x(), maxs.y(), mins.z()),
            (mins.x(), maxs.y(), mins.z()),
            (mins.x(), mins.y(), maxs.z()),
            (maxs.x(), mins.y(), maxs.z()),
            (maxs.x(), maxs.y(), maxs.z()),
            (mins.x(), maxs.y(), maxs.z()),
        ];
        for (x, y, z) in corners {
            points.push(x);
            points.push(y);
            points.push(z);
        }

        let base = (cell_idx * 8) as u32;
        connectivity.push(8);
        for v in 0..8 {
            connectivity.push(base + v);
        }
        types.push(CellType::Hexahedron);
    }

    (points, connectivity, types)
}

/// Dump the input B-Rep surface as a triangle `UnstructuredGrid` (spec.md
/// S6), sharing the mesh's own vertex array rather than duplicating
/// vertices per triangle.
///
/// # Errors
/// Returns [`Error::Vtk`] if the file cannot be written.
pub fn dump_surface_mesh(path: &Path, mesh: &TriangleMesh) -> Result<(), Error> {
    let mut points = Vec::with_capacity(mesh.num_verts() * 3);
    for v in mesh.vertices() {
        points.push(v.x());
        points.push(v.y());
        points.push(v.z());
    }

    let mut connectivity = Vec::with_capacity(mesh.num_tris() * 4);
    let mut types = Vec::with_capacity(mesh.num_tris());
    for tri in mesh.tri_indices() {
        connectivity.push(3);
        for &i in tri {
            connectivity.push(i as u32);
        }
        types.push(CellType::Triangle);
    }

    let piece = UnstructuredGridPiece {
        points: IOBuffer::F64(points),
        cells: Cells {
            cell_verts: VertexNumbers::Legacy {
                num_cells: types.len() as u32,
                vertices: connectivity,
            },
            types,
        },
        data: Attributes {
            point: Vec::new(),
            cell: Vec::new(),
        },
    };

    let vtk = legacy_vtk(DataSet::UnstructuredGrid {
        meta: None,
        pieces: vec![Piece::Inline(Box::new(piece))],
    });

    vtk.export(path).map_err(|e| Error::Vtk(e.to_string()))
}

/// Dump every occupied cell's physical box as a hexahedral `UnstructuredGrid`
/// (spec.md S6), one colour-scalar cell attribute carrying the classified
/// cell kind (0 = Outside, 1 = Inside, 2 = Trimmed).
///
/// # Errors
/// Returns [`Error::Vtk`] if the file cannot be written.
pub fn dump_active_cells(path: &Path, container: &ElementContainer) -> Result<(), Error> {
    let elements: Vec<_> = container.iter().collect();
    let boxes: Vec<Cube> = elements.iter().map(|e| *e.phys_box()).collect();
    let (points, connectivity, types) = hexahedron_points_and_cells(&boxes);

    let class_scalars: Vec<Real> = elements
        .iter()
        .map(|e| match e.class() {
            crate::geom::brep::CellClass::Outside => 0.0,
            crate::geom::brep::CellClass::Inside => 1.0,
            crate::geom::brep::CellClass::Trimmed => 2.0,
        })
        .collect();

    let piece = UnstructuredGridPiece {
        points: IOBuffer::F64(points),
        cells: Cells {
            cell_verts: VertexNumbers::Legacy {
                num_cells: types.len() as u32,
                vertices: connectivity,
            },
            types,
        },
        data: Attributes {
            point: Vec::new(),
            cell: vec![Attribute::DataArray(DataArray {
                name: "cell_class".to_owned(),
                elem: ElementType::Scalars {
                    num_comp: 1,
                    lookup_table: None,
                },
                data: IOBuffer::F64(class_scalars),
            })],
        },
    };

    let vtk = legacy_vtk(DataSet::UnstructuredGrid {
        meta: None,
        pieces: vec![Piece::Inline(Box::new(piece))],
    });

    vtk.export(path).map_err(|e| Error::Vtk(e.to_string()))
}

/// Dump a cloud of integration points as `Vertex` cells with a `weight`
/// point-data scalar (spec.md S6).
///
/// # Errors
/// Returns [`Error::Vtk`] if the file cannot be written.
pub fn dump_integration_points(path: &Path, points: &[IntegrationPoint]) -> Result<(), Error> {
    let mut coords = Vec::with_capacity(points.len() * 3);
    let mut weights = Vec::with_capacity(points.len());
    let mut connectivity = Vec::with_capacity(points.len() * 2);
    let mut types = Vec::with_capacity(points.len());

    for (i, ip) in points.iter().enumerate() {
        coords.push(ip.pos().x());
        coords.push(ip.pos().y());
        coords.push(ip.pos().z());
        weights.push(*ip.weight());
        connectivity.push(1);
        connectivity.push(i as u32);
        types.push(CellType::Vertex);
    }

    let piece = UnstructuredGridPiece {
        points: IOBuffer::F64(coords),
        cells: Cells {
            cell_verts: VertexNumbers::Legacy {
                num_cells: types.len() as u32,
                vertices: connectivity,
            },
            types,
        },
        data: Attributes {
            point: vec![Attribute::DataArray(DataArray {
                name: "weight".to_owned(),
                elem: ElementType::Scalars {
                    num_comp: 1,
                    lookup_table: None,
                },
                data: IOBuffer::F64(weights),
            })],
            cell: Vec::new(),
        },
    };

    let vtk = legacy_vtk(DataSet::UnstructuredGrid {
        meta: None,
        pieces: vec![Piece::Inline(Box::new(piece))],
    });

    vtk.export(path).map_err(|e| Error::Vtk(e.to_string()))
}
