//! STL surface-mesh I/O (spec.md S6: "ASCII or binary, auto-detected").

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, SeekFrom},
    path::Path,
};

use crate::{
    core::Real,
    err::Error,
    geom::shape::TriangleMesh,
    math::{Dir3, Point3},
};

/// STL encodings distinguishable by sniffing the file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StlFormat {
    /// Plain-text `solid ... facet normal ... endsolid` encoding.
    Ascii,
    /// 80-byte header + little-endian binary triangle records.
    Binary,
}

/// Sniff the first bytes of an STL file to decide its encoding (spec.md
/// S6): an ASCII file's header line starts with `solid` and is followed,
/// within the first 80 bytes, by a `facet`/`normal` keyword and a newline;
/// anything else is treated as binary.
#[inline]
pub fn detect_format<R: Read + Seek>(reader: &mut R) -> Result<StlFormat, Error> {
    let mut head = [0_u8; 80];
    let n = reader.read(&mut head).map_err(Error::LoadFile)?;
    reader.seek(SeekFrom::Start(0)).map_err(Error::LoadFile)?;

    let head_str = String::from_utf8_lossy(&head[..n]);
    if head_str.trim_start().starts_with("solid")
        && (head_str.contains("facet") || head_str.contains("normal"))
        && head_str.contains('\n')
    {
        Ok(StlFormat::Ascii)
    } else {
        Ok(StlFormat::Binary)
    }
}

/// Load a closed triangular B-Rep surface from an STL file (spec.md S6).
///
/// # Errors
/// Returns [`Error::LoadFile`] if the file cannot be opened, or
/// [`Error::Stl`] if `stl_io` cannot parse it as either encoding.
pub fn load_mesh(path: &Path) -> Result<TriangleMesh, Error> {
    let file = File::open(path).map_err(Error::LoadFile)?;
    let mut reader = BufReader::new(file);

    let format = detect_format(&mut reader)?;
    log::debug!("{}: detected STL format {:?}", path.display(), format);

    let indexed = stl_io::read_stl(&mut reader).map_err(|e| Error::Stl(e.to_string()))?;

    let vertices: Vec<Point3> = indexed
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as Real, v[1] as Real, v[2] as Real))
        .collect();

    let mut tris = Vec::with_capacity(indexed.faces.len());
    let mut normals = Vec::with_capacity(indexed.faces.len());
    for face in &indexed.faces {
        tris.push(face.vertices);
        let n = face.normal;
        normals.push(
            Dir3::new(n[0] as Real, n[1] as Real, n[2] as Real),
        );
    }

    Ok(TriangleMesh::from_indexed(vertices, tris, normals))
}

/// Write a mesh out as a binary STL file (used for boundary-condition
/// clipped-surface output, spec.md S6).
///
/// # Errors
/// Returns [`Error::LoadFile`] if the file cannot be created, or
/// [`Error::Stl`] if `stl_io` fails to serialize a triangle.
pub fn save_mesh(path: &Path, mesh: &TriangleMesh) -> Result<(), Error> {
    let file = File::create(path).map_err(Error::LoadFile)?;
    let mut writer = BufWriter::new(file);

    let triangles: Vec<stl_io::Triangle> = mesh
        .iter_triangles()
        .map(|tri| {
            let verts = tri.verts();
            let n = tri.norm();
            stl_io::Triangle {
                normal: [n.x() as f32, n.y() as f32, n.z() as f32],
                vertices: [
                    [verts[0].x() as f32, verts[0].y() as f32, verts[0].z() as f32],
                    [verts[1].x() as f32, verts[1].y() as f32, verts[1].z() as f32],
                    [verts[2].x() as f32, verts[2].y() as f32, verts[2].z() as f32],
                ],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.into_iter()).map_err(|e| Error::Stl(e.to_string()))
}
