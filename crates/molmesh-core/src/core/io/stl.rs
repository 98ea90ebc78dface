use super::traits::MeshFile;
use crate::core::geometry::indexed::WeldedMesh;
use std::io::{self, Write};
use thiserror::Error;

const HEADER_LEN: usize = 80;
const HEADER_TEXT: &[u8] = b"molmesh binary STL";

#[derive(Debug, Error)]
pub enum StlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Mesh has {0} faces, more than binary STL can hold")]
    TooManyFaces(usize),
}

/// Binary STL writer.
///
/// Colors are dropped. Facet normals are recomputed from the welded positions, and
/// degenerate faces are written with a zero normal.
pub struct StlFile;

impl StlFile {
    /// Size in bytes of a binary STL file holding `faces` triangles.
    pub fn encoded_len(faces: usize) -> usize {
        HEADER_LEN + 4 + faces * 50
    }
}

impl MeshFile for StlFile {
    type Error = StlError;

    fn write_to(mesh: &WeldedMesh, writer: &mut impl Write) -> Result<(), Self::Error> {
        let count =
            u32::try_from(mesh.faces.len()).map_err(|_| StlError::TooManyFaces(mesh.faces.len()))?;

        let mut header = [0u8; HEADER_LEN];
        header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
        writer.write_all(&header)?;
        writer.write_all(&count.to_le_bytes())?;

        for face in &mesh.faces {
            let [p1, p2, p3] = mesh.face_positions(face);
            let normal = (p2 - p1)
                .cross(&(p3 - p1))
                .try_normalize(0.0)
                .unwrap_or_else(nalgebra::Vector3::zeros);
            for value in normal.iter() {
                writer.write_all(&(*value as f32).to_le_bytes())?;
            }
            for p in [p1, p2, p3] {
                for value in p.coords.iter() {
                    writer.write_all(&(*value as f32).to_le_bytes())?;
                }
            }
            writer.write_all(&0u16.to_le_bytes())?;
        }
        Ok(())
    }
}
