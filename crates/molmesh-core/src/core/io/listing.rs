use super::traits::MeshFile;
use crate::core::geometry::indexed::WeldedMesh;
use std::io::{self, Write};

/// Writer for the indexed scene listing consumed by browser viewers.
///
/// The output holds three array literals: `VERTICES` with positions at 8 decimals,
/// `COLORS` with RGB channels at 3 decimals, and `FACES` with one
/// `[v1,v2,v3,c1,c2,c3]` sextuple per triangle. Every entry ends with a comma.
pub struct ListingFile;

impl MeshFile for ListingFile {
    type Error = io::Error;

    fn write_to(mesh: &WeldedMesh, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "var VERTICES = [")?;
        for v in &mesh.vertices {
            writeln!(writer, "[{:.8},{:.8},{:.8}],", v.x, v.y, v.z)?;
        }
        writeln!(writer, "];")?;

        writeln!(writer, "var COLORS = [")?;
        for c in &mesh.colors {
            writeln!(writer, "[{:.3},{:.3},{:.3}],", c.r, c.g, c.b)?;
        }
        writeln!(writer, "];")?;

        writeln!(writer, "var FACES = [")?;
        for face in &mesh.faces {
            let [v1, v2, v3, c1, c2, c3] = face.sextuple();
            writeln!(writer, "[{v1},{v2},{v3},{c1},{c2},{c3}],")?;
        }
        writeln!(writer, "];")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::indexed::Face;
    use crate::core::geometry::mesh::Color;
    use nalgebra::Point3;

    fn sample_mesh() -> WeldedMesh {
        WeldedMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, -0.5, 0.123456789),
            ],
            colors: vec![Color::new(1.0, 0.5, 0.0), Color::WHITE],
            faces: vec![Face {
                vertices: [0, 1, 2],
                colors: [0, 0, 1],
            }],
        }
    }

    #[test]
    fn write_to_produces_three_sections_with_fixed_precision() {
        let mut buffer = Vec::new();
        ListingFile::write_to(&sample_mesh(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let expected = "\
var VERTICES = [
[0.00000000,0.00000000,0.00000000],
[1.00000000,0.00000000,0.00000000],
[0.00000000,-0.50000000,0.12345679],
];
var COLORS = [
[1.000,0.500,0.000],
[1.000,1.000,1.000],
];
var FACES = [
[0,1,2,0,0,1],
];
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_mesh_writes_empty_sections() {
        let mut buffer = Vec::new();
        ListingFile::write_to(&WeldedMesh::default(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "var VERTICES = [\n];\nvar COLORS = [\n];\nvar FACES = [\n];\n"
        );
    }

    #[test]
    fn write_to_path_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.js");
        ListingFile::write_to_path(&sample_mesh(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("var VERTICES = [\n"));
        assert!(text.ends_with("[0,1,2,0,0,1],\n];\n"));
    }
}
