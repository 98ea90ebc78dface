use crate::core::geometry::indexed::WeldedMesh;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for writing welded meshes to an output format.
///
/// Implementors handle format-specific serialization; the provided method takes care of
/// creating the file and buffering writes.
pub trait MeshFile {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes a welded mesh to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying writer fails.
    fn write_to(mesh: &WeldedMesh, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes a welded mesh to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(mesh: &WeldedMesh, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(mesh, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
