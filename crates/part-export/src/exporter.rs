use std::path::Path;

use part_types::Mesh;
use tracing::{info, instrument};

use crate::errors::ExportError;
use crate::stl::{export_ascii_stl, export_binary_stl};

/// Writes one geometry value to one file.
///
/// The runner builds the full path, extension included, from
/// [`Exporter::extension`] before calling [`Exporter::export`].
pub trait Exporter<G> {
    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    fn export(&self, geometry: &G, path: &Path) -> Result<(), ExportError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// STL file writer for meshes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlExporter {
    pub format: StlFormat,
}

impl StlExporter {
    pub fn new(format: StlFormat) -> Self {
        Self { format }
    }

    pub fn binary() -> Self {
        Self::new(StlFormat::Binary)
    }

    pub fn ascii() -> Self {
        Self::new(StlFormat::Ascii)
    }
}

impl Exporter<Mesh> for StlExporter {
    fn extension(&self) -> &str {
        "stl"
    }

    #[instrument(skip_all, fields(path = %path.display(), format = ?self.format))]
    fn export(&self, geometry: &Mesh, path: &Path) -> Result<(), ExportError> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("part");
        let bytes = match self.format {
            StlFormat::Binary => export_binary_stl(geometry, name)?,
            StlFormat::Ascii => export_ascii_stl(geometry, name)?.into_bytes(),
        };
        std::fs::write(path, &bytes).map_err(|e| ExportError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!(bytes = bytes.len(), triangles = geometry.triangle_count(), "exported part");
        Ok(())
    }
}
