use std::path::PathBuf;

use part_types::MeshError;

/// Errors raised while writing geometry to an output file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("export rejected: {0}")]
    Rejected(String),
}
