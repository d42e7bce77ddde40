use std::path::PathBuf;

use part_config::ConfigError;
use part_export::ExportError;

/// Errors raised while compiling or exporting a batch of parts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RunnerError {
    #[error("Directory {} does not exist", path.display())]
    DirectoryMissing { path: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("compile failed: {0}")]
    Compile(String),
}
