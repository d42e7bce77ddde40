//! Document parsing and node-path resolution.

use std::path::Path;

use serde_yaml::Value;
use tracing::info;

use crate::errors::ConfigError;

/// Replace a single-line `text` naming an existing file with that file's
/// contents. Anything else is returned unchanged.
pub fn read_if_path(text: String) -> Result<String, ConfigError> {
    if text.contains('\n') {
        return Ok(text);
    }
    let path = Path::new(&text);
    if !path.is_file() {
        return Ok(text);
    }
    read_document(path)
}

/// Read a document file in full.
pub fn read_document(path: &Path) -> Result<String, ConfigError> {
    info!(path = %path.display(), "reading configuration file");
    std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse YAML text into an untyped document.
pub fn parse_document(text: &str) -> Result<Value, ConfigError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Descend into `document` following the `/`-separated segments of `tree`.
///
/// Empty segments are skipped, so an empty tree addresses the root. A segment
/// that is absent, or that would index into a non-mapping, is reported as
/// [`ConfigError::MissingConfigNode`].
pub fn resolve_node<'a>(document: &'a Value, tree: &str) -> Result<&'a Value, ConfigError> {
    let mut node = document;
    for segment in tree.split('/').filter(|s| !s.is_empty()) {
        node = node
            .as_mapping()
            .and_then(|m| m.get(segment))
            .ok_or_else(|| ConfigError::MissingConfigNode {
                segment: segment.to_string(),
                tree: tree.to_string(),
            })?;
    }
    Ok(node)
}
