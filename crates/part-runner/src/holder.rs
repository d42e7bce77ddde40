use std::path::{Path, PathBuf};

use part_types::{Geometry, Placement};

/// One generated part: its geometry, where to show it, and where to write it.
#[derive(Debug, Clone)]
pub struct PartHolder<G> {
    geometry: G,
    placement: Placement,
    folder: Option<PathBuf>,
    stem: String,
}

/// `name` without directories or its last extension.
fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl<G: Geometry> PartHolder<G> {
    /// `file_name` is reduced to its stem: `"widget.stl"` stores `"widget"`.
    pub fn new(geometry: G, file_name: &str) -> Self {
        Self {
            geometry,
            placement: Placement::identity(),
            folder: None,
            stem: file_stem(file_name),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Write this part to `folder` instead of the configured output folder.
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn file_name(&self) -> &str {
        &self.stem
    }

    pub fn set_file_name(&mut self, file_name: &str) {
        self.stem = file_stem(file_name);
    }

    /// The geometry moved to its display placement.
    pub fn placed(&self) -> G {
        self.geometry.moved(&self.placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use part_types::Mesh;

    #[test]
    fn extension_is_stripped() {
        let with_ext = PartHolder::new(Mesh::default(), "widget.stl");
        let without = PartHolder::new(Mesh::default(), "widget");
        assert_eq!(with_ext.file_name(), "widget");
        assert_eq!(without.file_name(), "widget");
    }

    #[test]
    fn rename_strips_extension() {
        let mut part = PartHolder::new(Mesh::default(), "first");
        part.set_file_name("dir/second.step");
        assert_eq!(part.file_name(), "second");
    }

    #[test]
    fn only_last_extension_is_stripped() {
        let part = PartHolder::new(Mesh::default(), "gear.v2.stl");
        assert_eq!(part.file_name(), "gear.v2");
    }

    #[test]
    fn defaults_to_identity_and_no_folder() {
        let part = PartHolder::new(Mesh::cuboid(1.0, 1.0, 1.0), "block");
        assert_eq!(part.placement(), &Placement::identity());
        assert!(part.folder().is_none());
        assert_eq!(part.placed(), *part.geometry());
    }
}
