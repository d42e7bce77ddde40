//! Compile, export and display a configured set of parts.

use std::path::{Path, PathBuf};

use part_config::{ConfigInstance, ConfigSchema, ConfigSource, Overrides};
use part_export::Exporter;
use part_types::Geometry;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::RunnerError;
use crate::holder::PartHolder;
use crate::viewer::{CameraPolicy, Viewer};

/// A parametric design: produces parts from a configuration.
pub trait PartDesign {
    type Geometry: Geometry;

    /// Schema of the configuration this design reads.
    fn schema() -> ConfigSchema;

    /// Build every part for `config`.
    fn compile(
        &self,
        config: &ConfigInstance,
    ) -> Result<Vec<PartHolder<Self::Geometry>>, RunnerError>;
}

/// Drives a [`PartDesign`] through compile, export and display.
///
/// The runner owns one configuration instance. Loading mutates it in place;
/// compiling and exporting read it.
pub struct BatchRunner<D: PartDesign, E, V> {
    design: D,
    config: ConfigInstance,
    parts: Vec<PartHolder<D::Geometry>>,
    exporter: E,
    viewer: V,
}

impl<D, E, V> BatchRunner<D, E, V>
where
    D: PartDesign,
    E: Exporter<D::Geometry>,
    V: Viewer<D::Geometry>,
{
    /// A runner whose configuration holds the design schema's defaults.
    pub fn new(design: D, exporter: E, viewer: V) -> Result<Self, RunnerError> {
        let config = ConfigInstance::new(D::schema())?;
        Ok(Self::with_config(design, config, exporter, viewer))
    }

    pub fn with_config(design: D, config: ConfigInstance, exporter: E, viewer: V) -> Self {
        Self {
            design,
            config,
            parts: Vec::new(),
            exporter,
            viewer,
        }
    }

    /// Load `source` and `overrides` into the runner's configuration.
    pub fn load_config(
        &mut self,
        source: impl Into<ConfigSource>,
        overrides: Overrides,
    ) -> Result<(), RunnerError> {
        self.config.load(source, overrides)?;
        Ok(())
    }

    pub fn config(&self) -> &ConfigInstance {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigInstance {
        &mut self.config
    }

    pub fn design(&self) -> &D {
        &self.design
    }

    pub fn parts(&self) -> &[PartHolder<D::Geometry>] {
        &self.parts
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// Replace the part list with a fresh compile of the design.
    #[instrument(skip_all)]
    pub fn compile(&mut self) -> Result<(), RunnerError> {
        self.parts = self.design.compile(&self.config)?;
        debug!(parts = self.parts.len(), "compiled design");
        Ok(())
    }

    /// `<folder>/<prefix><stem><suffix>.<ext>`; the part's own folder wins
    /// over the configured one.
    pub fn output_path(&self, part: &PartHolder<D::Geometry>) -> PathBuf {
        let folder = part
            .folder()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.config.stl_folder().into_owned()));
        folder.join(format!(
            "{}{}{}.{}",
            self.config.file_prefix(),
            part.file_name(),
            self.config.file_suffix(),
            self.exporter.extension()
        ))
    }

    /// Write every part. Does nothing when the output folder is `"NONE"`.
    #[instrument(skip_all, fields(folder = %self.config.stl_folder()))]
    pub fn export_all(&self) -> Result<(), RunnerError> {
        if self.config.export_disabled() {
            info!("export disabled, skipping");
            return Ok(());
        }
        let create_folders = self.config.create_folders_if_missing()?;
        for part in &self.parts {
            let path = self.output_path(part);
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            if create_folders {
                if let Err(e) = std::fs::create_dir_all(&parent) {
                    warn!(path = %parent.display(), error = %e, "could not create directory");
                }
            }
            if !parent.is_dir() {
                let err = RunnerError::DirectoryMissing { path: parent };
                error!("{err}");
                return Err(err);
            }
            self.exporter.export(part.geometry(), &path)?;
            info!(path = %path.display(), "exported");
        }
        Ok(())
    }

    /// Show every part at its display placement, keeping the camera.
    pub fn display(&mut self) {
        let placed: Vec<D::Geometry> = self.parts.iter().map(PartHolder::placed).collect();
        self.viewer.show(&placed, CameraPolicy::Keep);
    }

    /// [`compile`](Self::compile) then [`export_all`](Self::export_all).
    pub fn run(&mut self) -> Result<(), RunnerError> {
        self.compile()?;
        self.export_all()
    }
}
