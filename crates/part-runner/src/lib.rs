//! Batch generation of configured parts.
//!
//! A [`PartDesign`] turns a loaded configuration into [`PartHolder`]s; a
//! [`BatchRunner`] owns that configuration, compiles the design, writes every
//! part through an [`part_export::Exporter`] and hands the placed parts to a
//! [`Viewer`].

pub mod errors;
pub mod holder;
pub mod runner;
pub mod viewer;

pub use errors::RunnerError;
pub use holder::PartHolder;
pub use runner::{BatchRunner, PartDesign};
pub use viewer::{CameraPolicy, TracingViewer, Viewer};
