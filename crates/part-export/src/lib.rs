//! Writing part geometry to files.
//!
//! [`Exporter`] is the seam the batch runner writes through; [`StlExporter`]
//! is the stock implementation for [`part_types::Mesh`].

pub mod errors;
pub mod exporter;
pub mod stl;

pub use errors::ExportError;
pub use exporter::{Exporter, StlExporter, StlFormat};
pub use stl::{export_ascii_stl, export_binary_stl};
