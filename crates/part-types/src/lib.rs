pub mod errors;
pub mod geometry;
pub mod mesh;
pub mod placement;

pub use errors::MeshError;
pub use geometry::Geometry;
pub use mesh::Mesh;
pub use placement::Placement;
