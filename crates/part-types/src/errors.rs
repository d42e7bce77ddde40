/// Structural problems with a triangle mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("mesh has no triangles")]
    Empty,

    #[error("index count {count} is not a multiple of 3")]
    RaggedIndices { count: usize },

    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
