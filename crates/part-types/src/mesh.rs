use serde::{Deserialize, Serialize};

use crate::errors::MeshError;
use crate::geometry::Geometry;
use crate::placement::Placement;

/// Triangle mesh used as the exchanged geometry representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Axis-aligned box centered on the origin, outward-facing triangles.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
        #[rustfmt::skip]
        let vertices = vec![
            -hx, -hy, -hz,
             hx, -hy, -hz,
             hx,  hy, -hz,
            -hx,  hy, -hz,
            -hx, -hy,  hz,
             hx, -hy,  hz,
             hx,  hy,  hz,
            -hx,  hy,  hz,
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -z
            4, 5, 6, 4, 6, 7, // +z
            0, 1, 5, 0, 5, 4, // -y
            3, 7, 6, 3, 6, 2, // +y
            0, 4, 7, 0, 7, 3, // -x
            1, 2, 6, 1, 6, 5, // +x
        ];
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, index: u32) -> [f32; 3] {
        let i = index as usize * 3;
        [self.vertices[i], self.vertices[i + 1], self.vertices[i + 2]]
    }

    /// Check that the mesh has whole triangles and in-range indices.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices {
                count: self.indices.len(),
            });
        }
        let vertex_count = self.vertex_count();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Axis-aligned bounds as (min, max), or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut points = self.vertices.chunks_exact(3);
        let first = points.next()?;
        let init = ([first[0], first[1], first[2]], [first[0], first[1], first[2]]);
        Some(points.fold(init, |(mut lo, mut hi), p| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        }))
    }
}

impl Geometry for Mesh {
    fn moved(&self, placement: &Placement) -> Self {
        let vertices = self
            .vertices
            .chunks_exact(3)
            .flat_map(|p| {
                let q = placement.transform_point([f64::from(p[0]), f64::from(p[1]), f64::from(p[2])]);
                [q[0] as f32, q[1] as f32, q[2] as f32]
            })
            .collect();
        Self {
            vertices,
            indices: self.indices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cuboid_has_twelve_triangles() {
        let mesh = Mesh::cuboid(2.0, 4.0, 6.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.bounds(), Some(([-1.0, -2.0, -3.0], [1.0, 2.0, 3.0])));
    }

    #[test]
    fn validate_rejects_bad_meshes() {
        assert_eq!(Mesh::default().validate(), Err(MeshError::Empty));
        let ragged = Mesh::new(vec![0.0; 9], vec![0, 1]);
        assert_eq!(ragged.validate(), Err(MeshError::RaggedIndices { count: 2 }));
        let out_of_range = Mesh::new(vec![0.0; 9], vec![0, 1, 5]);
        assert_eq!(
            out_of_range.validate(),
            Err(MeshError::IndexOutOfRange {
                index: 5,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn moved_translates_every_vertex() {
        let mesh = Mesh::cuboid(1.0, 1.0, 1.0);
        let moved = mesh.moved(&Placement::translation(9.0, 0.0, 9.0));
        let (lo, hi) = moved.bounds().unwrap();
        assert_relative_eq!(lo[0], 8.5);
        assert_relative_eq!(hi[2], 9.5);
        assert_eq!(moved.indices, mesh.indices);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(Mesh::default().bounds().is_none());
    }
}
