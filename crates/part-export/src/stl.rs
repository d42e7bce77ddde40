//! STL serialization of a [`Mesh`], binary and ASCII.

use part_types::Mesh;

use crate::errors::ExportError;

/// Unit normal of the triangle `tri`, or +Z for a degenerate one.
fn facet_normal(mesh: &Mesh, tri: &[u32]) -> [f32; 3] {
    let [ax, ay, az] = mesh.vertex(tri[0]);
    let [bx, by, bz] = mesh.vertex(tri[1]);
    let [cx, cy, cz] = mesh.vertex(tri[2]);
    let (ux, uy, uz) = (bx - ax, by - ay, bz - az);
    let (vx, vy, vz) = (cx - ax, cy - ay, cz - az);
    let nx = uy * vz - uz * vy;
    let ny = uz * vx - ux * vz;
    let nz = ux * vy - uy * vx;
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-12 {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Encode a mesh as binary STL.
///
/// Layout:
/// - 80-byte header carrying `name`
/// - u32 triangle count (little-endian)
/// - per triangle: normal, three vertices (all 3×f32) and a u16 attribute, 50 bytes
pub fn export_binary_stl(mesh: &Mesh, name: &str) -> Result<Vec<u8>, ExportError> {
    mesh.validate()?;
    let tri_count = mesh.triangle_count();

    let mut buf = Vec::with_capacity(80 + 4 + tri_count * 50);

    let header = format!("binary STL: {name}");
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for tri in mesh.indices.chunks_exact(3) {
        for component in facet_normal(mesh, tri) {
            buf.extend_from_slice(&component.to_le_bytes());
        }
        for &idx in tri {
            for coord in mesh.vertex(idx) {
                buf.extend_from_slice(&coord.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Encode a mesh as an ASCII STL solid named `name`.
pub fn export_ascii_stl(mesh: &Mesh, name: &str) -> Result<String, ExportError> {
    mesh.validate()?;

    let mut out = String::with_capacity(mesh.triangle_count() * 300);
    out.push_str(&format!("solid {name}\n"));

    for tri in mesh.indices.chunks_exact(3) {
        let [nx, ny, nz] = facet_normal(mesh, tri);
        out.push_str(&format!("  facet normal {nx} {ny} {nz}\n"));
        out.push_str("    outer loop\n");
        for &idx in tri {
            let [x, y, z] = mesh.vertex(idx);
            out.push_str(&format!("      vertex {x} {y} {z}\n"));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    Ok(out)
}
