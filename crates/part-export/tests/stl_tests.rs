//! Tests for STL export functionality.

use part_export::{export_ascii_stl, export_binary_stl, ExportError, Exporter, StlExporter};
use part_types::{Mesh, MeshError};

fn make_triangle_mesh() -> Mesh {
    Mesh::new(
        vec![
            0.0, 0.0, 0.0, // v0
            1.0, 0.0, 0.0, // v1
            0.0, 1.0, 0.0, // v2
        ],
        vec![0, 1, 2],
    )
}

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[test]
fn binary_stl_header_is_80_bytes() {
    let mesh = make_triangle_mesh();
    let stl = export_binary_stl(&mesh, "test").unwrap();
    assert!(stl.len() >= 80, "Binary STL must be at least 80 bytes");
    let header = String::from_utf8_lossy(&stl[..80]);
    assert!(header.contains("test"), "Header should contain solid name");
}

#[test]
fn binary_stl_file_size_formula() {
    let mesh = Mesh::cuboid(1.0, 1.0, 1.0);
    let stl = export_binary_stl(&mesh, "box").unwrap();
    let tri_count = mesh.indices.len() / 3;
    assert_eq!(
        stl.len(),
        80 + 4 + tri_count * 50,
        "Binary STL size = 80 + 4 + N*50 where N={}",
        tri_count
    );
}

#[test]
fn binary_stl_triangle_count_matches() {
    let mesh = Mesh::cuboid(2.0, 3.0, 4.0);
    let stl = export_binary_stl(&mesh, "box").unwrap();
    let tri_count = u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]);
    assert_eq!(tri_count, 12);
}

#[test]
fn binary_stl_normal_follows_winding() {
    let stl = export_binary_stl(&make_triangle_mesh(), "tri").unwrap();
    assert_eq!(read_f32(&stl, 84), 0.0);
    assert_eq!(read_f32(&stl, 88), 0.0);
    assert_eq!(read_f32(&stl, 92), 1.0);
}

#[test]
fn long_names_are_truncated_to_header() {
    let name = "x".repeat(200);
    let stl = export_binary_stl(&make_triangle_mesh(), &name).unwrap();
    assert_eq!(stl.len(), 80 + 4 + 50);
}

#[test]
fn ascii_stl_has_correct_keywords() {
    let mesh = make_triangle_mesh();
    let stl = export_ascii_stl(&mesh, "test_solid").unwrap();
    assert!(stl.starts_with("solid test_solid\n"));
    assert!(stl.ends_with("endsolid test_solid\n"));
    assert!(stl.contains("facet normal 0 0 1"));
    assert!(stl.contains("outer loop"));
    assert!(stl.contains("vertex 1 0 0"));
    assert!(stl.contains("endloop"));
    assert!(stl.contains("endfacet"));
}

#[test]
fn empty_mesh_returns_error() {
    let mesh = Mesh::default();
    assert_eq!(
        export_binary_stl(&mesh, "empty"),
        Err(ExportError::InvalidMesh(MeshError::Empty))
    );
    assert!(export_ascii_stl(&mesh, "empty").is_err());
}

#[test]
fn invalid_index_returns_error() {
    let mesh = Mesh::new(vec![0.0, 0.0, 0.0], vec![0, 1, 2]);
    assert!(export_binary_stl(&mesh, "bad").is_err());
    assert!(export_ascii_stl(&mesh, "bad").is_err());
}

// ---------------------------------------------------------------------------
// StlExporter
// ---------------------------------------------------------------------------

#[test]
fn exporter_writes_binary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("block.stl");
    let exporter = StlExporter::binary();
    assert_eq!(exporter.extension(), "stl");

    exporter.export(&Mesh::cuboid(1.0, 1.0, 1.0), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 80 + 4 + 12 * 50);
    assert!(String::from_utf8_lossy(&bytes[..80]).contains("block"));
}

#[test]
fn exporter_writes_ascii_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plate.stl");
    StlExporter::ascii()
        .export(&make_triangle_mesh(), &path)
        .unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid plate\n"));
}

#[test]
fn exporter_reports_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("part.stl");
    let err = StlExporter::binary()
        .export(&make_triangle_mesh(), &path)
        .unwrap_err();
    assert!(matches!(err, ExportError::Write { path: p, .. } if p == path));
}

#[test]
fn exporter_rejects_invalid_mesh_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.stl");
    assert!(StlExporter::binary().export(&Mesh::default(), &path).is_err());
    assert!(!path.exists());
}
