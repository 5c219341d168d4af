//! Test support library
//! Mesh builders and comparison helpers shared by the integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use meshtile::float_types::Real;
use meshtile::material::Material;
use meshtile::mesh::{Mesh, Triangle, TriangleTexture};
use nalgebra::{Point2, Point3};

/// Unit cube centered at the origin: 8 vertices, 12 triangles, outward
/// winding, no texture data.
pub fn unit_cube() -> Mesh {
    let vertices = vec![
        Point3::new(-0.5, -0.5, -0.5),
        Point3::new(0.5, -0.5, -0.5),
        Point3::new(0.5, 0.5, -0.5),
        Point3::new(-0.5, 0.5, -0.5),
        Point3::new(-0.5, -0.5, 0.5),
        Point3::new(0.5, -0.5, 0.5),
        Point3::new(0.5, 0.5, 0.5),
        Point3::new(-0.5, 0.5, 0.5),
    ];

    let faces: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];

    let triangles = faces
        .iter()
        .map(|&[a, b, c]| Triangle::new([a, b, c], [vertices[a], vertices[b], vertices[c]]))
        .collect();

    Mesh::new(vertices, Vec::new(), triangles, Arc::new(Vec::new()))
}

/// A single textured triangle in the z = 0 plane with UVs matching the
/// vertex layout: A=(0,0,0)/uv(0,0), B=(2,0,0)/uv(1,0), C=(0,2,0)/uv(0,1).
pub fn textured_triangle() -> Mesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
    ];
    let uvs = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.0, 1.0),
    ];

    let triangle = Triangle {
        indices: [0, 1, 2],
        positions: [vertices[0], vertices[1], vertices[2]],
        texture: Some(TriangleTexture {
            indices: [0, 1, 2],
            coords: [uvs[0], uvs[1], uvs[2]],
        }),
        material: Some(0),
    };

    Mesh::new(
        vertices,
        uvs,
        vec![triangle],
        Arc::new(vec![Material {
            name: "skin".to_string(),
            diffuse_map: Some("skin.png".to_string()),
        }]),
    )
}

/// Every triangle of every mesh must reference only indices inside its own
/// mesh's lists, and the denormalized corner data must agree with them.
pub fn assert_no_orphan_indices(mesh: &Mesh) {
    for tri in &mesh.triangles {
        for corner in 0..3 {
            let index = tri.indices[corner];
            assert!(
                index < mesh.vertices.len(),
                "vertex index {} out of range ({} vertices)",
                index,
                mesh.vertices.len()
            );
            assert_eq!(
                mesh.vertices[index], tri.positions[corner],
                "denormalized position disagrees with the vertex list"
            );
        }
        if let Some(tex) = &tri.texture {
            for corner in 0..3 {
                let index = tex.indices[corner];
                assert!(
                    index < mesh.texture_vertices.len(),
                    "texture index {} out of range ({} texture vertices)",
                    index,
                    mesh.texture_vertices.len()
                );
                assert_eq!(
                    mesh.texture_vertices[index], tex.coords[corner],
                    "denormalized UV disagrees with the texture-vertex list"
                );
            }
        }
    }
}

/// Order-independent content signature of a set of leaf meshes: one sorted
/// string per triangle, sorted overall. Two tilings of the same mesh must
/// produce equal signatures no matter how their tasks interleaved.
pub fn leaf_signature(leaves: &[Mesh]) -> Vec<String> {
    let mut signature: Vec<String> = leaves
        .iter()
        .flat_map(|mesh| mesh.triangles.iter())
        .map(|tri| {
            let mut corners: Vec<String> = tri
                .positions
                .iter()
                .map(|p| format!("{:.12}/{:.12}/{:.12}", p.x, p.y, p.z))
                .collect();
            corners.sort();
            corners.join(" ")
        })
        .collect();
    signature.sort();
    signature
}

pub fn total_triangles(leaves: &[Mesh]) -> usize {
    leaves.iter().map(|mesh| mesh.triangles.len()).sum()
}

pub fn total_area(leaves: &[Mesh]) -> Real {
    leaves.iter().map(Mesh::surface_area).sum()
}

/// Scratch directory for file round-trip tests, unique per test tag.
pub fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("meshtile-test-{}-{}", std::process::id(), tag));
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}
