mod support;

use std::sync::Arc;

use meshtile::Axis;
use meshtile::float_types::EPSILON;
use meshtile::mesh::{Mesh, Triangle};
use nalgebra::{Point2, Point3};
use support::{assert_no_orphan_indices, textured_triangle, unit_cube};

#[test]
fn split_conserves_triangles() {
    let cube = unit_cube();
    let (left, right, straddling) = cube.split(Axis::X, 0.0);

    // Each clipped triangle becomes three: one on the minority side, two on
    // the majority side.
    assert_eq!(
        left.triangles.len() + right.triangles.len(),
        cube.triangles.len() + straddling * 2,
        "straddling triangles must turn into exactly three fragments"
    );
    // The two x-aligned cube faces don't straddle an x cut; the other four do.
    assert_eq!(straddling, 8);
}

#[test]
fn split_conserves_area() {
    let cube = unit_cube();
    let (left, right, _) = cube.split(Axis::X, 0.1);

    let total = left.surface_area() + right.surface_area();
    assert!(
        (total - cube.surface_area()).abs() < 1e-9,
        "cutting a plane must neither create nor destroy area (got {total})"
    );
}

#[test]
fn split_output_is_fully_reindexed() {
    let cube = unit_cube();
    let (left, right, _) = cube.split(Axis::Y, 0.25);

    assert_no_orphan_indices(&left);
    assert_no_orphan_indices(&right);
}

#[test]
fn split_deduplicates_cut_vertices() {
    let cube = unit_cube();
    let (left, _, _) = cube.split(Axis::X, 0.0);

    for (i, a) in left.vertices.iter().enumerate() {
        for b in left.vertices.iter().skip(i + 1) {
            assert_ne!(a, b, "vertex list must not contain duplicates");
        }
    }
}

#[test]
fn split_sides_respect_the_threshold() {
    let cube = unit_cube();
    let (left, right, _) = cube.split(Axis::Z, 0.0);

    for v in &left.vertices {
        assert!(v.z <= 0.0, "left mesh vertex beyond the plane: {v}");
    }
    for v in &right.vertices {
        assert!(v.z >= 0.0, "right mesh vertex beyond the plane: {v}");
    }
    // Cut vertices sit exactly on the plane in both meshes.
    assert!(left.vertices.iter().any(|v| v.z == 0.0));
    assert!(right.vertices.iter().any(|v| v.z == 0.0));
}

#[test]
fn split_off_mesh_side_is_empty() {
    let cube = unit_cube();
    let (left, right, straddling) = cube.split(Axis::X, 2.0);

    assert_eq!(straddling, 0);
    assert!(right.is_empty(), "nothing lies right of x = 2");
    assert_eq!(left.triangles.len(), cube.triangles.len());
    assert_eq!(left.vertices.len(), cube.vertices.len());
}

#[test]
fn split_preserves_winding() {
    // All triangles of this mesh face +z; so must every fragment.
    let mesh = textured_triangle();
    let (left, right, straddling) = mesh.split(Axis::X, 1.0);

    assert_eq!(straddling, 1);
    for tri in left.triangles.iter().chain(right.triangles.iter()) {
        let ab = tri.positions[1] - tri.positions[0];
        let ac = tri.positions[2] - tri.positions[0];
        assert!(
            ab.cross(&ac).z > 0.0,
            "fragment winding flipped: {:?}",
            tri.positions
        );
    }
}

#[test]
fn split_interpolates_texture_with_the_3d_fraction() {
    let mesh = textured_triangle();
    let (left, right, straddling) = mesh.split(Axis::X, 1.0);

    assert_eq!(straddling, 1);
    // B=(2,0,0) is alone right of x=1; the cut hits B->C at (1,1,0) and
    // B->A at (1,0,0), both halfway along their edges, so the UVs are the
    // halfway UVs as well.
    assert_eq!(right.triangles.len(), 1);
    let tip = &right.triangles[0];
    let tex = tip.texture.as_ref().expect("fragments keep texture data");

    assert_eq!(tip.positions[0], Point3::new(2.0, 0.0, 0.0));
    assert_eq!(tip.positions[1], Point3::new(1.0, 1.0, 0.0));
    assert_eq!(tip.positions[2], Point3::new(1.0, 0.0, 0.0));
    assert_eq!(tex.coords[0], Point2::new(1.0, 0.0));
    assert_eq!(tex.coords[1], Point2::new(0.5, 0.5));
    assert_eq!(tex.coords[2], Point2::new(0.5, 0.0));

    // The quadrilateral side reuses the same two cut UVs.
    assert_eq!(left.triangles.len(), 2);
    for tri in &left.triangles {
        assert!(tri.texture.is_some());
    }
}

#[test]
fn split_copies_the_material_onto_every_fragment() {
    let mesh = textured_triangle();
    let (left, right, _) = mesh.split(Axis::X, 1.0);

    for tri in left.triangles.iter().chain(right.triangles.iter()) {
        assert_eq!(tri.material, Some(0));
    }
    assert!(
        Arc::ptr_eq(&left.materials, &mesh.materials),
        "split meshes share the source material list"
    );
    assert!(Arc::ptr_eq(&right.materials, &mesh.materials));
}

#[test]
fn triangle_on_the_cutting_plane_stays_whole() {
    // Two corners exactly on the plane, the third to its left: clipping
    // would only shave off slivers, so the triangle goes left in one piece.
    let vertices = vec![
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let tri = Triangle::new([0, 1, 2], [vertices[0], vertices[1], vertices[2]]);
    let mesh = Mesh::new(vertices, Vec::new(), vec![tri], Arc::new(Vec::new()));

    let (left, right, straddling) = mesh.split(Axis::X, 0.0);

    assert_eq!(left.triangles.len(), 1);
    assert!(right.is_empty());
    // The triangle reached the clipping path, so it still counts.
    assert_eq!(straddling, 1);
    assert_eq!(left.vertices.len(), 3);
}

#[test]
fn near_plane_corners_use_the_epsilon_rule() {
    // Corners within EPSILON of the plane but strictly below it classify as
    // left; the lone vertex on the right then pulls the whole triangle
    // right under the on-the-line rule.
    let offset = EPSILON / 2.0;
    let vertices = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-offset, -1.0, 0.0),
        Point3::new(-offset, 1.0, 0.0),
    ];
    let tri = Triangle::new([0, 1, 2], [vertices[0], vertices[1], vertices[2]]);
    let mesh = Mesh::new(vertices, Vec::new(), vec![tri], Arc::new(Vec::new()));

    let (left, right, _) = mesh.split(Axis::X, 0.0);

    assert!(left.is_empty());
    assert_eq!(right.triangles.len(), 1);
}

#[test]
fn untextured_split_emits_no_texture_data() {
    let cube = unit_cube();
    let (left, right, _) = cube.split(Axis::X, 0.0);

    assert!(left.texture_vertices.is_empty());
    assert!(right.texture_vertices.is_empty());
    for tri in left.triangles.iter().chain(right.triangles.iter()) {
        assert!(tri.texture.is_none());
    }
}
