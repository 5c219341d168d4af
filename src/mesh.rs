//! The triangle mesh data model.

use std::sync::Arc;

use nalgebra::{Point2, Point3};

use crate::aabb::Aabb;
use crate::float_types::Real;
use crate::material::Material;

/// Display name given to meshes that were not named explicitly.
pub const DEFAULT_NAME: &str = "Mesh";

/// Per-corner texture data of a triangle.
///
/// A triangle either has texture coordinates at all three corners or at
/// none; the all-or-nothing rule is carried by [`Triangle::texture`] being a
/// single `Option` of this struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleTexture {
    /// Indices into the owning mesh's texture-vertex list.
    pub indices: [usize; 3],
    /// The referenced texture vertices, denormalized.
    pub coords: [Point2<Real>; 3],
}

/// A triangle of a [`Mesh`].
///
/// Corner positions are stored denormalized next to the indices so splitting
/// never has to chase the owning vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Indices into the owning mesh's vertex list.
    pub indices: [usize; 3],
    /// The referenced vertices, denormalized.
    pub positions: [Point3<Real>; 3],
    pub texture: Option<TriangleTexture>,
    /// Index into the owning mesh's material list.
    pub material: Option<usize>,
}

impl Triangle {
    pub fn new(indices: [usize; 3], positions: [Point3<Real>; 3]) -> Self {
        Triangle {
            indices,
            positions,
            texture: None,
            material: None,
        }
    }

    pub fn area(&self) -> Real {
        let ab = self.positions[1] - self.positions[0];
        let ac = self.positions[2] - self.positions[0];
        ab.cross(&ac).norm() / 2.0
    }
}

/// An indexed triangle mesh with optional texture data and shared materials.
///
/// Every triangle's vertex and texture indices are valid offsets into this
/// mesh's own lists; a mesh produced by splitting never references another
/// mesh's arrays. Splitting reads a mesh and builds two fully re-indexed new
/// ones, so a `Mesh` is never mutated by the partitioning pipeline.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Point3<Real>>,
    pub texture_vertices: Vec<Point2<Real>>,
    pub triangles: Vec<Triangle>,
    /// Shared with every mesh split off from the same source.
    pub materials: Arc<Vec<Material>>,
    pub name: String,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Point3<Real>>,
        texture_vertices: Vec<Point2<Real>>,
        triangles: Vec<Triangle>,
        materials: Arc<Vec<Material>>,
    ) -> Self {
        Mesh {
            vertices,
            texture_vertices,
            triangles,
            materials,
            name: DEFAULT_NAME.to_string(),
        }
    }

    /// A mesh with no geometry at all.
    pub fn empty() -> Self {
        Mesh::new(Vec::new(), Vec::new(), Vec::new(), Arc::new(Vec::new()))
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box of the vertex positions, `None` for a vertexless mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }

    /// Arithmetic mean of all vertex positions.
    ///
    /// Unweighted by triangle area, so dense regions pull the centroid
    /// toward themselves; the tiler's thresholds are defined on this value.
    /// A vertexless mesh yields the origin.
    pub fn centroid(&self) -> Point3<Real> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Point3::origin(), |acc, v| acc + v.coords);
        sum / self.vertices.len() as Real
    }

    /// Sum of all triangle areas.
    pub fn surface_area(&self) -> Real {
        self.triangles.iter().map(Triangle::area).sum()
    }
}
