//! Splitting a mesh by an axis-aligned plane.
//!
//! The splitter classifies every triangle against the plane `axis ==
//! threshold`, copies one-sided triangles unchanged and clips straddling
//! ones into three fragments (one on the minority side, two on the majority
//! side), re-indexing both output meshes through their own [`IndexMap`]s.
//! The input mesh is only read.

use nalgebra::{Point2, Point3};

use crate::axis::Axis;
use crate::float_types::{EPSILON, Real};
use crate::index_map::IndexMap;
use crate::mesh::{Mesh, Triangle, TriangleTexture};

/// One side of a split under construction.
struct SideBuilder {
    vertices: IndexMap<Point3<Real>>,
    texture_vertices: IndexMap<Point2<Real>>,
    triangles: Vec<Triangle>,
}

impl SideBuilder {
    fn new(source: &Mesh) -> Self {
        SideBuilder {
            vertices: IndexMap::with_capacity(source.vertices.len()),
            texture_vertices: IndexMap::with_capacity(source.texture_vertices.len()),
            triangles: Vec::with_capacity(source.triangles.len()),
        }
    }

    /// Emit a triangle into this side, assigning (or reusing) indices for
    /// its corners.
    fn push(
        &mut self,
        positions: [Point3<Real>; 3],
        coords: Option<[Point2<Real>; 3]>,
        material: Option<usize>,
    ) {
        let indices = positions.map(|p| self.vertices.add(p));
        let texture = coords.map(|coords| TriangleTexture {
            indices: coords.map(|c| self.texture_vertices.add(c)),
            coords,
        });
        self.triangles.push(Triangle {
            indices,
            positions,
            texture,
            material,
        });
    }

    fn build(self, source: &Mesh) -> Mesh {
        Mesh::new(
            self.vertices.into_points(),
            self.texture_vertices.into_points(),
            self.triangles,
            source.materials.clone(),
        )
    }
}

/// Fraction of the way from `a` to `b` at which `p` sits, by 3D distance.
///
/// Applied verbatim to the matching UV edge so texture interpolation tracks
/// the 3D cut exactly.
fn intersection_perc(a: &Point3<Real>, b: &Point3<Real>, p: &Point3<Real>) -> Real {
    (p - a).norm() / (b - a).norm()
}

impl Mesh {
    /// Split this mesh by the plane `axis == threshold`.
    ///
    /// Returns the sub-mesh strictly below the threshold, the sub-mesh at or
    /// above it, and the number of triangles that had to be clipped. Both
    /// outputs are fully re-indexed and share this mesh's material list.
    pub fn split(&self, axis: Axis, threshold: Real) -> (Mesh, Mesh, usize) {
        let mut left = SideBuilder::new(self);
        let mut right = SideBuilder::new(self);
        let mut straddling = 0;

        for tri in &self.triangles {
            let a_left = axis.dimension(&tri.positions[0]) < threshold;
            let b_left = axis.dimension(&tri.positions[1]) < threshold;
            let c_left = axis.dimension(&tri.positions[2]) < threshold;

            // The eight side combinations reduce to four shapes once the
            // triangle is relabeled cyclically to start at the lone vertex.
            match (a_left, b_left, c_left) {
                (true, true, true) => {
                    left.push(tri.positions, tri.texture.map(|t| t.coords), tri.material);
                },
                (false, false, false) => {
                    right.push(tri.positions, tri.texture.map(|t| t.coords), tri.material);
                },
                (true, true, false) => {
                    clip_minority(axis, threshold, tri, 2, &mut right, &mut left, false);
                    straddling += 1;
                },
                (true, false, true) => {
                    clip_minority(axis, threshold, tri, 1, &mut right, &mut left, false);
                    straddling += 1;
                },
                (false, true, true) => {
                    clip_minority(axis, threshold, tri, 0, &mut right, &mut left, false);
                    straddling += 1;
                },
                (false, true, false) => {
                    clip_minority(axis, threshold, tri, 1, &mut left, &mut right, true);
                    straddling += 1;
                },
                (false, false, true) => {
                    clip_minority(axis, threshold, tri, 2, &mut left, &mut right, true);
                    straddling += 1;
                },
                (true, false, false) => {
                    clip_minority(axis, threshold, tri, 0, &mut left, &mut right, true);
                    straddling += 1;
                },
            }
        }

        (left.build(self), right.build(self), straddling)
    }
}

/// Clip a straddling triangle whose corner `lone` is alone on one side.
///
/// `minority` receives the tip triangle around the lone vertex, `majority`
/// the two triangles covering the remaining quadrilateral. `lone_is_left`
/// selects between the two historical triangulations of that quadrilateral:
/// the left-minority path cuts it along `T1 -> W2`, the right-minority path
/// along `T2 -> W1`. Winding of the input triangle is preserved in every
/// fragment.
///
/// When both majority-side corners lie within [`EPSILON`] of the plane the
/// triangle sits on the cut itself; it is then copied whole to the minority
/// side instead of being shaved into slivers.
fn clip_minority(
    axis: Axis,
    threshold: Real,
    tri: &Triangle,
    lone: usize,
    minority: &mut SideBuilder,
    majority: &mut SideBuilder,
    lone_is_left: bool,
) {
    // Relabel cyclically so the lone vertex comes first.
    let v = tri.positions[lone];
    let w1 = tri.positions[(lone + 1) % 3];
    let w2 = tri.positions[(lone + 2) % 3];
    let tex = tri.texture.map(|t| {
        (
            t.coords[lone],
            t.coords[(lone + 1) % 3],
            t.coords[(lone + 2) % 3],
        )
    });

    if (axis.dimension(&w1) - threshold).abs() < EPSILON
        && (axis.dimension(&w2) - threshold).abs() < EPSILON
    {
        // The opposite edge lies on the cutting plane; the triangle belongs
        // to the lone vertex's side in one piece.
        minority.push([v, w1, w2], tex.map(|(tv, tw1, tw2)| [tv, tw1, tw2]), tri.material);
        return;
    }

    let t1 = axis.cut_edge(&v, &w1, threshold);
    let t2 = axis.cut_edge(&v, &w2, threshold);

    let uv = tex.map(|(tv, tw1, tw2)| {
        let t1t = Axis::cut_edge_perc(&tv, &tw1, intersection_perc(&v, &w1, &t1));
        let t2t = Axis::cut_edge_perc(&tv, &tw2, intersection_perc(&v, &w2, &t2));
        (tv, tw1, tw2, t1t, t2t)
    });

    minority.push(
        [v, t1, t2],
        uv.map(|(tv, _, _, t1t, t2t)| [tv, t1t, t2t]),
        tri.material,
    );

    if lone_is_left {
        majority.push(
            [t1, w1, w2],
            uv.map(|(_, tw1, tw2, t1t, _)| [t1t, tw1, tw2]),
            tri.material,
        );
        majority.push(
            [t1, w2, t2],
            uv.map(|(_, _, tw2, t1t, t2t)| [t1t, tw2, t2t]),
            tri.material,
        );
    } else {
        majority.push(
            [t2, w1, w2],
            uv.map(|(_, tw1, tw2, _, t2t)| [t2t, tw1, tw2]),
            tri.material,
        );
        majority.push(
            [t2, t1, w1],
            uv.map(|(_, tw1, _, t1t, t2t)| [t2t, t1t, tw1]),
            tri.material,
        );
    }
}
