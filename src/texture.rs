//! Clustering of triangles into texture-space islands, per material.
//!
//! This is the analysis half of atlas repacking and deliberately stops
//! there: islands are found and sized, but nothing repacks them, rewrites
//! UV coordinates or recomposites texture images yet.

use std::collections::BTreeMap;

use log::debug;

use crate::aabb::Aabb2;
use crate::float_types::Real;
use crate::mesh::{Mesh, Triangle};

/// A connected cluster of same-material triangles that are contiguous in
/// texture space.
#[derive(Debug, Clone)]
pub struct TextureIsland {
    /// Index into the mesh's material list.
    pub material: usize,
    /// Indices into the mesh's triangle list.
    pub triangles: Vec<usize>,
    /// Bounds of the island's texture coordinates.
    pub bounds: Aabb2,
}

/// Two triangles are texture-adjacent when they share an edge in UV space,
/// i.e. two corners with exactly equal texture coordinates.
fn texture_adjacent(a: &Triangle, b: &Triangle) -> bool {
    let (Some(ta), Some(tb)) = (&a.texture, &b.texture) else {
        return false;
    };
    let mut shared = 0;
    for ca in &ta.coords {
        if tb.coords.iter().any(|cb| cb == ca) {
            shared += 1;
        }
    }
    shared >= 2
}

/// Group every textured, material-carrying triangle of `mesh` into texture
/// islands.
pub fn texture_islands(mesh: &Mesh) -> Vec<TextureIsland> {
    // Triangles grouped by material, in material order.
    let mut by_material: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, tri) in mesh.triangles.iter().enumerate() {
        if tri.texture.is_none() {
            continue;
        }
        if let Some(material) = tri.material {
            by_material.entry(material).or_default().push(index);
        }
    }

    let mut islands = Vec::new();
    for (material, ungrouped) in by_material {
        let clusters = cluster_material(mesh, ungrouped);
        debug!(
            "material {} has {} texture island(s)",
            material,
            clusters.len()
        );
        for triangles in clusters {
            let bounds = uv_bounds(mesh, &triangles);
            islands.push(TextureIsland {
                material,
                triangles,
                bounds,
            });
        }
    }
    islands
}

/// Side length of a square texture able to hold all `islands`, measured in
/// UV units: the square root of the summed island bounding-box areas.
pub fn atlas_size_hint(islands: &[TextureIsland]) -> Real {
    islands
        .iter()
        .map(|island| island.bounds.area())
        .sum::<Real>()
        .sqrt()
}

/// Grow clusters to a fixpoint: seed with one ungrouped triangle, sweep the
/// cluster against the remaining triangles moving every texture-adjacent one
/// in, and close the cluster once a full sweep adds nothing.
fn cluster_material(mesh: &Mesh, mut remaining: Vec<usize>) -> Vec<Vec<usize>> {
    let mut clusters = Vec::new();
    if remaining.is_empty() {
        return clusters;
    }

    let mut current = vec![remaining.remove(0)];
    while !remaining.is_empty() {
        let before = current.len();

        let mut i = 0;
        while i < current.len() {
            let member = &mesh.triangles[current[i]];
            let mut n = 0;
            while n < remaining.len() {
                if texture_adjacent(member, &mesh.triangles[remaining[n]]) {
                    current.push(remaining.remove(n));
                } else {
                    n += 1;
                }
            }
            i += 1;
        }

        if before == current.len() {
            clusters.push(std::mem::replace(&mut current, vec![remaining.remove(0)]));
        }
    }
    clusters.push(current);

    clusters
}

fn uv_bounds(mesh: &Mesh, triangles: &[usize]) -> Aabb2 {
    let mut corners = triangles
        .iter()
        .filter_map(|&i| mesh.triangles[i].texture.as_ref())
        .flat_map(|t| t.coords.iter());
    let first = corners
        .next()
        .expect("texture islands only contain textured triangles");
    let mut bounds = Aabb2::at(*first);
    for corner in corners {
        bounds.grow(corner);
    }
    bounds
}
