//! Recursive centroid subdivision of a mesh into a set of leaf tiles.
//!
//! Each round splits a mesh at its own centroid along X then Y (and Z in
//! volumetric mode), discards empty children and recurses into the rest
//! concurrently. Branches share nothing but the leaf collector, so the leaf
//! set for a given mesh and depth is the same no matter how the scheduler
//! interleaves them.

use std::sync::Mutex;

use log::debug;
use rayon::prelude::*;

use crate::axis::Axis;
use crate::errors::MeshError;
use crate::mesh::Mesh;

/// Which axes one subdivision round cuts along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingMode {
    /// X then Y: up to four quadrants per round.
    Planar,
    /// X, Y, then Z: up to eight octants per round.
    Volumetric,
}

/// Output of [`tile`].
#[derive(Debug)]
pub struct TileSet {
    /// The non-empty leaf meshes, in no particular order.
    pub leaves: Vec<Mesh>,
    /// Total number of triangles clipped across every split of the tree.
    /// Diagnostic only.
    pub straddle_count: usize,
}

/// Partition `mesh` into spatial tiles, `depth` subdivision rounds deep.
///
/// A depth of 1 produces the quadrants/octants of the mesh itself; each
/// further level re-subdivides every non-empty child at that child's own
/// centroid. Children without triangles are dropped immediately and never
/// appear as leaves. `depth == 0` is rejected before any work happens.
///
/// Independent subtrees run as parallel tasks; a failure in any branch
/// aborts the whole tiling rather than returning a partial leaf set.
pub fn tile(mesh: &Mesh, depth: u32, mode: TilingMode) -> Result<TileSet, MeshError> {
    if depth == 0 {
        return Err(MeshError::InvalidArgument(
            "tiling depth must be at least 1".to_string(),
        ));
    }

    let leaves = Mutex::new(Vec::new());
    let straddle_count = subdivide(mesh, depth, mode, &leaves)?;

    let leaves = leaves
        .into_inner()
        .expect("no tiling branch panicked while appending leaves");
    debug!(
        "tiled '{}' into {} leaves ({} straddling triangles clipped)",
        mesh.name,
        leaves.len(),
        straddle_count
    );

    Ok(TileSet {
        leaves,
        straddle_count,
    })
}

/// One subdivision round plus the recursion into its children.
fn subdivide(
    mesh: &Mesh,
    depth: u32,
    mode: TilingMode,
    leaves: &Mutex<Vec<Mesh>>,
) -> Result<usize, MeshError> {
    let center = mesh.centroid();
    let mut straddle = 0;

    let (west, east, n) = mesh.split(Axis::X, center.x);
    straddle += n;

    let mut quadrants = Vec::with_capacity(4);
    for half in [west, east] {
        let (south, north, n) = half.split(Axis::Y, center.y);
        straddle += n;
        quadrants.push(south);
        quadrants.push(north);
    }

    let mut children = match mode {
        TilingMode::Planar => quadrants,
        TilingMode::Volumetric => {
            let mut octants = Vec::with_capacity(8);
            for quadrant in quadrants {
                let (near, far, n) = quadrant.split(Axis::Z, center.z);
                straddle += n;
                octants.push(near);
                octants.push(far);
            }
            octants
        },
    };
    children.retain(|child| !child.is_empty());

    if depth == 1 {
        let mut collected = leaves
            .lock()
            .expect("no tiling branch panicked while appending leaves");
        collected.extend(children);
        return Ok(straddle);
    }

    // Fork one task per child and join on all of them; the first error wins
    // and stops the siblings from being awaited further.
    let nested: usize = children
        .into_par_iter()
        .map(|child| subdivide(&child, depth - 1, mode, leaves))
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    Ok(straddle + nested)
}
