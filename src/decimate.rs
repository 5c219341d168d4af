//! Level-of-detail generation driver.
//!
//! Mesh simplification itself is an external concern behind the
//! [`Decimator`] trait; this module only ladders quality ratios, fans the
//! ratios out as parallel tasks and keeps the file bookkeeping consistent
//! with the rest of the tiling pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;

use crate::errors::MeshError;
use crate::float_types::Real;
use crate::mesh::Mesh;

/// External mesh-simplification algorithm.
///
/// Implementations receive the full mesh and a target triangle count and
/// return a simplified mesh with the same channel shape (positions, texture
/// coordinates, materials). This crate ships no implementation; the trait is
/// the boundary to whichever simplifier the caller links in.
pub trait Decimator: Sync {
    fn decimate(&self, mesh: &Mesh, target_triangles: usize) -> Result<Mesh, MeshError>;
}

/// Write `lods` levels of detail for the OBJ at `source` into `dest_dir`.
///
/// Level 0 is a verbatim copy of the source file. Each further level `i`
/// (0-based among the decimated ones) is simplified to quality `1 - (i + 1)
/// / lods`, i.e. a target of `ceil(triangle_count * quality)` triangles, and
/// written as `<stem>_<i>.obj`. The ratios run concurrently; the first
/// failing one aborts the whole operation.
///
/// Returns the written file paths, original first, finest to coarsest.
pub fn decimate_lods(
    source: &Path,
    dest_dir: &Path,
    lods: usize,
    decimator: &impl Decimator,
) -> Result<Vec<PathBuf>, MeshError> {
    if lods < 1 {
        return Err(MeshError::InvalidArgument(
            "lod count must be at least 1".to_string(),
        ));
    }

    let file_name = source.file_name().ok_or_else(|| {
        MeshError::InvalidArgument(format!("not a file path: '{}'", source.display()))
    })?;
    let stem = source
        .file_stem()
        .unwrap_or(file_name)
        .to_string_lossy()
        .into_owned();

    let mesh = Mesh::load_obj(source)?;

    let original_copy = dest_dir.join(file_name);
    fs::copy(source, &original_copy)?;

    let qualities: Vec<Real> = (0..lods - 1)
        .map(|i| 1.0 - (i + 1) as Real / lods as Real)
        .collect();
    let variants: Vec<(Real, PathBuf)> = qualities
        .iter()
        .enumerate()
        .map(|(i, &quality)| (quality, dest_dir.join(format!("{stem}_{i}.obj"))))
        .collect();

    variants.par_iter().try_for_each(|(quality, dest)| {
        let target = (mesh.triangles.len() as Real * quality).ceil() as usize;
        info!(
            "decimating {} to {} triangles (quality {:.2})",
            file_name.to_string_lossy(),
            target,
            quality
        );
        let decimated = decimator.decimate(&mesh, target)?;
        decimated.write_obj(dest)
    })?;

    let mut files = vec![original_copy];
    files.extend(variants.into_iter().map(|(_, path)| path));
    Ok(files)
}
