//! Scalar type and numeric tolerances.

/// Scalar used for all mesh and texture coordinates.
pub type Real = f64;

/// Absolute tolerance for deciding that a vertex lies *on* a cutting plane.
///
/// This is a fixed tolerance, not scaled to the mesh: vertices of very large
/// or very small meshes near a cut can be classified differently than on a
/// unit-scale mesh. Existing tilings depend on the current classification, so
/// switching to a scale-relative tolerance is a breaking change and has not
/// been made here.
pub const EPSILON: Real = 1e-10;
