//! Errors raised while loading, writing or partitioning meshes.

use thiserror::Error;

/// All the ways a mesh operation can fail.
///
/// Format errors abort a load outright: no partial mesh is ever returned.
/// Geometric degeneracies during splitting are *not* errors; the splitter
/// resolves them locally with its on-the-plane rule.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric token that does not parse as a coordinate.
    #[error("line {line_no}: malformed number: {source}")]
    ParseFloat {
        line_no: usize,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// An index token that does not parse as an integer.
    #[error("line {line_no}: malformed index: {source}")]
    ParseInt {
        line_no: usize,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A recognized directive with the wrong number of tokens.
    #[error("line {line_no}: malformed directive: '{line}'")]
    MalformedLine { line_no: usize, line: String },

    /// A free-form curve/surface directive this format subset rejects.
    #[error("line {line_no}: element not supported: '{directive}'")]
    UnsupportedDirective { line_no: usize, directive: String },

    /// `usemtl` naming a material no `mtllib` declared.
    #[error("line {line_no}: material '{name}' not found")]
    UnknownMaterial { line_no: usize, name: String },

    /// A face that is not exactly three `v`, `v/t` or `v/t/n` tokens.
    #[error("line {line_no}: invalid face: '{line}'")]
    InvalidFace { line_no: usize, line: String },

    /// A face index referencing a vertex or texture vertex that was never
    /// declared.
    #[error("line {line_no}: index {index} out of range (list has {len} entries)")]
    IndexOutOfRange {
        line_no: usize,
        index: usize,
        len: usize,
    },

    /// A request rejected before any work begins (bad depth, lod count, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
