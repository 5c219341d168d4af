//! Projection of points onto the principal axes and axis-plane edge cuts.

use nalgebra::{Point2, Point3};

use crate::float_types::Real;

/// One of the three principal axes a mesh can be cut along.
///
/// The variants are `Copy` and carry no state, so a single value can be
/// shared freely across threads; they replace the usual trio of per-axis
/// helper singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Coordinate of `p` along this axis.
    #[inline]
    pub fn dimension(self, p: &Point3<Real>) -> Real {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
            Axis::Z => p.z,
        }
    }

    /// Point on the segment `a -> b` whose coordinate along this axis equals
    /// `threshold`.
    ///
    /// The interpolation parameter is `(threshold - dim(a)) / (dim(b) -
    /// dim(a))`; the caller guarantees the segment actually crosses the
    /// plane. The axis coordinate of the result is pinned to `threshold`
    /// exactly, so cut points dedup cleanly and re-classify onto the plane in
    /// later splits.
    pub fn cut_edge(self, a: &Point3<Real>, b: &Point3<Real>, threshold: Real) -> Point3<Real> {
        let t = (threshold - self.dimension(a)) / (self.dimension(b) - self.dimension(a));
        let mut p = a + (b - a) * t;
        match self {
            Axis::X => p.x = threshold,
            Axis::Y => p.y = threshold,
            Axis::Z => p.z = threshold,
        }
        p
    }

    /// Linear interpolation of two texture-space points by a 0..1 fraction.
    ///
    /// Texture space has no axis to project onto, so this takes the fraction
    /// precomputed from the matching 3D edge instead of a threshold.
    pub fn cut_edge_perc(a: &Point2<Real>, b: &Point2<Real>, perc: Real) -> Point2<Real> {
        a + (b - a) * perc
    }
}
