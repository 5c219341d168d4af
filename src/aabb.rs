//! Axis-aligned bounding boxes in mesh space and texture space.

use nalgebra::{Point2, Point3};

use crate::float_types::Real;

/// Axis-aligned bounding box of a set of 3D points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Tightest box around `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Point3<Real>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Aabb::new(*first, *first);
        for p in rest {
            aabb.mins.x = aabb.mins.x.min(p.x);
            aabb.mins.y = aabb.mins.y.min(p.y);
            aabb.mins.z = aabb.mins.z.min(p.z);
            aabb.maxs.x = aabb.maxs.x.max(p.x);
            aabb.maxs.y = aabb.maxs.y.max(p.y);
            aabb.maxs.z = aabb.maxs.z.max(p.z);
        }
        Some(aabb)
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        Point3::new(
            (self.mins.x + self.maxs.x) / 2.0,
            (self.mins.y + self.maxs.y) / 2.0,
            (self.mins.z + self.maxs.z) / 2.0,
        )
    }
}

/// Axis-aligned bounding box in texture (UV) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    pub mins: Point2<Real>,
    pub maxs: Point2<Real>,
}

impl Aabb2 {
    #[inline]
    pub const fn new(mins: Point2<Real>, maxs: Point2<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Degenerate box containing only `p`, ready to [`grow`](Self::grow).
    #[inline]
    pub const fn at(p: Point2<Real>) -> Self {
        Self { mins: p, maxs: p }
    }

    /// Expand to contain `p`.
    pub fn grow(&mut self, p: &Point2<Real>) {
        self.mins.x = self.mins.x.min(p.x);
        self.mins.y = self.mins.y.min(p.y);
        self.maxs.x = self.maxs.x.max(p.x);
        self.maxs.y = self.maxs.y.max(p.y);
    }

    #[inline]
    pub fn width(&self) -> Real {
        self.maxs.x - self.mins.x
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.maxs.y - self.mins.y
    }

    #[inline]
    pub fn area(&self) -> Real {
        self.width() * self.height()
    }
}
