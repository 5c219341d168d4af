//! Insertion-ordered, deduplicating index assignment for split output.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use nalgebra::{Point2, Point3};

use crate::float_types::Real;

/// Hashable identity of a geometric point.
///
/// Splitting dedups on exact value equality: two points collapse to a single
/// index only when every coordinate compares equal. The key is the IEEE bit
/// pattern with negative zero folded into positive zero, so `-0.0` and `0.0`
/// remain one vertex.
pub trait PointKey {
    type Key: core::hash::Hash + Eq + Copy;

    fn key(&self) -> Self::Key;
}

#[inline]
fn coord_bits(v: Real) -> u64 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

impl PointKey for Point3<Real> {
    type Key = [u64; 3];

    #[inline]
    fn key(&self) -> [u64; 3] {
        [coord_bits(self.x), coord_bits(self.y), coord_bits(self.z)]
    }
}

impl PointKey for Point2<Real> {
    type Key = [u64; 2];

    #[inline]
    fn key(&self) -> [u64; 2] {
        [coord_bits(self.x), coord_bits(self.y)]
    }
}

/// Assigns dense, insertion-ordered indices to distinct points.
///
/// Scoped to one side of one split: when the split completes, [`into_points`]
/// yields the points in index order and the result becomes that side's vertex
/// (or texture-vertex) list.
///
/// [`into_points`]: IndexMap::into_points
pub struct IndexMap<P: PointKey> {
    indices: HashMap<P::Key, usize>,
    points: Vec<P>,
}

impl<P: PointKey + Copy> IndexMap<P> {
    pub fn new() -> Self {
        IndexMap {
            indices: HashMap::new(),
            points: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        IndexMap {
            indices: HashMap::with_capacity(capacity),
            points: Vec::with_capacity(capacity),
        }
    }

    /// Index of `point`, assigning the next free index on first sight.
    pub fn add(&mut self, point: P) -> usize {
        match self.indices.entry(point.key()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = self.points.len();
                self.points.push(point);
                entry.insert(index);
                index
            },
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The recorded points, ordered by their assigned indices (0..N-1).
    pub fn into_points(self) -> Vec<P> {
        self.points
    }
}

impl<P: PointKey + Copy> Default for IndexMap<P> {
    fn default() -> Self {
        Self::new()
    }
}
