//! Source positions and their spatial index.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the source points answers "which sources
//! lie within `r` of this point" without scanning the whole set.  The
//! environment uses it only for plumes with bounded support, where skipping
//! far sources is exact.

use std::slice;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ps_core::Point2;

use crate::{EnvError, EnvResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct SourceEntry {
    point: [f64; 2],
    idx:   usize,
}

impl RTreeObject for SourceEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SourceEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SourceSet ─────────────────────────────────────────────────────────────────

/// An ordered, immutable set of source positions.
#[derive(Clone, Debug)]
pub struct SourceSet {
    positions: Vec<Point2>,
    index:     RTree<SourceEntry>,
}

impl SourceSet {
    /// A set with no sources.
    pub fn empty() -> Self {
        Self { positions: vec![], index: RTree::new() }
    }

    /// Build from points already known to be finite.
    pub(crate) fn from_trusted(positions: Vec<Point2>) -> Self {
        let entries = positions
            .iter()
            .enumerate()
            .map(|(idx, p)| SourceEntry { point: p.to_array(), idx })
            .collect();
        Self { positions, index: RTree::bulk_load(entries) }
    }

    /// Build from explicit points, rejecting non-finite coordinates.
    pub fn from_points(positions: Vec<Point2>) -> EnvResult<Self> {
        if let Some((i, p)) = positions
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(EnvError::TypeConfiguration(format!(
                "source {i} has non-finite coordinates {p}"
            )));
        }
        Ok(Self::from_trusted(positions))
    }

    /// Build from an N × 2 table: every row must have exactly two finite
    /// entries `[x, y]`.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> EnvResult<Self> {
        let positions = rows
            .iter()
            .enumerate()
            .map(|(i, row)| match *row.as_ref() {
                [x, y] => Ok(Point2::new(x, y)),
                ref other => Err(EnvError::TypeConfiguration(format!(
                    "row {i} has {} columns, expected 2",
                    other.len()
                ))),
            })
            .collect::<EnvResult<Vec<_>>>()?;
        Self::from_points(positions)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Point2> {
        self.positions.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point2] {
        &self.positions
    }

    /// Index and position of the source closest to `p`.
    pub fn nearest(&self, p: Point2) -> Option<(usize, Point2)> {
        self.index
            .nearest_neighbor(&p.to_array())
            .map(|e| (e.idx, self.positions[e.idx]))
    }

    /// Sources within Euclidean distance `radius` of `p` (inclusive), in
    /// ascending distance order.
    pub fn within_radius(&self, p: Point2, radius: f64) -> impl Iterator<Item = Point2> + '_ {
        let r2 = radius * radius;
        self.index
            .nearest_neighbor_iter(&p.to_array())
            .take_while(move |e| e.distance_2(&p.to_array()) <= r2)
            .map(|e| self.positions[e.idx])
    }
}

impl Default for SourceSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a Point2;
    type IntoIter = slice::Iter<'a, Point2>;
    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

// ── SourcePositions ───────────────────────────────────────────────────────────

/// How an environment obtains its sources.
#[derive(Clone, Debug, Default)]
pub enum SourcePositions {
    /// Count ~ Poisson(area × density), positions uniform in the region.
    #[default]
    Random,
    /// Use the given set verbatim.
    Explicit(SourceSet),
}

impl SourcePositions {
    /// Validate an N × 2 table into [`SourcePositions::Explicit`].
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> EnvResult<Self> {
        SourceSet::from_rows(rows).map(SourcePositions::Explicit)
    }
}

impl From<SourceSet> for SourcePositions {
    fn from(set: SourceSet) -> Self {
        SourcePositions::Explicit(set)
    }
}
