//! Region of influence around a single source.

use ps_core::Extent;

/// Extents (all non-negative, in metres) beyond which a source's
/// contribution is treated as negligible.
///
/// Expressed relative to the source: the region is
/// `dx ∈ [-upwind, downwind]`, `dy ∈ [-crosswind_neg, crosswind_pos]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluenceBoundary {
    pub upwind:        f64,
    pub downwind:      f64,
    pub crosswind_neg: f64,
    pub crosswind_pos: f64,
}

impl InfluenceBoundary {
    pub fn new(upwind: f64, downwind: f64, crosswind_neg: f64, crosswind_pos: f64) -> Self {
        Self { upwind, downwind, crosswind_neg, crosswind_pos }
    }

    /// Inclusive test of a displacement against the boundary.
    #[inline]
    pub fn contains(&self, dx: f64, dy: f64) -> bool {
        dx >= -self.upwind
            && dx <= self.downwind
            && dy >= -self.crosswind_neg
            && dy <= self.crosswind_pos
    }

    /// The boundary as a displacement rectangle.
    pub fn extent(&self) -> Extent {
        Extent::new(-self.upwind, self.downwind, -self.crosswind_neg, self.crosswind_pos)
    }

    /// Radius of the smallest circle around the source enclosing the
    /// boundary rectangle.
    pub fn enclosing_radius(&self) -> f64 {
        let dx = self.upwind.max(self.downwind);
        let dy = self.crosswind_neg.max(self.crosswind_pos);
        dx.hypot(dy)
    }
}

/// How a model treats displacements outside its [`InfluenceBoundary`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// The boundary only sizes the environment; concentration is evaluated
    /// everywhere.
    #[default]
    AreaSizing,
    /// Concentration is forced to zero outside the boundary.
    HardBounded,
}
