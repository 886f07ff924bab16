//! Solid Gaussian plume: odor is detected as soon as the agent enters the
//! region where concentration exceeds a threshold.

use crate::{
    BoundaryPolicy, Gaussian2D, GaussianParams, InfluenceBoundary, PlumeError, PlumeModel,
    PlumeResult,
};

/// Threshold-detection variant of [`Gaussian2D`].
///
/// The miss probability is `0` where `concentration > threshold` and `1`
/// elsewhere; it does not depend on `dt`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianSolid {
    inner:     Gaussian2D,
    threshold: f64,
}

impl GaussianSolid {
    pub fn new(params: GaussianParams, threshold: f64) -> PlumeResult<Self> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(PlumeError::InvalidParameter {
                name:   "threshold",
                value:  threshold,
                reason: "detection threshold must be finite and non-negative",
            });
        }
        Ok(Self { inner: Gaussian2D::new(params)?, threshold })
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.inner = self.inner.with_policy(policy);
        self
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn params(&self) -> &GaussianParams {
        self.inner.params()
    }

    /// `1.0` if the concentration at `(dx, dy)` exceeds the threshold,
    /// else `0.0`.
    #[inline]
    pub fn detection_at(&self, dx: f64, dy: f64) -> f64 {
        self.hit_probability_at(dx, dy, 0.0)
    }

    /// Elementwise [`detection_at`](Self::detection_at).
    pub fn detection(&self, dx: &[f64], dy: &[f64]) -> PlumeResult<Vec<f64>> {
        self.hit_probability(dx, dy, 0.0)
    }
}

impl PlumeModel for GaussianSolid {
    fn concentration_at(&self, dx: f64, dy: f64) -> f64 {
        self.inner.concentration_at(dx, dy)
    }

    fn miss_probability_at(&self, dx: f64, dy: f64, _dt: f64) -> f64 {
        if self.inner.concentration_at(dx, dy) > self.threshold { 0.0 } else { 1.0 }
    }

    fn boundary(&self) -> InfluenceBoundary {
        self.inner.boundary()
    }

    fn support(&self) -> Option<InfluenceBoundary> {
        self.inner.support()
    }
}
