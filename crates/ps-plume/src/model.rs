//! The `PlumeModel` trait — the seam between plume physics and environments.

use ps_core::{Heatmap, PsError, Resolution};

use crate::{InfluenceBoundary, PlumeResult};

/// Convert a concentration and an exposure interval into a miss probability.
///
/// `exp(-c·dt)`, with the two non-finite cases spelled out:
///
/// - `dt <= 0` (no exposure) misses with certainty, even at the source;
/// - `c = +∞` (exactly at the source) hits with certainty for any `dt > 0`.
#[inline]
pub fn miss_from_concentration(concentration: f64, dt: f64) -> f64 {
    if !(dt > 0.0) {
        1.0
    } else if concentration.is_infinite() {
        0.0
    } else {
        (-concentration * dt).exp()
    }
}

/// Single-source plume model.
///
/// Implementors provide the per-element kernels; the slice methods are
/// derived from them and must not be overridden with separate logic.
///
/// Models are immutable once constructed and shared between environments
/// (and threads) behind an `Arc`, hence `Send + Sync`.
pub trait PlumeModel: Send + Sync {
    /// Concentration at displacement `(dx, dy)` from the source, in `[0, ∞]`.
    fn concentration_at(&self, dx: f64, dy: f64) -> f64;

    /// Probability of not detecting odor over an interval `dt`.
    fn miss_probability_at(&self, dx: f64, dy: f64, dt: f64) -> f64 {
        miss_from_concentration(self.concentration_at(dx, dy), dt)
    }

    /// `1 - miss_probability_at`.
    #[inline]
    fn hit_probability_at(&self, dx: f64, dy: f64, dt: f64) -> f64 {
        1.0 - self.miss_probability_at(dx, dy, dt)
    }

    /// The analytically derived region of influence.
    fn boundary(&self) -> InfluenceBoundary;

    /// `Some(boundary)` when the miss probability is exactly 1 everywhere
    /// outside `boundary`, so callers may skip far-away sources without
    /// changing results.  `None` when the model has unbounded support.
    fn support(&self) -> Option<InfluenceBoundary> {
        None
    }

    // ── Slice forms ───────────────────────────────────────────────────────

    /// Elementwise [`concentration_at`](Self::concentration_at).
    fn concentration(&self, dx: &[f64], dy: &[f64]) -> PlumeResult<Vec<f64>> {
        check_lengths(dx, dy)?;
        Ok(dx.iter().zip(dy).map(|(&x, &y)| self.concentration_at(x, y)).collect())
    }

    /// Elementwise [`miss_probability_at`](Self::miss_probability_at).
    fn miss_probability(&self, dx: &[f64], dy: &[f64], dt: f64) -> PlumeResult<Vec<f64>> {
        check_lengths(dx, dy)?;
        Ok(dx.iter().zip(dy).map(|(&x, &y)| self.miss_probability_at(x, y, dt)).collect())
    }

    /// Elementwise [`hit_probability_at`](Self::hit_probability_at).
    fn hit_probability(&self, dx: &[f64], dy: &[f64], dt: f64) -> PlumeResult<Vec<f64>> {
        check_lengths(dx, dy)?;
        Ok(dx.iter().zip(dy).map(|(&x, &y)| self.hit_probability_at(x, y, dt)).collect())
    }

    /// Concentration sampled over the model's own boundary rectangle.
    fn heatmap(&self, resolution: Resolution) -> PlumeResult<Heatmap> {
        let region = self.boundary().extent();
        Ok(Heatmap::sample(region, resolution, |dx, dy| self.concentration_at(dx, dy))?)
    }
}

fn check_lengths(dx: &[f64], dy: &[f64]) -> PlumeResult<()> {
    if dx.len() != dy.len() {
        return Err(PsError::LengthMismatch {
            what:     "dy",
            expected: dx.len(),
            got:      dy.len(),
        }
        .into());
    }
    Ok(())
}
