//! `Environment` — a bounded field of independent plume sources.

use std::sync::Arc;

use rand_distr::{Distribution, Poisson};
use tracing::{debug, warn};

use ps_core::error::require_non_negative;
use ps_core::{Extent, Heatmap, Point2, PsError, Resolution, SimRng};
use ps_plume::{InfluenceBoundary, PlumeModel};

use crate::{EnvResult, SourcePositions, SourceSet};

/// Relative slack on the R-tree query radius so that sources sitting exactly
/// on a support corner are never dropped by rounding.
const RADIUS_SLACK: f64 = 1e-9;

/// The region sources are scattered in: the agent's reachable square
/// `[-R, R]²` expanded so that any source whose influence boundary overlaps
/// the square lies inside.
///
/// ```text
/// x ∈ [-R - downwind, R + upwind]
/// y ∈ [-R - crosswind_pos, R + crosswind_neg]
/// ```
pub fn source_region(boundary: &InfluenceBoundary, agent_search_radius: f64) -> Extent {
    let r = agent_search_radius;
    Extent::new(
        -r - boundary.downwind,
        r + boundary.upwind,
        -r - boundary.crosswind_pos,
        r + boundary.crosswind_neg,
    )
}

/// A 2-D environment containing zero or more sources of one plume model.
///
/// Sources act as independent detection processes: the probability of
/// missing all of them is the product of the per-source miss probabilities.
///
/// The plume model is shared (`Arc`) so many environments drawn for one
/// experiment reuse the same immutable model.
#[derive(Clone, Debug)]
pub struct Environment<P: PlumeModel + ?Sized> {
    plume:               Arc<P>,
    source_density:      f64,
    agent_search_radius: f64,
    region:              Extent,
    sources:             SourceSet,
}

impl<P: PlumeModel + ?Sized> Environment<P> {
    /// Build an environment and place its sources.
    ///
    /// `source_density` is in sources per square metre; `agent_search_radius`
    /// is the furthest the agent can travel (speed × maximum search time).
    /// `rng` is only drawn from when `positions` is
    /// [`SourcePositions::Random`].
    pub fn new(
        plume:               Arc<P>,
        source_density:      f64,
        agent_search_radius: f64,
        positions:           SourcePositions,
        rng:                 &mut SimRng,
    ) -> EnvResult<Self> {
        require_non_negative("source_density", source_density)?;
        require_non_negative("agent_search_radius", agent_search_radius)?;

        let region = source_region(&plume.boundary(), agent_search_radius);
        let mut env = Self {
            plume,
            source_density,
            agent_search_radius,
            region,
            sources: SourceSet::empty(),
        };
        env.set_source_positions(positions, rng)?;
        Ok(env)
    }

    /// Replace the source set.
    ///
    /// `Random` draws a fresh Poisson count and uniform positions inside
    /// [`region`](Self::region); `Explicit` uses the given set verbatim
    /// (it may lie partly outside the region).
    pub fn set_source_positions(
        &mut self,
        positions: SourcePositions,
        rng:       &mut SimRng,
    ) -> EnvResult<()> {
        self.sources = match positions {
            SourcePositions::Random => self.draw_random_sources(rng)?,
            SourcePositions::Explicit(set) => set,
        };
        if self.sources.is_empty() {
            debug!(area = self.area(), "environment has no sources");
        }
        Ok(())
    }

    fn draw_random_sources(&self, rng: &mut SimRng) -> EnvResult<SourceSet> {
        let mean = self.area() * self.source_density;

        let count = if mean > 0.0 {
            let poisson = Poisson::new(mean)
                .map_err(|e| PsError::Config(format!("Poisson mean {mean}: {e}")))?;
            let n: f64 = poisson.sample(rng.inner());
            n as usize
        } else {
            0
        };

        if count as f64 > 100.0 * mean.max(1.0) {
            warn!(count, mean, "unusually large source count drawn");
        }

        let Extent { x_min, x_max, y_min, y_max } = self.region;
        let positions = (0..count)
            .map(|_| {
                let x = rng.uniform(x_min, x_max);
                let y = rng.uniform(y_min, y_max);
                Point2::new(x, y)
            })
            .collect();

        debug!(count, mean, area = self.area(), "drew random source positions");
        Ok(SourceSet::from_trusted(positions))
    }

    // ── Probability field ─────────────────────────────────────────────────

    /// Probability of detecting nothing at `(x, y)` over `dt`.
    pub fn miss_probability_at(&self, x: f64, y: f64, dt: f64) -> f64 {
        let miss = |s: Point2| self.plume.miss_probability_at(x - s.x, y - s.y, dt);

        match self.plume.support() {
            // Sources further than the support radius contribute exactly 1.
            Some(support) => {
                let radius = support.enclosing_radius() * (1.0 + RADIUS_SLACK);
                self.sources.within_radius(Point2::new(x, y), radius).map(miss).product()
            }
            None => self.sources.iter().map(|&s| miss(s)).product(),
        }
    }

    /// `1 - miss_probability_at`.
    #[inline]
    pub fn hit_probability_at(&self, x: f64, y: f64, dt: f64) -> f64 {
        1.0 - self.miss_probability_at(x, y, dt)
    }

    /// Elementwise [`miss_probability_at`](Self::miss_probability_at).
    pub fn miss_probability(&self, x: &[f64], y: &[f64], dt: f64) -> EnvResult<Vec<f64>> {
        check_lengths(x, y)?;
        Ok(x.iter().zip(y).map(|(&x, &y)| self.miss_probability_at(x, y, dt)).collect())
    }

    /// Elementwise [`hit_probability_at`](Self::hit_probability_at).
    pub fn hit_probability(&self, x: &[f64], y: &[f64], dt: f64) -> EnvResult<Vec<f64>> {
        check_lengths(x, y)?;
        Ok(x.iter().zip(y).map(|(&x, &y)| self.hit_probability_at(x, y, dt)).collect())
    }

    /// Bernoulli draw: `true` (a detection) with probability
    /// `hit_probability_at(x, y, dt)`.
    ///
    /// Single-point only.
    #[inline]
    pub fn sample(&self, x: f64, y: f64, dt: f64, rng: &mut SimRng) -> bool {
        rng.gen_bool(self.hit_probability_at(x, y, dt))
    }

    /// Hit probabilities over [`region`](Self::region) with `dt = 1`.
    pub fn heatmap(&self, resolution: Resolution) -> EnvResult<Heatmap> {
        Ok(Heatmap::sample(self.region, resolution, |x, y| self.hit_probability_at(x, y, 1.0))?)
    }

    /// The source closest to `(x, y)`, if any.
    pub fn nearest_source(&self, x: f64, y: f64) -> Option<Point2> {
        self.sources.nearest(Point2::new(x, y)).map(|(_, p)| p)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn plume(&self) -> &Arc<P> {
        &self.plume
    }

    #[inline]
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    #[inline]
    pub fn region(&self) -> Extent {
        self.region
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.region.area()
    }

    #[inline]
    pub fn source_density(&self) -> f64 {
        self.source_density
    }

    #[inline]
    pub fn agent_search_radius(&self) -> f64 {
        self.agent_search_radius
    }
}

fn check_lengths(x: &[f64], y: &[f64]) -> EnvResult<()> {
    if x.len() != y.len() {
        return Err(PsError::LengthMismatch { what: "y", expected: x.len(), got: y.len() }.into());
    }
    Ok(())
}
