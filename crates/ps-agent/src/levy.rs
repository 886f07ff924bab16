//! Discretised Lévy flight.
//!
//! # Phases
//!
//! ```text
//!   Sampling ──draw heading + leg length k──▶ Walking { k }
//!      ▲                                          │ one step of speed·dt
//!      └──────────── k reaches 0 ─────────────────┘
//! ```
//!
//! Every call to `advance` takes exactly one step.  A `Sampling` agent draws
//! its new leg first and then walks the first step of it in the same call.
//!
//! # Leg lengths
//!
//! `k ∈ 1..=n` with `n = floor(path_duration_max / dt)` and
//! `P(k) ∝ k^(-levy_index)`.  The pmf is normalised over that truncated
//! support once at construction; since the support never changes this is
//! the same distribution a per-draw renormalisation would give.

use ps_core::{Point2, SimRng};
use tracing::trace;

use crate::error::check_speed;
use crate::{AgentError, AgentResult, ResetPolicy, SearchAgent};

/// Where the searcher is in its current leg.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LevyPhase {
    /// The next step starts a new leg.
    Sampling,
    /// Walking along `heading` with `steps_remaining > 0` steps left,
    /// counting the next one.
    Walking { heading: f64, steps_remaining: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevySearcher2D {
    levy_index:        f64,
    speed:             f64,
    dt:                f64,
    path_duration_max: f64,
    reset_policy:      ResetPolicy,

    /// Leg-length pmf; entry `i` is `P(k = i + 1)`.
    pmf:      Vec<f64>,
    /// Running sum of `pmf`, last entry forced to exactly 1.
    cdf:      Vec<f64>,
    phase:    LevyPhase,
    position: Point2,
}

impl LevySearcher2D {
    /// `dt` here fixes the leg-length support; the step length at run time
    /// uses the `dt` passed to [`advance`](SearchAgent::advance).
    pub fn new(levy_index: f64, speed: f64, dt: f64, path_duration_max: f64) -> AgentResult<Self> {
        if !levy_index.is_finite() {
            return Err(AgentError::InvalidParameter {
                name:   "levy_index",
                value:  levy_index,
                reason: "Lévy index must be finite",
            });
        }
        let speed = check_speed(speed)?;
        for (name, value) in [("dt", dt), ("path_duration_max", path_duration_max)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AgentError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite and positive",
                });
            }
        }

        let n = (path_duration_max / dt).floor();
        if n < 1.0 || n > u32::MAX as f64 {
            return Err(AgentError::EmptyLegSupport { path_duration_max, dt });
        }
        let pmf = leg_length_pmf(levy_index, n as u32);

        let mut cdf = Vec::with_capacity(pmf.len());
        let mut acc = 0.0;
        for p in &pmf {
            acc += p;
            cdf.push(acc);
        }
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Ok(Self {
            levy_index,
            speed,
            dt,
            path_duration_max,
            reset_policy: ResetPolicy::default(),
            pmf,
            cdf,
            phase: LevyPhase::Sampling,
            position: Point2::ORIGIN,
        })
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// `P(k = i + 1)` for each index `i`; sums to 1.
    #[inline]
    pub fn leg_length_pmf(&self) -> &[f64] {
        &self.pmf
    }

    /// Largest leg length in steps.
    #[inline]
    pub fn max_leg_steps(&self) -> u32 {
        self.pmf.len() as u32
    }

    #[inline]
    pub fn phase(&self) -> LevyPhase {
        self.phase
    }

    #[inline]
    pub fn levy_index(&self) -> f64 {
        self.levy_index
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn path_duration_max(&self) -> f64 {
        self.path_duration_max
    }

    #[inline]
    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Inverse-CDF draw of a leg length in `1..=max_leg_steps()`.
    pub fn sample_leg_steps(&self, rng: &mut SimRng) -> u32 {
        let u: f64 = rng.random();
        let idx = self.cdf.partition_point(|&c| c <= u).min(self.cdf.len() - 1);
        idx as u32 + 1
    }
}

impl SearchAgent for LevySearcher2D {
    fn advance(&mut self, dt: f64, rng: &mut SimRng) {
        let (heading, steps_remaining) = match self.phase {
            LevyPhase::Walking { heading, steps_remaining } => (heading, steps_remaining),
            LevyPhase::Sampling => {
                let heading = rng.heading();
                let steps = self.sample_leg_steps(rng);
                trace!(heading, steps, "new Lévy leg");
                (heading, steps)
            }
        };

        self.position += Point2::from_polar(self.speed * dt, heading);

        self.phase = match steps_remaining.saturating_sub(1) {
            0 => LevyPhase::Sampling,
            left => LevyPhase::Walking { heading, steps_remaining: left },
        };
    }

    fn reset(&mut self) {
        self.position = Point2::ORIGIN;
        if self.reset_policy == ResetPolicy::Full {
            self.phase = LevyPhase::Sampling;
        }
    }

    fn position(&self) -> Point2 {
        self.position
    }

    fn speed(&self) -> f64 {
        self.speed
    }
}

/// Normalised `k^(-levy_index)` over `k = 1..=n`.  Empty when `n == 0`.
///
/// Weights are shifted by their maximum in log space before exponentiating,
/// so the result stays finite for any finite `levy_index`.
pub fn leg_length_pmf(levy_index: f64, n: u32) -> Vec<f64> {
    let log_weights: Vec<f64> = (1..=n).map(|k| -levy_index * (k as f64).ln()).collect();
    let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = log_weights.into_iter().map(|lw| (lw - max).exp()).collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}
