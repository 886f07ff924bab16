//! Simulation time model.
//!
//! # Design
//!
//! Time is an integer `Step` counter.  Continuous time is derived:
//!
//!   t = step * dt
//!
//! A trial starts at step 0 (agent at the origin, nothing sampled) and the
//! first call to step advances to step 1 at time `dt`.  The step bound is
//! `floor(search_time_max / dt)`, computed exactly as written: `0.3 / 0.1`
//! evaluates to `2.999…` in binary floating point and therefore gives 2
//! steps, not 3.

use std::fmt;

use crate::error::{require_positive, PsResult};

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute step counter within one trial.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Tracks the current step of a trial and converts it to seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct StepClock {
    /// Seconds per step.
    pub dt:           f64,
    /// The step bound; the clock is exhausted once `current == max_steps`.
    pub max_steps:    u64,
    pub current:      Step,
}

impl StepClock {
    pub fn new(dt: f64, max_steps: u64) -> Self {
        Self { dt, max_steps, current: Step::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current.next();
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.0 >= self.max_steps
    }

    /// Elapsed simulated seconds at the current step.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current.0 as f64 * self.dt
    }

    #[inline]
    pub fn reset(&mut self) {
        self.current = Step::ZERO;
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} (t = {:.3} s)", self.current, self.max_steps, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Trial timing and seeding shared by every trial in an experiment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Timestep in seconds.
    pub dt:              f64,

    /// Maximum search time in seconds.  The trial stops after
    /// `floor(search_time_max / dt)` steps.
    pub search_time_max: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed:            u64,
}

impl SimConfig {
    pub fn new(dt: f64, search_time_max: f64, seed: u64) -> Self {
        Self { dt, search_time_max, seed }
    }

    /// Check that `dt` and `search_time_max` are finite and positive.
    pub fn validate(&self) -> PsResult<()> {
        require_positive("dt", self.dt)?;
        require_positive("search_time_max", self.search_time_max)?;
        Ok(())
    }

    /// `floor(search_time_max / dt)`.
    #[inline]
    pub fn max_steps(&self) -> u64 {
        (self.search_time_max / self.dt).floor() as u64
    }

    /// Construct a `StepClock` pre-configured for one trial.
    pub fn make_clock(&self) -> StepClock {
        StepClock::new(self.dt, self.max_steps())
    }
}
