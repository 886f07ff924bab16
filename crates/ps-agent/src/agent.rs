//! The `SearchAgent` trait — the seam between motion policies and the trial
//! loop.

use ps_core::{Point2, SimRng};

/// Bernoulli draw shared by every motion policy: `true` with probability
/// `hit_probability`.
#[inline]
pub fn detect_odor(hit_probability: f64, rng: &mut SimRng) -> bool {
    rng.gen_bool(hit_probability)
}

/// How much internal state [`SearchAgent::reset`] clears.
///
/// Position always returns to the origin.  The policies differ only for
/// agents with phase memory (the Lévy searcher's current leg).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResetPolicy {
    /// Position and all phase state.
    #[default]
    Full,
    /// Position only; an unfinished leg carries over into the next trial.
    PositionOnly,
}

/// A motion policy for a single searcher.
///
/// Agents start at the origin.  All randomness comes from the `SimRng`
/// passed to [`advance`](Self::advance); agents hold no generator of their
/// own, so a trial is reproducible from its seed alone.
///
/// # Example
///
/// ```rust,ignore
/// struct Stationary;
///
/// impl SearchAgent for Stationary {
///     fn advance(&mut self, _dt: f64, _rng: &mut SimRng) {}
///     fn reset(&mut self) {}
///     fn position(&self) -> Point2 { Point2::ORIGIN }
///     fn speed(&self) -> f64 { 0.0 }
/// }
/// ```
pub trait SearchAgent: Send {
    /// Move for one timestep of length `dt`.
    fn advance(&mut self, dt: f64, rng: &mut SimRng);

    /// Return to the origin and clear phase state.  Idempotent.
    fn reset(&mut self);

    fn position(&self) -> Point2;

    /// Ground speed in m/s; bounds how far the agent can get in a trial.
    fn speed(&self) -> f64;

    /// See [`detect_odor`].
    #[inline]
    fn detect_odor(&self, hit_probability: f64, rng: &mut SimRng) -> bool {
        detect_odor(hit_probability, rng)
    }
}

impl<A: SearchAgent + ?Sized> SearchAgent for Box<A> {
    fn advance(&mut self, dt: f64, rng: &mut SimRng) {
        (**self).advance(dt, rng)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn position(&self) -> Point2 {
        (**self).position()
    }

    fn speed(&self) -> f64 {
        (**self).speed()
    }
}
