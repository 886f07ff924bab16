//! Trial observer trait for visualization and data collection.

use ps_core::{Point2, Step};

use crate::TrialOutcome;

/// Callbacks invoked by [`Trial::run`][crate::Trial::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — detection printer
///
/// ```rust,ignore
/// struct PrintDetections;
///
/// impl TrialObserver for PrintDetections {
///     fn on_detection(&mut self, step: Step, position: Point2) {
///         println!("odor at {position} on {step}");
///     }
/// }
/// ```
pub trait TrialObserver {
    /// Called once before the first step, with the agent at its start.
    fn on_trial_start(&mut self, _start: Point2) {}

    /// Called after every step, detection or not.
    fn on_step(&mut self, _step: Step, _position: Point2) {}

    /// Called on the step that detects odor, after `on_step`.
    fn on_detection(&mut self, _step: Step, _position: Point2) {}

    /// Called once when the trial reaches a terminal state.
    fn on_trial_end(&mut self, _outcome: &TrialOutcome) {}
}

/// A [`TrialObserver`] that does nothing.
pub struct NoopObserver;

impl TrialObserver for NoopObserver {}

/// Keeps a thinned copy of the trajectory for plotting.
///
/// Step `k` (1-based) is kept when `(k - 1) % draw_every == 0`; the final
/// position is always kept so the drawn path ends where the trial ended.
#[derive(Clone, Debug)]
pub struct TrajectoryRecorder {
    draw_every: u64,
    positions:  Vec<Point2>,
    last:       Option<(Step, Point2)>,
}

impl TrajectoryRecorder {
    /// `draw_every` of 0 is treated as 1.
    pub fn new(draw_every: u64) -> Self {
        Self { draw_every: draw_every.max(1), positions: vec![], last: None }
    }

    pub fn draw_every(&self) -> u64 {
        self.draw_every
    }

    /// The recorded positions, oldest first.
    pub fn positions(&self) -> &[Point2] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<Point2> {
        self.positions
    }
}

impl Default for TrajectoryRecorder {
    /// Every tenth step.
    fn default() -> Self {
        Self::new(10)
    }
}

impl TrialObserver for TrajectoryRecorder {
    fn on_trial_start(&mut self, _start: Point2) {
        self.positions.clear();
        self.last = None;
    }

    fn on_step(&mut self, step: Step, position: Point2) {
        if step.0 >= 1 && (step.0 - 1) % self.draw_every == 0 {
            self.positions.push(position);
            self.last = None;
        } else {
            self.last = Some((step, position));
        }
    }

    fn on_trial_end(&mut self, _outcome: &TrialOutcome) {
        if let Some((_, position)) = self.last.take() {
            self.positions.push(position);
        }
    }
}
