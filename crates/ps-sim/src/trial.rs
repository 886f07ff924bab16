//! A single agent searching a single environment.

use tracing::debug;

use ps_agent::SearchAgent;
use ps_core::{Point2, SimConfig, SimRng, Step, StepClock};
use ps_env::Environment;
use ps_plume::PlumeModel;

use crate::{SimError, SimResult, TrialObserver};

/// Where a trial is in its lifecycle.  `Detected` and `TimedOut` are
/// terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrialStatus {
    Running,
    Detected,
    TimedOut,
}

impl TrialStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != TrialStatus::Running
    }
}

/// Summary of a trial.
///
/// `detection_time` and `detection_position` are `None` unless odor was
/// detected, so "never detected" and "detected at t = 0" stay distinct.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialOutcome {
    pub status:             TrialStatus,
    pub detected:           bool,
    /// `step × dt` of the detecting step, in seconds.
    pub detection_time:     Option<f64>,
    pub detection_position: Option<Point2>,
    /// Steps taken.
    pub steps:              u64,
}

/// One search trial: borrows an environment and an agent, advances both one
/// step at a time, and stops at the first detection or after
/// `floor(search_time_max / dt)` steps.
///
/// ```text
///  Running ──sample hit──▶ Detected
///     │
///     └──step bound hit──▶ TimedOut
/// ```
///
/// Each step: advance the agent by `dt`, sample the environment at the new
/// position, append the position to the trajectory.
///
/// Construction and [`reset`](Self::reset) both reset the agent, so a trial
/// never continues from a previous trial's position or Lévy leg.
pub struct Trial<'a, P, A>
where
    P: PlumeModel + ?Sized,
    A: SearchAgent + ?Sized,
{
    env:                &'a Environment<P>,
    agent:              &'a mut A,
    rng:                &'a mut SimRng,
    clock:              StepClock,
    status:             TrialStatus,
    trajectory:         Vec<Point2>,
    detection_time:     Option<f64>,
    detection_position: Option<Point2>,
}

impl<'a, P, A> Trial<'a, P, A>
where
    P: PlumeModel + ?Sized,
    A: SearchAgent + ?Sized,
{
    /// Validate `config`, reset `agent`, and prepare a fresh trial.
    pub fn new(
        env:    &'a Environment<P>,
        agent:  &'a mut A,
        config: &SimConfig,
        rng:    &'a mut SimRng,
    ) -> SimResult<Self> {
        config.validate()?;
        let clock = config.make_clock();
        let mut trial = Self {
            env,
            agent,
            rng,
            status: TrialStatus::Running,
            trajectory: Vec::with_capacity(clock.max_steps.min(1 << 16) as usize),
            clock,
            detection_time: None,
            detection_position: None,
        };
        trial.reset();
        Ok(trial)
    }

    /// Clear bookkeeping and reset the agent.  Idempotent.
    pub fn reset(&mut self) {
        self.agent.reset();
        self.clock.reset();
        self.trajectory.clear();
        self.detection_time = None;
        self.detection_position = None;
        self.status = if self.clock.is_exhausted() {
            TrialStatus::TimedOut
        } else {
            TrialStatus::Running
        };
    }

    /// Take one step.
    ///
    /// # Errors
    /// [`SimError::TrialFinished`] if the trial is already terminal.
    pub fn step(&mut self) -> SimResult<TrialStatus> {
        if self.status.is_terminal() {
            return Err(SimError::TrialFinished(self.status));
        }

        self.clock.advance();
        let dt = self.clock.dt;
        self.agent.advance(dt, self.rng);
        let position = self.agent.position();

        let hit = self.env.sample(position.x, position.y, dt, self.rng);
        self.trajectory.push(position);

        if hit {
            self.status = TrialStatus::Detected;
            self.detection_time = Some(self.clock.elapsed_secs());
            self.detection_position = Some(position);
        } else if self.clock.is_exhausted() {
            self.status = TrialStatus::TimedOut;
        }
        Ok(self.status)
    }

    /// Step until a terminal state, reporting to `observer`.
    ///
    /// Calling `run` on a finished trial returns its outcome without
    /// stepping.
    pub fn run<O: TrialObserver>(&mut self, observer: &mut O) -> SimResult<TrialOutcome> {
        if self.status.is_terminal() {
            return Ok(self.outcome());
        }

        debug!(max_steps = self.clock.max_steps, dt = self.clock.dt, "trial start");
        observer.on_trial_start(self.agent.position());

        while !self.status.is_terminal() {
            let status = self.step()?;
            let (step, position) = (self.clock.current, self.agent.position());
            observer.on_step(step, position);
            if status == TrialStatus::Detected {
                observer.on_detection(step, position);
            }
        }

        let outcome = self.outcome();
        debug!(
            status = ?outcome.status,
            steps = outcome.steps,
            detection_time = ?outcome.detection_time,
            "trial end"
        );
        observer.on_trial_end(&outcome);
        Ok(outcome)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn outcome(&self) -> TrialOutcome {
        TrialOutcome {
            status:             self.status,
            detected:           self.status == TrialStatus::Detected,
            detection_time:     self.detection_time,
            detection_position: self.detection_position,
            steps:              self.clock.current.0,
        }
    }

    #[inline]
    pub fn status(&self) -> TrialStatus {
        self.status
    }

    #[inline]
    pub fn current_step(&self) -> Step {
        self.clock.current
    }

    #[inline]
    pub fn max_steps(&self) -> u64 {
        self.clock.max_steps
    }

    /// Agent position after each step taken so far (the start is not
    /// included).
    #[inline]
    pub fn trajectory(&self) -> &[Point2] {
        &self.trajectory
    }

    #[inline]
    pub fn agent_position(&self) -> Point2 {
        self.agent.position()
    }

    #[inline]
    pub fn environment(&self) -> &Environment<P> {
        self.env
    }
}
