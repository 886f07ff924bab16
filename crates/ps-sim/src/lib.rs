//! `ps-sim` — trials and sweeps for the plume_search framework.
//!
//! # Trial loop
//!
//! ```text
//! agent.reset()
//! for step in 1..=floor(search_time_max / dt):
//!   ① Move    — agent.advance(dt)
//!   ② Sample  — environment.sample(agent.x, agent.y, dt)
//!   ③ Record  — push position onto the trajectory
//!   ④ Stop    — on a hit: Detected at time step·dt
//! otherwise: TimedOut, detection fields None
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`trial`]    | `Trial`, `TrialStatus`, `TrialOutcome`                    |
//! | [`observer`] | `TrialObserver`, `NoopObserver`, `TrajectoryRecorder`     |
//! | [`sweep`]    | `SimulationBuilder`, `Simulation`, `SweepConfig`, `SweepResults` |
//! | [`record`]   | `TrialRecord`, `SourceRecord` rows                        |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs a sweep's environments on Rayon's thread pool.     |
//! | `serde`    | Serde derives on outcomes, records, and `SweepConfig`.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use ps_agent::LinearSearcher;
//! use ps_core::{SimConfig, SimRng};
//! use ps_env::{Environment, SourcePositions};
//! use ps_plume::{Gaussian2D, GaussianParams};
//! use ps_sim::{NoopObserver, Trial};
//!
//! let plume = Arc::new(Gaussian2D::new(GaussianParams::new(0.1, 0.02, 0.5, 12.0))?);
//! let config = SimConfig::new(0.1, 100.0, 42);
//! let mut rng = SimRng::new(config.seed);
//! let env = Environment::new(plume, 0.05, 50.0, SourcePositions::Random, &mut rng)?;
//! let mut agent = LinearSearcher::new(0.0, 0.5)?;
//! let outcome = Trial::new(&env, &mut agent, &config, &mut rng)?.run(&mut NoopObserver)?;
//! ```

pub mod error;
pub mod observer;
pub mod record;
pub mod sweep;
pub mod trial;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TrajectoryRecorder, TrialObserver};
pub use record::{SourceRecord, TrialRecord};
pub use sweep::{Simulation, SimulationBuilder, SweepConfig, SweepResults};
pub use trial::{Trial, TrialOutcome, TrialStatus};
