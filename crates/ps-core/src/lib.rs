//! `ps-core` — foundational types for the `plume_search` framework.
//!
//! This crate is a dependency of every other `ps-*` crate.  It has no `ps-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `EnvironmentId`, `TrialId`                 |
//! | [`geo`]         | `Point2`, `Extent`                                    |
//! | [`grid`]        | `Heatmap`, `Resolution`, `linspace`                   |
//! | [`time`]        | `Step`, `StepClock`, `SimConfig`                      |
//! | [`rng`]         | `SimRng` (seedable, derivable child streams)          |
//! | [`error`]       | `PsError`, `PsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PsError, PsResult};
pub use geo::{Extent, Point2};
pub use grid::{linspace, Heatmap, Resolution};
pub use ids::{AgentId, EnvironmentId, TrialId};
pub use rng::SimRng;
pub use time::{SimConfig, Step, StepClock};
