//! Configuration-driven construction of any built-in motion policy.

use ps_core::{Point2, SimRng};

use crate::{AgentResult, LevySearcher2D, LinearSearcher, RandomSearcher, ResetPolicy, SearchAgent};

/// One of the built-in searchers, dispatched without a `Box`.
#[derive(Clone, Debug, PartialEq)]
pub enum Searcher {
    Linear(LinearSearcher),
    Random(RandomSearcher),
    Levy(LevySearcher2D),
}

impl SearchAgent for Searcher {
    fn advance(&mut self, dt: f64, rng: &mut SimRng) {
        match self {
            Searcher::Linear(a) => a.advance(dt, rng),
            Searcher::Random(a) => a.advance(dt, rng),
            Searcher::Levy(a) => a.advance(dt, rng),
        }
    }

    fn reset(&mut self) {
        match self {
            Searcher::Linear(a) => a.reset(),
            Searcher::Random(a) => a.reset(),
            Searcher::Levy(a) => a.reset(),
        }
    }

    fn position(&self) -> Point2 {
        match self {
            Searcher::Linear(a) => a.position(),
            Searcher::Random(a) => a.position(),
            Searcher::Levy(a) => a.position(),
        }
    }

    fn speed(&self) -> f64 {
        match self {
            Searcher::Linear(a) => a.speed(),
            Searcher::Random(a) => a.speed(),
            Searcher::Levy(a) => a.speed(),
        }
    }
}

impl From<LinearSearcher> for Searcher {
    fn from(a: LinearSearcher) -> Self {
        Searcher::Linear(a)
    }
}

impl From<RandomSearcher> for Searcher {
    fn from(a: RandomSearcher) -> Self {
        Searcher::Random(a)
    }
}

impl From<LevySearcher2D> for Searcher {
    fn from(a: LevySearcher2D) -> Self {
        Searcher::Levy(a)
    }
}

/// Plain-data description of a searcher.
///
/// With the `serde` feature this is internally tagged by `kind`:
///
/// ```json
/// { "kind": "linear", "theta": 0.0, "speed": 0.5 }
/// { "kind": "levy", "levy_index": 1.0, "speed": 0.5, "dt": 0.1, "path_duration_max": 10.0 }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SearcherConfig {
    Linear { theta: f64, speed: f64 },
    Random { speed: f64 },
    Levy {
        levy_index:        f64,
        speed:             f64,
        dt:                f64,
        path_duration_max: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        reset_policy:      ResetPolicy,
    },
}

impl SearcherConfig {
    pub fn build(&self) -> AgentResult<Searcher> {
        Ok(match *self {
            SearcherConfig::Linear { theta, speed } => LinearSearcher::new(theta, speed)?.into(),
            SearcherConfig::Random { speed } => RandomSearcher::new(speed)?.into(),
            SearcherConfig::Levy { levy_index, speed, dt, path_duration_max, reset_policy } => {
                LevySearcher2D::new(levy_index, speed, dt, path_duration_max)?
                    .with_reset_policy(reset_policy)
                    .into()
            }
        })
    }

    /// The configured speed, without building the agent.
    pub fn speed(&self) -> f64 {
        match *self {
            SearcherConfig::Linear { speed, .. }
            | SearcherConfig::Random { speed }
            | SearcherConfig::Levy { speed, .. } => speed,
        }
    }
}
