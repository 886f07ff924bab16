//! Many agents against many independently drawn environments.
//!
//! # Determinism
//!
//! Environment `i` is drawn from `SimRng::for_stream(seed, i)`, and agent
//! `j`'s trial in it uses a child stream derived from that generator after
//! the sources are placed.  Results therefore depend only on the seed and
//! the configuration, never on thread scheduling.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ps_agent::{SearchAgent, Searcher, SearcherConfig};
use ps_core::{AgentId, EnvironmentId, SimConfig, SimRng, TrialId};
use ps_env::{Environment, SourcePositions};
use ps_plume::PlumeModel;

use crate::{NoopObserver, SimError, SimResult, SourceRecord, Trial, TrialRecord};

/// Scalar configuration of a sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    pub sim:                 SimConfig,
    /// Number of independently drawn environments.
    pub n_environments:      usize,
    /// Sources per square metre.
    pub source_density:      f64,
    /// `None` means `max agent speed × search_time_max`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub agent_search_radius: Option<f64>,
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                               |
/// |----------------------------|---------------------------------------|
/// | `.source_positions(p)`     | `SourcePositions::Random`             |
/// | `.agent_search_radius(r)`  | `config.agent_search_radius`, else    |
/// |                            | max agent speed × `search_time_max`   |
///
/// # Example
///
/// ```rust,ignore
/// let agents: Vec<SearcherConfig> = thetas
///     .iter()
///     .map(|&theta| SearcherConfig::Linear { theta, speed: 0.5 })
///     .collect();
/// let results = SimulationBuilder::from_configs(plume, config, &agents)?.build()?.run()?;
/// println!("{:?}", results.detection_probabilities());
/// ```
pub struct SimulationBuilder<P: PlumeModel + ?Sized, A: SearchAgent + Clone> {
    plume:            Arc<P>,
    config:           SweepConfig,
    agents:           Vec<A>,
    source_positions: SourcePositions,
    search_radius:    Option<f64>,
}

impl<P: PlumeModel + ?Sized, A: SearchAgent + Clone> SimulationBuilder<P, A> {
    pub fn new(plume: Arc<P>, config: SweepConfig, agents: Vec<A>) -> Self {
        Self {
            plume,
            search_radius:    config.agent_search_radius,
            config,
            agents,
            source_positions: SourcePositions::Random,
        }
    }

    /// Use the same explicit sources in every environment instead of
    /// drawing them.
    pub fn source_positions(mut self, positions: SourcePositions) -> Self {
        self.source_positions = positions;
        self
    }

    pub fn agent_search_radius(mut self, radius: f64) -> Self {
        self.search_radius = Some(radius);
        self
    }

    pub fn build(self) -> SimResult<Simulation<P, A>> {
        self.config.sim.validate()?;

        if self.agents.is_empty() {
            return Err(SimError::Config("a sweep needs at least one agent".into()));
        }
        if u32::try_from(self.agents.len()).is_err() {
            return Err(SimError::Config(format!("too many agents: {}", self.agents.len())));
        }
        if u32::try_from(self.config.n_environments).is_err() {
            return Err(SimError::Config(format!(
                "too many environments: {}",
                self.config.n_environments
            )));
        }
        if !(self.config.source_density.is_finite() && self.config.source_density >= 0.0) {
            return Err(SimError::Config(format!(
                "source_density must be finite and non-negative, got {}",
                self.config.source_density
            )));
        }

        let agent_search_radius = match self.search_radius {
            Some(r) => r,
            None => {
                let max_speed = self.agents.iter().map(|a| a.speed()).fold(0.0, f64::max);
                max_speed * self.config.sim.search_time_max
            }
        };
        if agent_search_radius == 0.0 {
            warn!("agent search radius is zero; sources only come from the plume boundary");
        }

        Ok(Simulation {
            plume: self.plume,
            config: self.config,
            agents: self.agents,
            source_positions: self.source_positions,
            agent_search_radius,
        })
    }
}

impl<P: PlumeModel + ?Sized> SimulationBuilder<P, Searcher> {
    /// Build one [`Searcher`] per configuration.  The first invalid
    /// configuration aborts with [`SimError::Agent`].
    pub fn from_configs(
        plume:   Arc<P>,
        config:  SweepConfig,
        configs: &[SearcherConfig],
    ) -> SimResult<Self> {
        let agents = configs
            .iter()
            .map(SearcherConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(plume, config, agents))
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// A configured sweep, ready to [`run`](Self::run).  Create via
/// [`SimulationBuilder`].
pub struct Simulation<P: PlumeModel + ?Sized, A: SearchAgent + Clone> {
    plume:               Arc<P>,
    config:              SweepConfig,
    agents:              Vec<A>,
    source_positions:    SourcePositions,
    agent_search_radius: f64,
}

/// What one environment contributes to a sweep.
struct EnvironmentRun {
    sources: Vec<SourceRecord>,
    trials:  Vec<TrialRecord>,
}

impl<P: PlumeModel + ?Sized, A: SearchAgent + Clone> Simulation<P, A> {
    #[inline]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    #[inline]
    pub fn agents(&self) -> &[A] {
        &self.agents
    }

    #[inline]
    pub fn agent_search_radius(&self) -> f64 {
        self.agent_search_radius
    }

    /// Draw environment `index` exactly as [`run`](Self::run) would.
    pub fn environment(&self, index: usize) -> SimResult<Environment<P>> {
        let mut rng = SimRng::for_stream(self.config.sim.seed, index as u64);
        self.draw_environment(&mut rng)
    }

    fn draw_environment(&self, rng: &mut SimRng) -> SimResult<Environment<P>> {
        Ok(Environment::new(
            Arc::clone(&self.plume),
            self.config.source_density,
            self.agent_search_radius,
            self.source_positions.clone(),
            rng,
        )?)
    }

    fn run_environment(&self, index: usize) -> SimResult<EnvironmentRun> {
        let env_id = EnvironmentId(index as u32);
        let mut rng = SimRng::for_stream(self.config.sim.seed, index as u64);
        let env = self.draw_environment(&mut rng)?;

        let sources = env
            .sources()
            .iter()
            .map(|s| SourceRecord { environment: env_id, src_x: s.x, src_y: s.y })
            .collect();

        let n_agents = self.agents.len();
        let mut trials = Vec::with_capacity(n_agents);
        for (j, template) in self.agents.iter().enumerate() {
            let mut agent = template.clone();
            let mut trial_rng = rng.child(j as u64);
            let outcome = Trial::new(&env, &mut agent, &self.config.sim, &mut trial_rng)?
                .run(&mut NoopObserver)?;
            let trial_id = TrialId((index * n_agents + j) as u64);
            trials.push(TrialRecord::from_outcome(trial_id, env_id, AgentId(j as u32), &outcome));
        }

        debug!(
            environment = index,
            sources = env.sources().len(),
            detections = trials.iter().filter(|t| t.detected).count(),
            "environment done"
        );
        Ok(EnvironmentRun { sources, trials })
    }

    /// Run every agent once in each of `n_environments` environments.
    pub fn run(&self) -> SimResult<SweepResults>
    where
        A: Sync,
    {
        let n = self.config.n_environments;

        #[cfg(not(feature = "parallel"))]
        let runs: Vec<EnvironmentRun> =
            (0..n).map(|i| self.run_environment(i)).collect::<SimResult<_>>()?;

        #[cfg(feature = "parallel")]
        let runs: Vec<EnvironmentRun> = {
            use rayon::prelude::*;
            (0..n).into_par_iter().map(|i| self.run_environment(i)).collect::<SimResult<_>>()?
        };

        let mut results = SweepResults {
            n_environments: n,
            n_agents:       self.agents.len(),
            trials:         Vec::with_capacity(n * self.agents.len()),
            sources:        vec![],
        };
        for run in runs {
            results.sources.extend(run.sources);
            results.trials.extend(run.trials);
        }

        info!(
            environments = n,
            agents = results.n_agents,
            detections = results.trials.iter().filter(|t| t.detected).count(),
            "sweep complete"
        );
        Ok(results)
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Every row a sweep produced, in environment-major, agent-minor order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepResults {
    pub n_environments: usize,
    pub n_agents:       usize,
    pub trials:         Vec<TrialRecord>,
    pub sources:        Vec<SourceRecord>,
}

impl SweepResults {
    /// Number of environments in which each agent detected odor.
    pub fn detection_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_agents];
        for t in self.trials.iter().filter(|t| t.detected) {
            counts[t.agent.index()] += 1;
        }
        counts
    }

    /// `detection_counts / n_environments`; all zeros when there were no
    /// environments.
    pub fn detection_probabilities(&self) -> Vec<f64> {
        let n = self.n_environments;
        self.detection_counts()
            .into_iter()
            .map(|c| if n == 0 { 0.0 } else { c as f64 / n as f64 })
            .collect()
    }

    /// Mean time to detection per agent over the trials that detected, or
    /// `None` for an agent that never did.
    pub fn mean_detection_times(&self) -> Vec<Option<f64>> {
        let mut sums = vec![(0.0, 0usize); self.n_agents];
        for t in &self.trials {
            if let Some(time) = t.time_till_detection {
                let (sum, count) = &mut sums[t.agent.index()];
                *sum += time;
                *count += 1;
            }
        }
        sums.into_iter()
            .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
            .collect()
    }

    /// The trials run in environment `env`.
    pub fn trials_in(&self, env: EnvironmentId) -> impl Iterator<Item = &TrialRecord> {
        self.trials.iter().filter(move |t| t.environment == env)
    }
}
