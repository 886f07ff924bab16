//! Unit tests for ps-sim.

use std::sync::Arc;

use ps_agent::{LinearSearcher, SearchAgent, Searcher, SearcherConfig};
use ps_core::{Point2, SimConfig, SimRng, Step};
use ps_env::{Environment, SourcePositions};
use ps_plume::{Gaussian2D, GaussianParams, UniformBox};

use crate::{NoopObserver, SimError, Trial, TrialObserver, TrialOutcome, TrialStatus};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(dt: f64, search_time_max: f64) -> SimConfig {
    SimConfig::new(dt, search_time_max, 42)
}

/// Solid 0.1 × 0.1 boxes at the given sources.
fn box_env(points: &[[f64; 2]]) -> Environment<UniformBox> {
    let plume = Arc::new(UniformBox::solid(0.05, 0.05).unwrap());
    let positions = SourcePositions::from_rows(points).unwrap();
    Environment::new(plume, 0.0, 2.0, positions, &mut SimRng::new(0)).unwrap()
}

fn east(speed: f64) -> LinearSearcher {
    LinearSearcher::new(0.0, speed).unwrap()
}

#[derive(Default)]
struct Counting {
    started:    usize,
    steps:      Vec<Step>,
    detections: usize,
    ended:      Option<TrialOutcome>,
}

impl TrialObserver for Counting {
    fn on_trial_start(&mut self, start: Point2) {
        assert_eq!(start, Point2::ORIGIN);
        self.started += 1;
    }
    fn on_step(&mut self, step: Step, _position: Point2) {
        self.steps.push(step);
    }
    fn on_detection(&mut self, _step: Step, _position: Point2) {
        self.detections += 1;
    }
    fn on_trial_end(&mut self, outcome: &TrialOutcome) {
        self.ended = Some(outcome.clone());
    }
}

// ── Trial state machine ───────────────────────────────────────────────────────

#[cfg(test)]
mod trial_tests {
    use super::*;

    #[test]
    fn times_out_after_step_bound() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut trial = Trial::new(&env, &mut agent, &config(0.1, 1.0), &mut rng).unwrap();
        assert_eq!(trial.max_steps(), 10);

        let outcome = trial.run(&mut NoopObserver).unwrap();
        assert_eq!(outcome.status, TrialStatus::TimedOut);
        assert!(!outcome.detected);
        assert_eq!(outcome.detection_time, None);
        assert_eq!(outcome.detection_position, None);
        assert_eq!(outcome.steps, 10);
        assert_eq!(trial.trajectory().len(), 10);
    }

    #[test]
    fn trajectory_is_position_after_each_step() {
        let env = box_env(&[]);
        let mut agent = east(2.0);
        let mut rng = SimRng::new(1);
        let mut trial = Trial::new(&env, &mut agent, &config(0.5, 2.0), &mut rng).unwrap();
        trial.run(&mut NoopObserver).unwrap();
        let xs: Vec<f64> = trial.trajectory().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn detects_source_on_path() {
        let env = box_env(&[[0.5, 0.0]]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut trial = Trial::new(&env, &mut agent, &config(0.1, 1.0), &mut rng).unwrap();

        let outcome = trial.run(&mut NoopObserver).unwrap();
        assert_eq!(outcome.status, TrialStatus::Detected);
        assert!(outcome.detected);
        assert_eq!(outcome.steps, 5);
        assert_eq!(outcome.detection_time, Some(5.0 * 0.1));
        let pos = outcome.detection_position.unwrap();
        assert!(pos.distance(Point2::new(0.5, 0.0)) < 1e-9);
        assert_eq!(trial.trajectory().len(), 5);
        assert_eq!(*trial.trajectory().last().unwrap(), pos);
    }

    #[test]
    fn detection_on_first_step() {
        let env = box_env(&[[0.1, 0.0]]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut trial = Trial::new(&env, &mut agent, &config(0.1, 1.0), &mut rng).unwrap();
        assert_eq!(trial.step().unwrap(), TrialStatus::Detected);
        assert_eq!(trial.outcome().detection_time, Some(0.1));
    }

    #[test]
    fn stepping_finished_trial_errors() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut trial = Trial::new(&env, &mut agent, &config(0.1, 0.3), &mut rng).unwrap();
        trial.run(&mut NoopObserver).unwrap();
        assert!(matches!(trial.step(), Err(SimError::TrialFinished(TrialStatus::TimedOut))));
        // run on a finished trial is a no-op.
        assert_eq!(trial.run(&mut NoopObserver).unwrap(), trial.outcome());
    }

    #[test]
    fn step_bound_uses_floor() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        // 0.3 / 0.1 is just below 3 in binary floating point.
        let trial = Trial::new(&env, &mut agent, &config(0.1, 0.3), &mut rng).unwrap();
        assert_eq!(trial.max_steps(), 2);
    }

    #[test]
    fn zero_step_bound_is_already_timed_out() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut trial = Trial::new(&env, &mut agent, &config(0.1, 0.05), &mut rng).unwrap();
        assert_eq!(trial.status(), TrialStatus::TimedOut);
        assert_eq!(trial.run(&mut NoopObserver).unwrap().steps, 0);
        assert!(trial.step().is_err());
    }

    #[test]
    fn invalid_config_rejected() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        assert!(Trial::new(&env, &mut agent, &config(0.0, 1.0), &mut rng).is_err());
        assert!(Trial::new(&env, &mut agent, &config(0.1, f64::NAN), &mut rng).is_err());
    }

    #[test]
    fn construction_resets_agent() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        agent.advance(5.0, &mut rng);
        let trial = Trial::new(&env, &mut agent, &config(0.1, 1.0), &mut rng).unwrap();
        assert_eq!(trial.agent_position(), Point2::ORIGIN);
    }

    #[test]
    fn reset_allows_rerun() {
        let env = box_env(&[[0.3, 0.0]]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut trial = Trial::new(&env, &mut agent, &config(0.1, 1.0), &mut rng).unwrap();
        let first = trial.run(&mut NoopObserver).unwrap();
        trial.reset();
        assert_eq!(trial.status(), TrialStatus::Running);
        assert!(trial.trajectory().is_empty());
        assert_eq!(trial.agent_position(), Point2::ORIGIN);
        let second = trial.run(&mut NoopObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn same_seed_same_outcome() {
        let plume = Arc::new(Gaussian2D::new(GaussianParams::new(0.1, 0.02, 0.5, 12.0)).unwrap());
        let run = || {
            let mut rng = SimRng::new(99);
            let env = Environment::new(plume.clone(), 0.5, 5.0, SourcePositions::Random, &mut rng)
                .unwrap();
            let mut agent: Searcher = SearcherConfig::Random { speed: 0.5 }.build().unwrap();
            let mut trial = Trial::new(&env, &mut agent, &config(0.1, 10.0), &mut rng).unwrap();
            let outcome = trial.run(&mut NoopObserver).unwrap();
            (outcome, trial.trajectory().to_vec())
        };
        assert_eq!(run(), run());
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::TrajectoryRecorder;

    #[test]
    fn callbacks_follow_trial() {
        let env = box_env(&[[0.5, 0.0]]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut obs = Counting::default();
        let outcome = Trial::new(&env, &mut agent, &config(0.1, 1.0), &mut rng)
            .unwrap()
            .run(&mut obs)
            .unwrap();

        assert_eq!(obs.started, 1);
        assert_eq!(obs.steps, (1..=5).map(Step).collect::<Vec<_>>());
        assert_eq!(obs.detections, 1);
        assert_eq!(obs.ended, Some(outcome));
    }

    #[test]
    fn no_detection_callback_on_timeout() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut obs = Counting::default();
        Trial::new(&env, &mut agent, &config(0.1, 1.0), &mut rng)
            .unwrap()
            .run(&mut obs)
            .unwrap();
        assert_eq!(obs.steps.len(), 10);
        assert_eq!(obs.detections, 0);
    }

    #[test]
    fn recorder_thins_and_keeps_last() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut recorder = TrajectoryRecorder::new(4);
        let mut trial = Trial::new(&env, &mut agent, &config(0.5, 5.0), &mut rng).unwrap();
        trial.run(&mut recorder).unwrap();

        // Steps 1, 5, 9 plus the final step 10.
        let full = trial.trajectory();
        assert_eq!(recorder.positions(), &[full[0], full[4], full[8], full[9]]);
    }

    #[test]
    fn recorder_without_duplicate_last() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut recorder = TrajectoryRecorder::new(3);
        let mut trial = Trial::new(&env, &mut agent, &config(0.5, 5.0), &mut rng).unwrap();
        trial.run(&mut recorder).unwrap();

        // Step 10 already falls on the cadence.
        let full = trial.trajectory();
        assert_eq!(recorder.positions(), &[full[0], full[3], full[6], full[9]]);
    }

    #[test]
    fn recorder_zero_cadence_keeps_everything() {
        let env = box_env(&[]);
        let mut agent = east(1.0);
        let mut rng = SimRng::new(1);
        let mut recorder = TrajectoryRecorder::new(0);
        let mut trial = Trial::new(&env, &mut agent, &config(0.5, 2.0), &mut rng).unwrap();
        trial.run(&mut recorder).unwrap();
        assert_eq!(recorder.draw_every(), 1);
        assert_eq!(recorder.positions(), trial.trajectory());
    }
}

// ── Sweeps ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep_tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::{SimulationBuilder, SweepConfig};

    fn sweep_config(n_environments: usize) -> SweepConfig {
        SweepConfig {
            sim: config(0.1, 2.0),
            n_environments,
            source_density: 0.5,
            agent_search_radius: None,
        }
    }

    fn gaussian() -> Arc<Gaussian2D> {
        Arc::new(Gaussian2D::new(GaussianParams::new(0.1, 0.02, 0.5, 12.0)).unwrap())
    }

    fn linear_agents(thetas: &[f64], speed: f64) -> Vec<Searcher> {
        thetas
            .iter()
            .map(|&theta| SearcherConfig::Linear { theta, speed }.build().unwrap())
            .collect()
    }

    #[test]
    fn explicit_sources_give_exact_counts() {
        let plume = Arc::new(UniformBox::solid(0.05, 0.05).unwrap());
        let sources = SourcePositions::from_rows(&[[0.5, 0.0]][..]).unwrap();
        let sim = SimulationBuilder::new(plume, sweep_config(4), linear_agents(&[0.0, PI], 1.0))
            .source_positions(sources)
            .build()
            .unwrap();
        let results = sim.run().unwrap();

        assert_eq!(results.trials.len(), 8);
        assert_eq!(results.sources.len(), 4);
        assert_eq!(results.detection_counts(), vec![4, 0]);
        assert_eq!(results.detection_probabilities(), vec![1.0, 0.0]);
        let times = results.mean_detection_times();
        assert!((times[0].unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(times[1], None);
    }

    #[test]
    fn rows_are_environment_major() {
        let sim = SimulationBuilder::new(gaussian(), sweep_config(3), linear_agents(&[0.0, 1.0], 0.5))
            .build()
            .unwrap();
        let results = sim.run().unwrap();
        for (i, t) in results.trials.iter().enumerate() {
            assert_eq!(t.trial.0, i as u64);
            assert_eq!(t.environment.index(), i / 2);
            assert_eq!(t.agent.index(), i % 2);
            assert_eq!(t.detected, t.time_till_detection.is_some());
            assert_eq!(t.detected, t.detected_position.is_some());
        }
        assert_eq!(results.trials_in(ps_core::EnvironmentId(1)).count(), 2);
    }

    #[test]
    fn sweep_is_deterministic() {
        let build = || {
            SimulationBuilder::new(gaussian(), sweep_config(5), linear_agents(&[0.0, 0.5, -0.5], 0.5))
                .build()
                .unwrap()
        };
        assert_eq!(build().run().unwrap(), build().run().unwrap());
    }

    #[test]
    fn environment_matches_run() {
        let sim = SimulationBuilder::new(gaussian(), sweep_config(3), linear_agents(&[0.0], 0.5))
            .build()
            .unwrap();
        let results = sim.run().unwrap();
        let env = sim.environment(2).unwrap();
        let recorded: Vec<Point2> = results
            .sources
            .iter()
            .filter(|s| s.environment.index() == 2)
            .map(|s| Point2::new(s.src_x, s.src_y))
            .collect();
        assert_eq!(recorded, env.sources().as_slice());
    }

    #[test]
    fn default_search_radius_uses_fastest_agent() {
        let mut agents = linear_agents(&[0.0], 0.5);
        agents.push(SearcherConfig::Random { speed: 1.5 }.build().unwrap());
        let sim = SimulationBuilder::new(gaussian(), sweep_config(1), agents).build().unwrap();
        assert_eq!(sim.agent_search_radius(), 1.5 * 2.0);

        let sim = SimulationBuilder::new(gaussian(), sweep_config(1), linear_agents(&[0.0], 0.5))
            .agent_search_radius(7.0)
            .build()
            .unwrap();
        assert_eq!(sim.agent_search_radius(), 7.0);
    }

    #[test]
    fn builder_validation() {
        let none: Vec<Searcher> = vec![];
        assert!(SimulationBuilder::new(gaussian(), sweep_config(1), none).build().is_err());

        let mut bad = sweep_config(1);
        bad.source_density = -1.0;
        assert!(SimulationBuilder::new(gaussian(), bad, linear_agents(&[0.0], 0.5)).build().is_err());

        let mut bad = sweep_config(1);
        bad.sim.dt = 0.0;
        assert!(SimulationBuilder::new(gaussian(), bad, linear_agents(&[0.0], 0.5)).build().is_err());
    }

    #[test]
    fn builder_from_searcher_configs() {
        let configs = [
            SearcherConfig::Linear { theta: 0.0, speed: 0.5 },
            SearcherConfig::Random { speed: 1.5 },
        ];
        let sim = SimulationBuilder::from_configs(gaussian(), sweep_config(2), &configs)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(sim.agents().len(), 2);
        assert!((sim.agent_search_radius() - 1.5 * 2.0).abs() < 1e-12);

        let bad = [
            SearcherConfig::Linear { theta: 0.0, speed: 0.5 },
            SearcherConfig::Linear { theta: 0.0, speed: -1.0 },
        ];
        let Err(err) = SimulationBuilder::from_configs(gaussian(), sweep_config(2), &bad) else {
            panic!("negative speed accepted");
        };
        assert!(matches!(err, SimError::Agent(_)), "{err}");
    }

    #[test]
    fn empty_sweep() {
        let sim = SimulationBuilder::new(gaussian(), sweep_config(0), linear_agents(&[0.0], 0.5))
            .build()
            .unwrap();
        let results = sim.run().unwrap();
        assert!(results.trials.is_empty());
        assert_eq!(results.detection_probabilities(), vec![0.0]);
    }
}
