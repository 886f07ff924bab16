//! Flat result rows for storage or analysis.
//!
//! Rows carry plain IDs and scalars only, so any tabular writer can consume
//! them under the `serde` feature.

use ps_core::{AgentId, EnvironmentId, Point2, TrialId};

use crate::TrialOutcome;

/// One trial's outcome, keyed by environment and agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialRecord {
    pub trial:               TrialId,
    pub environment:         EnvironmentId,
    pub agent:               AgentId,
    pub detected:            bool,
    pub time_till_detection: Option<f64>,
    pub detected_position:   Option<Point2>,
}

impl TrialRecord {
    pub fn from_outcome(
        trial:       TrialId,
        environment: EnvironmentId,
        agent:       AgentId,
        outcome:     &TrialOutcome,
    ) -> Self {
        Self {
            trial,
            environment,
            agent,
            detected:            outcome.detected,
            time_till_detection: outcome.detection_time,
            detected_position:   outcome.detection_position,
        }
    }
}

/// One source of one environment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRecord {
    pub environment: EnvironmentId,
    pub src_x:       f64,
    pub src_y:       f64,
}
