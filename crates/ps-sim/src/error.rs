use ps_agent::AgentError;
use ps_core::PsError;
use ps_env::EnvError;
use thiserror::Error;

use crate::TrialStatus;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// `step` was called on a trial that already reached a terminal state.
    #[error("trial already finished ({0:?}); call reset() to run it again")]
    TrialFinished(TrialStatus),

    #[error("environment error: {0}")]
    Environment(#[from] EnvError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Core(#[from] PsError),
}

pub type SimResult<T> = Result<T, SimError>;
