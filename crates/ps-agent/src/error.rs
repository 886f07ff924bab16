use ps_core::PsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid agent parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name:   &'static str,
        value:  f64,
        reason: &'static str,
    },

    /// `floor(path_duration_max / dt)` is zero, so no leg length can be drawn.
    #[error("Lévy leg support is empty: path_duration_max = {path_duration_max}, dt = {dt}")]
    EmptyLegSupport { path_duration_max: f64, dt: f64 },

    #[error(transparent)]
    Core(#[from] PsError),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Finite and `>= 0`.
pub(crate) fn check_speed(speed: f64) -> AgentResult<f64> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(speed)
    } else {
        Err(AgentError::InvalidParameter {
            name:   "speed",
            value:  speed,
            reason: "speed must be finite and non-negative",
        })
    }
}
