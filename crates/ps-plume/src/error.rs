use ps_core::PsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlumeError {
    #[error("invalid plume parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name:   &'static str,
        value:  f64,
        reason: &'static str,
    },

    #[error(transparent)]
    Core(#[from] PsError),
}

pub type PlumeResult<T> = Result<T, PlumeError>;
