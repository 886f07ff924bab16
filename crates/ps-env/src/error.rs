use ps_core::PsError;
use ps_plume::PlumeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    /// Source positions that are not an N × 2 table of finite numbers.
    #[error("source positions must be an N x 2 table of numbers: {0}")]
    TypeConfiguration(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Plume(#[from] PlumeError),

    #[error(transparent)]
    Core(#[from] PsError),
}

pub type EnvResult<T> = Result<T, EnvError>;
