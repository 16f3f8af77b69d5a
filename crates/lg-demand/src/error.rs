use thiserror::Error;

use lg_core::{CoreError, SimTime};

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("demand profile needs at least 2 breakpoints, got {0}")]
    ProfileTooShort(usize),

    #[error("demand profile has {times} breakpoints but {rates} rates")]
    LengthMismatch { times: usize, rates: usize },

    #[error("demand profile breakpoint {index} is not after the previous one")]
    NonIncreasingTime { index: usize },

    #[error("demand rate {rate} at breakpoint {index} is negative or not finite")]
    InvalidRate { index: usize, rate: f64 },

    #[error("{now} is before the first demand breakpoint {start}")]
    BeforeProfile { now: SimTime, start: SimTime },

    #[error("invalid distribution: {0}")]
    Distribution(String),

    #[error("characteristics generator has no vehicle templates")]
    EmptyTemplates,

    #[error("template {index} has invalid probability {probability}")]
    InvalidProbability { index: usize, probability: f64 },

    #[error("demand parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DemandResult<T> = Result<T, DemandError>;
