use thiserror::Error;

use lg_core::SimTime;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("cannot schedule at {at}: clock is already at {now}")]
    InPast { at: SimTime, now: SimTime },

    #[error("cannot schedule at non-finite {0}")]
    NotFinite(SimTime),
}

pub type EventResult<T> = Result<T, EventError>;
