use thiserror::Error;

use lg_core::{CoreError, GeneratorId, PlatoonsId, SimTime};
use lg_demand::DemandError;
use lg_events::EventError;
use lg_network::NetworkError;
use lg_placement::PlacementError;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator configuration error: {0}")]
    Config(String),

    #[error("unknown generator {0}")]
    UnknownGenerator(GeneratorId),

    #[error("unknown platoon scheduler {0}")]
    UnknownPlatoons(PlatoonsId),

    #[error("window [{start}, {end}) is empty or not finite")]
    InvalidWindow { start: SimTime, end: SimTime },

    #[error("platoon [{start}, {end}) overlaps an earlier platoon")]
    PlatoonOverlap { start: SimTime, end: SimTime },

    #[error("platoon GTU at {time} is outside the current platoon [{start}, {end})")]
    OutsidePlatoon { time: SimTime, start: SimTime, end: SimTime },

    #[error("no platoon declared before adding a GTU")]
    NoPlatoon,

    #[error("platoon scheduler already started")]
    PlatoonsStarted,

    #[error("fixed platoon info required; call fix_info first")]
    PlatoonInfoNotFixed,

    #[error("no vehicle template for platoon category {0}")]
    UnknownCategory(lg_core::CategoryId),

    #[error("platoon parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Demand(#[from] DemandError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
