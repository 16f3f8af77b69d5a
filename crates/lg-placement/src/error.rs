use thiserror::Error;

use lg_core::{GtuTypeId, LinkId};

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("bias strength {0} must be >= 0")]
    InvalidBiasStrength(f64),

    #[error("sticky lanes {0} must be >= 1")]
    InvalidStickyLanes(f64),

    #[error("lateral preference {0} is outside [0, 1]")]
    InvalidPreference(f64),

    #[error("a generator needs at least one generation position")]
    NoPositions,

    #[error("link {0} has no generation position")]
    LinkNotInPositions(LinkId),

    #[error("link weight {0} must be finite and >= 0")]
    InvalidLinkWeight(f64),

    #[error("{what} snapshot has {got} entries for {expected} positions")]
    SnapshotSize { what: &'static str, expected: usize, got: usize },

    #[error("no generation position has positive weight for GTU type {0}")]
    NoCandidate(GtuTypeId),

    #[error("no speed limit for GTU type {0} on any generation position")]
    NoSpeedLimit(GtuTypeId),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
