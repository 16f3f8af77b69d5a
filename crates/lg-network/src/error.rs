//! Network error type.

use thiserror::Error;

use lg_core::{GtuId, GtuTypeId, LaneId, LinkId, NodeId};

/// Errors produced by `lg-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("lane {0} not found in network")]
    LaneNotFound(LaneId),

    #[error("link {0} not found in network")]
    LinkNotFound(LinkId),

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("GTU type {0} is not registered")]
    UnknownGtuType(GtuTypeId),

    #[error("GTU type name {0:?} is already registered")]
    DuplicateGtuType(String),

    #[error("{0} is already on the network")]
    DuplicateGtu(GtuId),

    #[error("{0} is not on the network")]
    GtuNotFound(GtuId),

    #[error("offset {offset} m is outside {lane} (length {length} m)")]
    OffsetOutOfRange { lane: LaneId, offset: f64, length: f64 },

    #[error("{lane} has invalid length {length} m")]
    InvalidLaneLength { lane: LaneId, length: f64 },

    #[error("link {link} has no lane number {number}")]
    LaneNumberOutOfRange { link: LinkId, number: usize },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
