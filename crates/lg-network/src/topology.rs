//! Topology queries consumed by position selection and room checks.
//!
//! Placement code never touches [`LaneNetwork`] directly; it goes through
//! [`LaneTopology`] so a host simulation with its own network model can plug
//! in by implementing this trait.

use lg_core::{Direction, GtuTypeId, LaneId, LinkId, NodeId};

use crate::{GtuOnLane, GtuTypes, LaneNetwork};

/// Read-only view of lanes, their connections and their occupancy.
pub trait LaneTopology {
    fn gtu_types(&self) -> &GtuTypes;

    /// Successors of `(lane, dir)` that `gtu_type` may enter.  Zero, one or
    /// many entries.
    fn downstream(&self, lane: LaneId, dir: Direction, gtu_type: GtuTypeId) -> Vec<(LaneId, Direction)>;

    /// GTUs on `lane`, ordered by design-line offset of the front.
    fn gtus_on(&self, lane: LaneId) -> &[GtuOnLane];

    fn speed_limit(&self, lane: LaneId, gtu_type: GtuTypeId) -> Option<f64>;

    fn accessible(&self, lane: LaneId, gtu_type: GtuTypeId) -> bool;

    fn lane_length(&self, lane: LaneId) -> f64;

    fn link_of(&self, lane: LaneId) -> LinkId;

    /// Position of `lane` within its link, 1 = right edge.
    fn lane_number(&self, lane: LaneId) -> usize;

    /// `(from, to)` nodes of `link` along its design line.
    fn link_nodes(&self, link: LinkId) -> (NodeId, NodeId);
}

impl LaneTopology for LaneNetwork {
    fn gtu_types(&self) -> &GtuTypes {
        &self.gtu_types
    }

    fn downstream(&self, lane: LaneId, dir: Direction, gtu_type: GtuTypeId) -> Vec<(LaneId, Direction)> {
        self.successors(lane, dir)
            .iter()
            .copied()
            .filter(|&(next, _)| self.accessible(next, gtu_type))
            .collect()
    }

    fn gtus_on(&self, lane: LaneId) -> &[GtuOnLane] {
        LaneNetwork::gtus_on(self, lane)
    }

    fn speed_limit(&self, lane: LaneId, gtu_type: GtuTypeId) -> Option<f64> {
        LaneNetwork::speed_limit(self, lane, gtu_type)
    }

    fn accessible(&self, lane: LaneId, gtu_type: GtuTypeId) -> bool {
        LaneNetwork::accessible(self, lane, gtu_type)
    }

    fn lane_length(&self, lane: LaneId) -> f64 {
        self.lane_length[lane.index()]
    }

    fn link_of(&self, lane: LaneId) -> LinkId {
        self.lane_link[lane.index()]
    }

    fn lane_number(&self, lane: LaneId) -> usize {
        LaneNetwork::lane_number(self, lane)
    }

    fn link_nodes(&self, link: LinkId) -> (NodeId, NodeId) {
        (self.link_from[link.index()], self.link_to[link.index()])
    }
}
