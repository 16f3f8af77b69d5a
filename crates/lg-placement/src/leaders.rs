//! Leader search ahead of a candidate position.
//!
//! From each lane of the position the search looks for the nearest GTU
//! ahead in the same direction.  If the lane is empty ahead it continues on
//! every accessible successor, so a position just upstream of a diverge
//! reports one leader per branch.  The search stops on a branch at the first
//! GTU found or once `range` metres have been covered.

use lg_core::{Direction, GtuId, GtuTypeId, LaneId};
use lg_network::{GtuOnLane, LaneTopology};

use crate::GenerationPosition;

/// Maximum number of lane boundaries crossed on one branch.
const MAX_DEPTH: usize = 64;

/// A GTU ahead of a candidate position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Leader {
    pub gtu:      GtuId,
    /// Net distance from the candidate's front to the leader's rear, metres.
    /// Negative when the leader's rear is already behind that front.
    pub distance: f64,
    /// Leader speed in m/s.
    pub speed:    f64,
    pub length:   f64,
}

impl Leader {
    pub fn new(gtu: GtuId, distance: f64, speed: f64, length: f64) -> Self {
        Self { gtu, distance, speed, length }
    }
}

/// GTU with the smallest front position beyond `from` on `lane`, travelling `dir`.
fn nearest_ahead<'t>(gtus: &'t [GtuOnLane], dir: Direction, from: f64, lane_length: f64) -> Option<&'t GtuOnLane> {
    gtus.iter()
        .filter(|g| g.direction == dir && g.front_travelled(lane_length) > from)
        .min_by(|a, b| a.front_travelled(lane_length).total_cmp(&b.front_travelled(lane_length)))
}

#[allow(clippy::too_many_arguments)]
fn search(
    topology:  &dyn LaneTopology,
    gtu_type:  GtuTypeId,
    lane:      LaneId,
    dir:       Direction,
    from:      f64,
    covered:   f64,
    range:     f64,
    depth:     usize,
    out:       &mut Vec<Leader>,
) {
    let length = topology.lane_length(lane);
    if let Some(g) = nearest_ahead(topology.gtus_on(lane), dir, from, length) {
        let distance = covered + g.rear_travelled(length) - from;
        out.push(Leader::new(g.id, distance, g.speed, g.length));
        return;
    }
    let covered = covered + length - from;
    if covered >= range || depth >= MAX_DEPTH {
        return;
    }
    for (next, next_dir) in topology.downstream(lane, dir, gtu_type) {
        search(topology, gtu_type, next, next_dir, 0.0, covered, range, depth + 1, out);
    }
}

/// Leaders within `range` metres of `position`, nearest first, one entry per GTU.
pub fn find_leaders(
    position: &GenerationPosition,
    gtu_type: GtuTypeId,
    range:    f64,
    topology: &dyn LaneTopology,
) -> Vec<Leader> {
    let mut found = Vec::new();
    for p in &position.lanes {
        let from = p.dir.travelled(p.offset, topology.lane_length(p.lane));
        search(topology, gtu_type, p.lane, p.dir, from, 0.0, range, 0, &mut found);
    }
    found.retain(|l| l.distance < range);
    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let mut seen: Vec<GtuId> = Vec::with_capacity(found.len());
    found.retain(|l| {
        if seen.contains(&l.gtu) {
            false
        } else {
            seen.push(l.gtu);
            true
        }
    });
    found
}

/// `true` if no GTU on the position's lanes overlaps the body of a new
/// vehicle of `length` whose front is at the position.
pub fn body_clear(position: &GenerationPosition, length: f64, topology: &dyn LaneTopology) -> bool {
    position.lanes.iter().all(|p| {
        let lane_length = topology.lane_length(p.lane);
        let front = p.dir.travelled(p.offset, lane_length);
        let rear = front - length;
        topology.gtus_on(p.lane).iter().all(|g| {
            g.direction != p.dir
                || g.front_travelled(lane_length) < rear
                || g.rear_travelled(lane_length) >= front
        })
    })
}
