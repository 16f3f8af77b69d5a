//! Room checks: may a descriptor be placed at a position now, and how fast.
//!
//! A leader at net distance `s` keeps a new vehicle at speed `v` safe when
//!
//! ```text
//! s > MIN_GAP + v · h(v) · f
//! ```
//!
//! with `h` the descriptor's desired headway (default 1 s) and `f` a
//! situation-dependent headway factor (1 unless a [`HeadwayFactor`] says
//! otherwise).  Failing this is not an error: the checker answers
//! [`Placement::NotNow`] and the generator retries later.

use lg_core::{SimDuration, GtuTypeId};
use lg_demand::VehicleDescriptor;
use lg_network::LaneTopology;

use crate::{GenerationPosition, LanePosition, Leader};

/// Gap kept to a standing leader, metres.
pub const MIN_GAP: f64 = 2.0;

/// Headway used when the behaviour has no opinion.
pub const DEFAULT_HEADWAY: SimDuration = SimDuration(1.0);

/// Slack left in front of an advanced vehicle beyond its required gap.
const ADVANCE_MARGIN: f64 = 0.1;

// ── Placement ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Placement {
    Admit { speed: f64, position: GenerationPosition },
    NotNow,
}

impl Placement {
    pub fn is_admit(&self) -> bool {
        matches!(self, Placement::Admit { .. })
    }

    pub fn speed(&self) -> Option<f64> {
        match self {
            Placement::Admit { speed, .. } => Some(*speed),
            Placement::NotNow => None,
        }
    }
}

/// Required net gap for `descriptor` at `speed`, before any factor.
pub fn required_gap(descriptor: &VehicleDescriptor, speed: f64) -> f64 {
    MIN_GAP + speed * headway(descriptor, speed).secs()
}

fn headway(descriptor: &VehicleDescriptor, speed: f64) -> SimDuration {
    descriptor
        .behavior
        .desired_headway(descriptor.gtu_type, speed)
        .unwrap_or(DEFAULT_HEADWAY)
}

// ── RoomChecker ───────────────────────────────────────────────────────────────

/// Inputs of one room check.
pub struct RoomRequest<'a> {
    pub descriptor:    &'a VehicleDescriptor,
    pub desired_speed: f64,
    /// Leaders sorted by distance, nearest first.
    pub leaders:       &'a [Leader],
    /// Time since the descriptor's nominal arrival.
    pub since_arrival: SimDuration,
    pub position:      &'a GenerationPosition,
}

pub trait RoomChecker {
    fn can_place(&self, request: &RoomRequest<'_>, topology: &dyn LaneTopology) -> Placement;
}

// ── One-shot ──────────────────────────────────────────────────────────────────

/// Admission speed behind the nearest `leader`, or `None` if there is no room.
pub fn one_shot_speed(leader: Option<&Leader>, desired_speed: f64, descriptor: &VehicleDescriptor) -> Option<f64> {
    let Some(leader) = leader else {
        return Some(desired_speed.min(descriptor.max_speed));
    };
    let speed = desired_speed.min(leader.speed).max(0.0);
    if leader.distance <= required_gap(descriptor, speed) {
        return None;
    }
    Some(speed.min(descriptor.max_speed))
}

/// Places at the requested position against the nearest leader only.
#[derive(Clone, Debug, Default)]
pub struct SingleLeaderRoomChecker;

impl RoomChecker for SingleLeaderRoomChecker {
    fn can_place(&self, request: &RoomRequest<'_>, _topology: &dyn LaneTopology) -> Placement {
        match one_shot_speed(request.leaders.first(), request.desired_speed, request.descriptor) {
            Some(speed) => Placement::Admit { speed, position: request.position.clone() },
            None => Placement::NotNow,
        }
    }
}

// ── Headway factors ───────────────────────────────────────────────────────────

/// Situation-dependent multiplier on the desired headway to one leader.
pub trait HeadwayFactor {
    fn factor(&self, leader: &Leader, speed: f64) -> f64;
}

/// Always 1.
#[derive(Clone, Debug, Default)]
pub struct NoAdjustment;

impl HeadwayFactor for NoAdjustment {
    fn factor(&self, _leader: &Leader, _speed: f64) -> f64 {
        1.0
    }
}

/// Shortens the headway behind leaders slower than `slow_speed`, linearly
/// down to `min_factor` behind a standing leader.
#[derive(Clone, Debug)]
pub struct CongestionHeadwayFactor {
    pub slow_speed: f64,
    pub min_factor: f64,
}

impl Default for CongestionHeadwayFactor {
    fn default() -> Self {
        Self { slow_speed: 15.0, min_factor: 0.5 }
    }
}

impl HeadwayFactor for CongestionHeadwayFactor {
    fn factor(&self, leader: &Leader, _speed: f64) -> f64 {
        if leader.speed >= self.slow_speed || self.slow_speed <= 0.0 {
            return 1.0;
        }
        let frac = (leader.speed / self.slow_speed).clamp(0.0, 1.0);
        self.min_factor + (1.0 - self.min_factor) * frac
    }
}

// ── Car-following ─────────────────────────────────────────────────────────────

/// Checks every leader and moves a late vehicle downstream when room allows.
///
/// The admission speed is the desired speed capped by the slowest leader and
/// the vehicle maximum.  Every leader must be beyond its required gap at
/// that speed.  The vehicle may then be advanced by the least slack over all
/// leaders, but no further than it could have driven since its nominal
/// arrival.  Advances are walked downstream on single-lane positions only; a
/// branch or dead end on the way leaves the position unmoved.
#[derive(Clone, Debug, Default)]
pub struct CarFollowingRoomChecker<F: HeadwayFactor = NoAdjustment> {
    pub factor: F,
}

impl<F: HeadwayFactor> CarFollowingRoomChecker<F> {
    pub fn new(factor: F) -> Self {
        Self { factor }
    }
}

impl<F: HeadwayFactor> RoomChecker for CarFollowingRoomChecker<F> {
    fn can_place(&self, request: &RoomRequest<'_>, topology: &dyn LaneTopology) -> Placement {
        let descriptor = request.descriptor;
        let max_speed = descriptor.max_speed;
        if request.leaders.is_empty() {
            return Placement::Admit {
                speed:    request.desired_speed.min(max_speed),
                position: request.position.clone(),
            };
        }

        let slowest = request
            .leaders
            .iter()
            .map(|l| l.speed)
            .fold(f64::INFINITY, f64::min);
        let speed = request.desired_speed.min(slowest).min(max_speed).max(0.0);
        let base = headway(descriptor, speed).secs();

        let mut slack = f64::INFINITY;
        for leader in request.leaders {
            let required = MIN_GAP + speed * base * self.factor.factor(leader, speed);
            if leader.distance <= required {
                return Placement::NotNow;
            }
            slack = slack.min(leader.distance - required);
        }

        let travelled = request.since_arrival.secs().max(0.0) * speed;
        let advance = (slack - ADVANCE_MARGIN).min(travelled).max(0.0);
        let position = if advance > 0.0 && request.position.is_single_lane() {
            advance_along(request.position, advance, descriptor.gtu_type, topology)
                .unwrap_or_else(|| request.position.clone())
        } else {
            request.position.clone()
        };
        Placement::Admit { speed, position }
    }
}

/// Move a single-lane position `distance` metres downstream.  `None` on a
/// branch or dead end before the distance is used up.
fn advance_along(
    position: &GenerationPosition,
    distance: f64,
    gtu_type: GtuTypeId,
    topology: &dyn LaneTopology,
) -> Option<GenerationPosition> {
    let start = position.primary();
    let mut lane = start.lane;
    let mut dir = start.dir;
    let mut s = dir.travelled(start.offset, topology.lane_length(lane)) + distance;
    loop {
        let length = topology.lane_length(lane);
        if s <= length {
            return Some(GenerationPosition {
                lanes:       vec![LanePosition::new(lane, dir.offset_at(s, length), dir)],
                lane_number: topology.lane_number(lane),
                link:        topology.link_of(lane),
            });
        }
        s -= length;
        match topology.downstream(lane, dir, gtu_type).as_slice() {
            [(next, next_dir)] => {
                lane = *next;
                dir = *next_dir;
            }
            _ => return None,
        }
    }
}
