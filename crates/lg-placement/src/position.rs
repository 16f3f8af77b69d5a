//! Generation positions and the bias-weighted position draw.
//!
//! # Data layout
//!
//! A generator's positions live in one flat table, sorted by link and then
//! by lane number.  A second table holds one row per link with the index
//! range of its positions and an optional fixed weight:
//!
//! ```text
//! links[j] = { link, start, end, weight }  → positions[start .. end]
//! ```
//!
//! Position indices are stable for the generator's lifetime; backlog counts
//! and the disabled-lane mask are passed in as slices indexed by them.

use log::trace;

use lg_core::{Direction, GtuTypeId, LaneId, LinkId, NodeId, RandomSource};
use lg_network::{LaneTopology, Route};

use crate::{LaneBiases, PlacementError, PlacementResult};

// ── LanePosition ──────────────────────────────────────────────────────────────

/// A point on one lane: design-line offset and travel direction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanePosition {
    pub lane:   LaneId,
    pub offset: f64,
    pub dir:    Direction,
}

impl LanePosition {
    pub fn new(lane: LaneId, offset: f64, dir: Direction) -> Self {
        Self { lane, offset, dir }
    }
}

// ── GenerationPosition ────────────────────────────────────────────────────────

/// One coherent insertion point.  Usually a single lane position; more than
/// one when the GTU straddles a boundary, e.g. where a link starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationPosition {
    /// First entry is the reference lane.
    pub lanes:       Vec<LanePosition>,
    /// Lane number of the reference lane, 1 = right edge.
    pub lane_number: usize,
    pub link:        LinkId,
}

impl GenerationPosition {
    /// Single-lane position with link and lane number taken from `topology`.
    pub fn on_lane(lane: LaneId, offset: f64, dir: Direction, topology: &dyn LaneTopology) -> Self {
        Self {
            lanes:       vec![LanePosition::new(lane, offset, dir)],
            lane_number: topology.lane_number(lane),
            link:        topology.link_of(lane),
        }
    }

    pub fn primary(&self) -> LanePosition {
        self.lanes[0]
    }

    pub fn is_single_lane(&self) -> bool {
        self.lanes.len() == 1
    }

    pub fn touches(&self, lane: LaneId) -> bool {
        self.lanes.iter().any(|p| p.lane == lane)
    }

    /// `true` if `gtu_type` may use every lane of this position.
    pub fn accessible(&self, gtu_type: GtuTypeId, topology: &dyn LaneTopology) -> bool {
        self.lanes.iter().all(|p| topology.accessible(p.lane, gtu_type))
    }

    /// Lowest speed limit for `gtu_type` over the position's lanes.
    pub fn speed_limit(&self, gtu_type: GtuTypeId, topology: &dyn LaneTopology) -> Option<f64> {
        self.lanes
            .iter()
            .filter_map(|p| topology.speed_limit(p.lane, gtu_type))
            .reduce(f64::min)
    }

    /// Nodes entered from and left towards, in travel direction.
    pub fn travel_nodes(&self, topology: &dyn LaneTopology) -> (NodeId, NodeId) {
        let (from, to) = topology.link_nodes(self.link);
        if self.primary().dir.is_plus() { (from, to) } else { (to, from) }
    }
}

// ── DrawRequest ───────────────────────────────────────────────────────────────

/// Dynamic inputs of one position draw.
pub struct DrawRequest<'a> {
    pub gtu_type:      GtuTypeId,
    pub desired_speed: f64,
    pub route:         Option<&'a Route>,
    /// Queued descriptors per position index.  Empty = no backlog.
    pub backlog:       &'a [usize],
    /// Positions excluded from the draw.  Empty = none.
    pub blocked:       &'a [bool],
}

impl DrawRequest<'_> {
    fn backlog_of(&self, i: usize) -> usize {
        self.backlog.get(i).copied().unwrap_or(0)
    }

    fn is_blocked(&self, i: usize) -> bool {
        self.blocked.get(i).copied().unwrap_or(false)
    }
}

// ── NetworkPosition ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct LinkRow {
    link:   LinkId,
    start:  usize,
    end:    usize,
    weight: Option<f64>,
}

/// All generation positions of one generator, grouped by link.
#[derive(Clone, Debug)]
pub struct NetworkPosition {
    positions: Vec<GenerationPosition>,
    links:     Vec<LinkRow>,
}

impl NetworkPosition {
    /// Group `positions` by link.  Order inside a link follows lane number.
    pub fn new(mut positions: Vec<GenerationPosition>) -> PlacementResult<Self> {
        if positions.is_empty() {
            return Err(PlacementError::NoPositions);
        }
        positions.sort_by_key(|p| (p.link, p.lane_number));

        let mut links: Vec<LinkRow> = Vec::new();
        for (i, p) in positions.iter().enumerate() {
            match links.last_mut() {
                Some(row) if row.link == p.link => row.end = i + 1,
                _ => links.push(LinkRow { link: p.link, start: i, end: i + 1, weight: None }),
            }
        }
        Ok(Self { positions, links })
    }

    /// Single-lane positions at `offset` on every given lane, travelled `dir`.
    pub fn on_lanes(
        lanes:    &[LaneId],
        offset:   f64,
        dir:      Direction,
        topology: &dyn LaneTopology,
    ) -> PlacementResult<Self> {
        let positions = lanes
            .iter()
            .map(|&lane| GenerationPosition::on_lane(lane, offset, dir, topology))
            .collect();
        Self::new(positions)
    }

    /// Replace the default link weight (accessible lane count) of `link`.
    pub fn with_link_weight(mut self, link: LinkId, weight: f64) -> PlacementResult<Self> {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(PlacementError::InvalidLinkWeight(weight));
        }
        let row = self
            .links
            .iter_mut()
            .find(|r| r.link == link)
            .ok_or(PlacementError::LinkNotInPositions(link))?;
        row.weight = Some(weight);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[GenerationPosition] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<&GenerationPosition> {
        self.positions.get(index)
    }

    /// Links in table order.
    pub fn links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.links.iter().map(|r| r.link)
    }

    /// All lanes touched by any position.
    pub fn lanes(&self) -> Vec<LaneId> {
        let mut lanes: Vec<LaneId> = self
            .positions
            .iter()
            .flat_map(|p| p.lanes.iter().map(|l| l.lane))
            .collect();
        lanes.sort_unstable();
        lanes.dedup();
        lanes
    }

    /// Minimum speed limit for `gtu_type` over its accessible positions.
    ///
    /// Fails if none of them defines a limit for the type.
    pub fn min_speed_limit(&self, gtu_type: GtuTypeId, topology: &dyn LaneTopology) -> PlacementResult<f64> {
        self.positions
            .iter()
            .filter(|p| p.accessible(gtu_type, topology))
            .filter_map(|p| p.speed_limit(gtu_type, topology))
            .reduce(f64::min)
            .ok_or(PlacementError::NoSpeedLimit(gtu_type))
    }

    /// Lane weights inside link row `j` as `(position index, weight)`.
    ///
    /// Blocked and inaccessible positions are left out; the rest are ranked
    /// from the right edge to give lane number `k` of `N`.
    pub fn lane_weights(
        &self,
        j:        usize,
        request:  &DrawRequest<'_>,
        biases:   &LaneBiases,
        topology: &dyn LaneTopology,
    ) -> Vec<(usize, f64)> {
        let row = &self.links[j];
        let candidates: Vec<usize> = (row.start..row.end)
            .filter(|&i| !request.is_blocked(i))
            .filter(|&i| self.positions[i].accessible(request.gtu_type, topology))
            .collect();
        let n = candidates.len();
        let bias = biases.resolve(request.gtu_type, topology.gtu_types());
        candidates
            .into_iter()
            .enumerate()
            .map(|(rank, i)| {
                let w = bias.weight(rank + 1, n, request.desired_speed, request.backlog_of(i));
                (i, w)
            })
            .collect()
    }

    /// Weight of link row `j` (0 if off-route or without candidates).
    fn link_weight(&self, j: usize, request: &DrawRequest<'_>, topology: &dyn LaneTopology) -> f64 {
        let row = &self.links[j];
        let available = (row.start..row.end)
            .filter(|&i| !request.is_blocked(i))
            .filter(|&i| self.positions[i].accessible(request.gtu_type, topology))
            .count();
        if available == 0 {
            return 0.0;
        }
        if let Some(route) = request.route {
            let (entry, exit) = self.positions[row.start].travel_nodes(topology);
            if !route.follows_hop(entry, exit) {
                return 0.0;
            }
        }
        row.weight.unwrap_or(available as f64)
    }

    /// Whether [`draw`][Self::draw] can succeed for `request`: some link has
    /// positive weight and a lane inside it does too.  Takes no uniforms.
    pub fn has_candidate(&self, request: &DrawRequest<'_>, biases: &LaneBiases, topology: &dyn LaneTopology) -> bool {
        (0..self.links.len()).any(|j| {
            self.link_weight(j, request, topology) > 0.0
                && self.lane_weights(j, request, biases, topology).iter().any(|&(_, w)| w > 0.0)
        })
    }

    /// Draw a position index: first a link, then a lane within it.
    ///
    /// Takes exactly two uniforms from `rng`.  Fails if every candidate ends
    /// up with zero weight.
    pub fn draw(
        &self,
        request:  &DrawRequest<'_>,
        biases:   &LaneBiases,
        rng:      &mut dyn RandomSource,
        topology: &dyn LaneTopology,
    ) -> PlacementResult<usize> {
        for (what, got) in [("backlog", request.backlog.len()), ("blocked", request.blocked.len())] {
            if got != 0 && got != self.positions.len() {
                return Err(PlacementError::SnapshotSize { what, expected: self.positions.len(), got });
            }
        }

        let link_weights: Vec<f64> = (0..self.links.len())
            .map(|j| self.link_weight(j, request, topology))
            .collect();
        let u_link = rng.next_uniform();
        let j = weighted_pick(&link_weights, u_link).ok_or(PlacementError::NoCandidate(request.gtu_type))?;

        let lanes = self.lane_weights(j, request, biases, topology);
        let weights: Vec<f64> = lanes.iter().map(|&(_, w)| w).collect();
        let u_lane = rng.next_uniform();
        let k = weighted_pick(&weights, u_lane).ok_or(PlacementError::NoCandidate(request.gtu_type))?;

        let index = lanes[k].0;
        trace!(
            "drew position {index} on {} for {} (weights {weights:?})",
            self.links[j].link, request.gtu_type
        );
        Ok(index)
    }
}

/// First entry with positive weight whose cumulative weight reaches
/// `u · total`.  `None` if the total is not positive.
pub(crate) fn weighted_pick(weights: &[f64], u: f64) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if !(total > 0.0) {
        return None;
    }
    let target = u * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(i);
        if cumulative >= target {
            return Some(i);
        }
    }
    last_positive
}
