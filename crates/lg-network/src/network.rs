//! Lane network representation and builder.
//!
//! # Data layout
//!
//! Everything is stored in flat tables indexed by typed ids; no lane owns its
//! link and no link owns its lanes.
//!
//! ```text
//! link l  → lanes  link_lane_start[l] .. link_lane_start[l+1]
//! lane k  → link   lane_link[k]
//! (k, d)  → succ   succ[ succ_start[2k+d] .. succ_start[2k+d+1] ]
//! ```
//!
//! Lanes of a link are numbered from the right edge of the roadway: the
//! first lane of a link's range is lane number 1.  The successor table is in
//! Compressed Sparse Row form keyed by `(lane, direction)`, so a lane that
//! may be driven both ways has separate successor lists per direction.
//!
//! # Occupancy
//!
//! The network also records which GTUs are currently on which lane.  Per
//! lane, GTUs are kept sorted by the design-line offset of their front.  It
//! is a snapshot store: moving GTUs is the job of the surrounding
//! simulation, which reports new states through [`LaneNetwork::update_gtu`].

use lg_core::{Direction, GtuId, GtuTypeId, LaneId, LinkId, NodeId};

use crate::{GtuTypes, NetworkError, NetworkResult};

#[cfg(feature = "fx-hash")]
type GtuIndex = rustc_hash::FxHashMap<GtuId, LaneId>;
#[cfg(not(feature = "fx-hash"))]
type GtuIndex = std::collections::HashMap<GtuId, LaneId>;

// ── GtuOnLane ─────────────────────────────────────────────────────────────────

/// State of one GTU as seen by lane occupancy queries.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GtuOnLane {
    pub id:        GtuId,
    pub gtu_type:  GtuTypeId,
    /// Design-line offset of the front, in metres.
    pub front:     f64,
    /// Body length in metres.
    pub length:    f64,
    /// Current speed in m/s.
    pub speed:     f64,
    pub direction: Direction,
}

impl GtuOnLane {
    /// Distance of the front from the lane entry, in the GTU's own direction.
    #[inline]
    pub fn front_travelled(&self, lane_length: f64) -> f64 {
        self.direction.travelled(self.front, lane_length)
    }

    /// Distance of the rear from the lane entry (may be negative when the
    /// body still hangs over the upstream lane).
    #[inline]
    pub fn rear_travelled(&self, lane_length: f64) -> f64 {
        self.front_travelled(lane_length) - self.length
    }
}

// ── LaneNetwork ───────────────────────────────────────────────────────────────

/// Lane-level road network in flat tables, with a GTU occupancy snapshot.
///
/// Fields are `pub` for direct indexed access.  Construct with
/// [`LaneNetworkBuilder`].
pub struct LaneNetwork {
    // ── Nodes ─────────────────────────────────────────────────────────────
    pub node_names: Vec<String>,

    // ── Links ─────────────────────────────────────────────────────────────
    pub link_from:       Vec<NodeId>,
    pub link_to:         Vec<NodeId>,
    /// Lane range row pointer.  Length = `link_count + 1`.
    pub link_lane_start: Vec<u32>,

    // ── Lanes ─────────────────────────────────────────────────────────────
    pub lane_link:        Vec<LinkId>,
    pub lane_length:      Vec<f64>,
    /// Speed limit applying to every type without a specific entry.
    pub lane_speed_limit: Vec<Option<f64>>,
    /// Type-specific speed limits, resolved through the type hierarchy.
    pub lane_type_limits: Vec<Vec<(GtuTypeId, f64)>>,
    /// Types allowed on the lane (and their descendants).  Empty = all.
    pub lane_allowed:     Vec<Vec<GtuTypeId>>,

    // ── Successors (CSR keyed by 2·lane + direction) ──────────────────────
    pub succ_start: Vec<u32>,
    pub succ:       Vec<(LaneId, Direction)>,

    pub gtu_types: GtuTypes,

    // ── Occupancy ─────────────────────────────────────────────────────────
    occupants: Vec<Vec<GtuOnLane>>,
    gtu_index: GtuIndex,
    next_gtu:  u32,
}

#[inline]
fn succ_key(lane: LaneId, dir: Direction) -> usize {
    lane.index() * 2 + if dir.is_plus() { 0 } else { 1 }
}

impl LaneNetwork {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_names.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_from.len()
    }

    pub fn lane_count(&self) -> usize {
        self.lane_link.len()
    }

    /// Number of GTUs currently on the network.
    pub fn gtu_count(&self) -> usize {
        self.gtu_index.len()
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Lanes of `link`, right edge first.
    #[inline]
    pub fn link_lanes(&self, link: LinkId) -> impl Iterator<Item = LaneId> + '_ {
        let start = self.link_lane_start[link.index()];
        let end   = self.link_lane_start[link.index() + 1];
        (start..end).map(LaneId)
    }

    /// Lane `number` (1 = right edge) of `link`.
    pub fn lane(&self, link: LinkId, number: usize) -> NetworkResult<LaneId> {
        if link.index() >= self.link_count() {
            return Err(NetworkError::LinkNotFound(link));
        }
        let start = self.link_lane_start[link.index()] as usize;
        let end   = self.link_lane_start[link.index() + 1] as usize;
        if number == 0 || start + number > end {
            return Err(NetworkError::LaneNumberOutOfRange { link, number });
        }
        Ok(LaneId((start + number - 1) as u32))
    }

    /// Position of `lane` within its link, 1 = right edge.
    pub fn lane_number(&self, lane: LaneId) -> usize {
        let link = self.lane_link[lane.index()];
        lane.index() - self.link_lane_start[link.index()] as usize + 1
    }

    /// Every successor of `(lane, dir)`, regardless of access rules.
    #[inline]
    pub fn successors(&self, lane: LaneId, dir: Direction) -> &[(LaneId, Direction)] {
        let k = succ_key(lane, dir);
        let start = self.succ_start[k] as usize;
        let end   = self.succ_start[k + 1] as usize;
        &self.succ[start..end]
    }

    // ── Access and limits ─────────────────────────────────────────────────

    pub fn accessible(&self, lane: LaneId, gtu_type: GtuTypeId) -> bool {
        let allowed = &self.lane_allowed[lane.index()];
        allowed.is_empty() || allowed.iter().any(|&a| self.gtu_types.is_of(gtu_type, a))
    }

    /// Speed limit for `gtu_type` on `lane`: the most specific type entry
    /// found walking up the hierarchy, else the lane's general limit.
    pub fn speed_limit(&self, lane: LaneId, gtu_type: GtuTypeId) -> Option<f64> {
        let specific = &self.lane_type_limits[lane.index()];
        self.gtu_types
            .ancestors(gtu_type)
            .find_map(|t| specific.iter().find(|(st, _)| *st == t).map(|&(_, v)| v))
            .or(self.lane_speed_limit[lane.index()])
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// GTUs on `lane`, sorted by design-line offset of the front.
    #[inline]
    pub fn gtus_on(&self, lane: LaneId) -> &[GtuOnLane] {
        &self.occupants[lane.index()]
    }

    pub fn lane_of(&self, gtu: GtuId) -> Option<LaneId> {
        self.gtu_index.get(&gtu).copied()
    }

    /// Allocate a fresh, never used `GtuId`.
    pub fn next_gtu_id(&mut self) -> GtuId {
        let id = GtuId(self.next_gtu);
        self.next_gtu += 1;
        id
    }

    /// Put `gtu` on `lane`.
    pub fn insert_gtu(&mut self, lane: LaneId, gtu: GtuOnLane) -> NetworkResult<()> {
        if lane.index() >= self.lane_count() {
            return Err(NetworkError::LaneNotFound(lane));
        }
        if self.gtu_index.contains_key(&gtu.id) {
            return Err(NetworkError::DuplicateGtu(gtu.id));
        }
        let length = self.lane_length[lane.index()];
        if !(0.0..=length).contains(&gtu.front) {
            return Err(NetworkError::OffsetOutOfRange { lane, offset: gtu.front, length });
        }
        let list = &mut self.occupants[lane.index()];
        let at = list.partition_point(|g| g.front <= gtu.front);
        list.insert(at, gtu);
        self.gtu_index.insert(gtu.id, lane);
        if gtu.id.0 >= self.next_gtu {
            self.next_gtu = gtu.id.0 + 1;
        }
        Ok(())
    }

    /// Take `gtu` off the network.
    pub fn remove_gtu(&mut self, gtu: GtuId) -> NetworkResult<GtuOnLane> {
        let lane = self.gtu_index.remove(&gtu).ok_or(NetworkError::GtuNotFound(gtu))?;
        let list = &mut self.occupants[lane.index()];
        let at = list
            .iter()
            .position(|g| g.id == gtu)
            .ok_or(NetworkError::GtuNotFound(gtu))?;
        Ok(list.remove(at))
    }

    /// Report a new front offset and speed for a GTU, possibly on another lane.
    pub fn update_gtu(&mut self, gtu: GtuId, lane: LaneId, front: f64, speed: f64) -> NetworkResult<()> {
        let mut state = self.remove_gtu(gtu)?;
        state.front = front;
        state.speed = speed;
        self.insert_gtu(lane, state)
    }
}

// ── LaneNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`LaneNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use lg_core::Direction;
/// use lg_network::{GtuTypes, LaneNetworkBuilder};
///
/// let mut b = LaneNetworkBuilder::new(GtuTypes::new());
/// let a = b.add_node("A");
/// let m = b.add_node("M");
/// let z = b.add_node("Z");
/// let first  = b.add_link(a, m, 2, 500.0);
/// let second = b.add_link(m, z, 2, 500.0);
/// b.set_speed_limit(first, 33.3);
/// b.set_speed_limit(second, 33.3);
/// b.connect_links(first, second, Direction::Plus);
/// let net = b.build().unwrap();
/// assert_eq!(net.lane_count(), 4);
/// ```
pub struct LaneNetworkBuilder {
    gtu_types:   GtuTypes,
    nodes:       Vec<String>,
    links:       Vec<(NodeId, NodeId)>,
    link_lanes:  Vec<u32>,
    lane_link:   Vec<LinkId>,
    lane_length: Vec<f64>,
    lane_limit:  Vec<Option<f64>>,
    type_limits: Vec<Vec<(GtuTypeId, f64)>>,
    allowed:     Vec<Vec<GtuTypeId>>,
    raw_succ:    Vec<(LaneId, Direction, LaneId, Direction)>,
}

impl LaneNetworkBuilder {
    pub fn new(gtu_types: GtuTypes) -> Self {
        Self {
            gtu_types,
            nodes:       Vec::new(),
            links:       Vec::new(),
            link_lanes:  vec![0],
            lane_link:   Vec::new(),
            lane_length: Vec::new(),
            lane_limit:  Vec::new(),
            type_limits: Vec::new(),
            allowed:     Vec::new(),
            raw_succ:    Vec::new(),
        }
    }

    pub fn gtu_types(&self) -> &GtuTypes {
        &self.gtu_types
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(name.to_owned());
        id
    }

    /// Add a link from `from` to `to` with `lanes` parallel lanes of equal
    /// length.  Lanes get consecutive `LaneId`s, right edge first.
    pub fn add_link(&mut self, from: NodeId, to: NodeId, lanes: usize, length_m: f64) -> LinkId {
        let id = LinkId(self.links.len() as u32);
        self.links.push((from, to));
        for _ in 0..lanes {
            self.lane_link.push(id);
            self.lane_length.push(length_m);
            self.lane_limit.push(None);
            self.type_limits.push(Vec::new());
            self.allowed.push(Vec::new());
        }
        self.link_lanes.push(self.lane_link.len() as u32);
        id
    }

    /// Lane `number` (1 = right edge) of a link added earlier.
    pub fn lane(&self, link: LinkId, number: usize) -> NetworkResult<LaneId> {
        let li = link.index();
        if li >= self.links.len() {
            return Err(NetworkError::LinkNotFound(link));
        }
        let start = self.link_lanes[li] as usize;
        let end   = self.link_lanes[li + 1] as usize;
        if number == 0 || start + number > end {
            return Err(NetworkError::LaneNumberOutOfRange { link, number });
        }
        Ok(LaneId((start + number - 1) as u32))
    }

    /// General speed limit (m/s) for every lane of `link`.
    pub fn set_speed_limit(&mut self, link: LinkId, limit: f64) {
        let start = self.link_lanes[link.index()] as usize;
        let end   = self.link_lanes[link.index() + 1] as usize;
        for l in &mut self.lane_limit[start..end] {
            *l = Some(limit);
        }
    }

    /// Speed limit for `gtu_type` (and descendants) on one lane.
    pub fn set_type_speed_limit(&mut self, lane: LaneId, gtu_type: GtuTypeId, limit: f64) {
        let limits = &mut self.type_limits[lane.index()];
        limits.retain(|(t, _)| *t != gtu_type);
        limits.push((gtu_type, limit));
    }

    /// Restrict `lane` to the given types and their descendants.
    pub fn restrict_lane(&mut self, lane: LaneId, allowed: &[GtuTypeId]) {
        self.allowed[lane.index()] = allowed.to_vec();
    }

    /// Declare that leaving `from` in direction `from_dir` leads onto `to`
    /// travelled in `to_dir`.
    pub fn connect(&mut self, from: LaneId, from_dir: Direction, to: LaneId, to_dir: Direction) {
        self.raw_succ.push((from, from_dir, to, to_dir));
    }

    /// Connect lanes of equal number between two consecutive links, both
    /// travelled in `dir`.  Surplus lanes on either side stay unconnected.
    pub fn connect_links(&mut self, from: LinkId, to: LinkId, dir: Direction) {
        let from_start = self.link_lanes[from.index()];
        let from_n     = self.link_lanes[from.index() + 1] - from_start;
        let to_start   = self.link_lanes[to.index()];
        let to_n       = self.link_lanes[to.index() + 1] - to_start;
        for i in 0..from_n.min(to_n) {
            self.connect(LaneId(from_start + i), dir, LaneId(to_start + i), dir);
        }
    }

    /// Consume the builder and produce a [`LaneNetwork`].
    ///
    /// Fails on unknown nodes, lanes or GTU types, and on lanes whose length
    /// is not positive.
    pub fn build(self) -> NetworkResult<LaneNetwork> {
        let node_count = self.nodes.len();
        let lane_count = self.lane_link.len();

        for &(a, b) in &self.links {
            for n in [a, b] {
                if n.index() >= node_count {
                    return Err(NetworkError::NodeNotFound(n));
                }
            }
        }
        for (i, &len) in self.lane_length.iter().enumerate() {
            if !(len.is_finite() && len > 0.0) {
                return Err(NetworkError::InvalidLaneLength { lane: LaneId(i as u32), length: len });
            }
        }
        for &(from, _, to, _) in &self.raw_succ {
            for l in [from, to] {
                if l.index() >= lane_count {
                    return Err(NetworkError::LaneNotFound(l));
                }
            }
        }
        let type_refs = self
            .allowed
            .iter()
            .flatten()
            .chain(self.type_limits.iter().flatten().map(|(t, _)| t));
        for &t in type_refs {
            if !self.gtu_types.contains(t) {
                return Err(NetworkError::UnknownGtuType(t));
            }
        }

        // Drop repeated connections, keeping the first; then a stable sort by
        // (lane, direction) for CSR construction keeps declaration order.
        let mut seen = std::collections::HashSet::new();
        let mut raw = self.raw_succ;
        raw.retain(|c| seen.insert(*c));
        raw.sort_by_key(|&(from, dir, _, _)| succ_key(from, dir));

        let mut succ_start = vec![0u32; lane_count * 2 + 1];
        for &(from, dir, _, _) in &raw {
            succ_start[succ_key(from, dir) + 1] += 1;
        }
        for i in 1..succ_start.len() {
            succ_start[i] += succ_start[i - 1];
        }
        let succ = raw.iter().map(|&(_, _, to, to_dir)| (to, to_dir)).collect();

        Ok(LaneNetwork {
            node_names:       self.nodes,
            link_from:        self.links.iter().map(|l| l.0).collect(),
            link_to:          self.links.iter().map(|l| l.1).collect(),
            link_lane_start:  self.link_lanes,
            lane_link:        self.lane_link,
            lane_length:      self.lane_length,
            lane_speed_limit: self.lane_limit,
            lane_type_limits: self.type_limits,
            lane_allowed:     self.allowed,
            succ_start,
            succ,
            gtu_types:        self.gtu_types,
            occupants:        vec![Vec::new(); lane_count],
            gtu_index:        GtuIndex::default(),
            next_gtu:         0,
        })
    }
}
