//! `LaneBasedGenerator`: arrivals feed a backlog, the backlog head is
//! retried until there is room.
//!
//! # Event flow
//!
//! ```text
//! Arrival          schedule the next Arrival
//!                  draw descriptor, desired speed and position
//!                  push to backlog; attempt now if no retry is pending
//! Retry            head only: leaders, body check, room check
//!                    Admit  → pop, place, Retry after interval if non-empty
//!                    NotNow → Retry after interval
//! DisableStart(i)  full window: cancel the pending arrival inside it
//! DisableEnd(i)    full window: draw a fresh inter-arrival from now
//! ```
//!
//! A window that covers only some positions masks them out of the draw and
//! holds a backlog head queued for one of them; arrivals keep coming.

use log::{debug, info, trace, warn};

use lg_core::{GeneratorId, GtuId, GtuTypeId, LaneId, RandomSource, SimTime};
use lg_demand::{ArrivalSource, DescriptorSource, VehicleDescriptor};
use lg_events::{Clock, EventHandle};
use lg_network::{LaneTopology, Route};
use lg_placement::{
    body_clear, find_leaders, DrawRequest, GenerationPosition, LaneBiases, NetworkPosition, Placement,
    PlacementError, RoomChecker, RoomRequest,
};

use crate::{
    Backlog, Event, GeneratorConfig, GeneratorError, GeneratorEvent, GeneratorObserver, GeneratorResult,
    GtuPlacer, PlacedGtu, PlacementSource, QueuedGtu,
};

// ── Disable windows ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct DisableWindow {
    start:     SimTime,
    end:       SimTime,
    positions: Vec<usize>,
    /// Covers every position, so arrivals stop altogether.
    full:      bool,
}

impl DisableWindow {
    fn covers(&self, t: SimTime) -> bool {
        self.start <= t && t < self.end
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RetryState {
    Idle,
    Scheduled(EventHandle),
}

// ── LaneBasedGenerator ────────────────────────────────────────────────────────

/// One generator: its demand, its positions and its backlog.
///
/// Create via [`GeneratorBuilder`][crate::GeneratorBuilder].  The generator
/// never loops; every handler ends by scheduling its next event on the
/// clock.
pub struct LaneBasedGenerator {
    id:           GeneratorId,
    arrivals:     Box<dyn ArrivalSource>,
    descriptors:  Box<dyn DescriptorSource>,
    room:         Box<dyn RoomChecker>,
    positions:    NetworkPosition,
    biases:       LaneBiases,
    rng:          Box<dyn RandomSource>,
    config:       GeneratorConfig,
    backlog:      Backlog,
    retry:        RetryState,
    next_arrival: Option<EventHandle>,
    windows:      Vec<DisableWindow>,
    /// Per-position mask, refreshed from `windows` before every draw and attempt.
    blocked:      Vec<bool>,
    started:      bool,
    exhausted:    bool,
    placed:       u64,
}

impl LaneBasedGenerator {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id:          GeneratorId,
        arrivals:    Box<dyn ArrivalSource>,
        descriptors: Box<dyn DescriptorSource>,
        room:        Box<dyn RoomChecker>,
        positions:   NetworkPosition,
        biases:      LaneBiases,
        rng:         Box<dyn RandomSource>,
        config:      GeneratorConfig,
    ) -> Self {
        let n = positions.len();
        Self {
            id,
            arrivals,
            descriptors,
            room,
            positions,
            biases,
            rng,
            config,
            backlog:      Backlog::new(n),
            retry:        RetryState::Idle,
            next_arrival: None,
            windows:      Vec::new(),
            blocked:      vec![false; n],
            started:      false,
            exhausted:    false,
            placed:       0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> GeneratorId {
        self.id
    }

    pub fn positions(&self) -> &NetworkPosition {
        &self.positions
    }

    pub fn backlog(&self) -> &Backlog {
        &self.backlog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// GTUs placed so far, backlog and direct placements together.
    pub fn placed(&self) -> u64 {
        self.placed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// `true` once the arrival process has delivered its last arrival.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Time of the pending stochastic arrival, if any.
    pub fn next_arrival(&self) -> Option<SimTime> {
        self.next_arrival.map(|h| h.time)
    }

    /// `true` if a window covering every position is open at `t`.
    pub fn fully_disabled_at(&self, t: SimTime) -> bool {
        self.windows.iter().any(|w| w.full && w.covers(t))
    }

    fn event(&self, kind: GeneratorEvent) -> Event {
        Event::Generator { id: self.id, kind }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Schedule the first arrival.
    pub fn start(&mut self, clock: &mut dyn Clock<Event>, observer: &mut dyn GeneratorObserver) -> GeneratorResult<()> {
        if self.started {
            return Err(GeneratorError::Config(format!("generator {} already started", self.id)));
        }
        self.started = true;
        debug!("generator {}: started at {} with {} positions", self.id, clock.now(), self.positions.len());
        self.schedule_arrival(clock, observer)
    }

    fn schedule_arrival(&mut self, clock: &mut dyn Clock<Event>, observer: &mut dyn GeneratorObserver) -> GeneratorResult<()> {
        let now = clock.now();
        match self.arrivals.next_interval(now, self.rng.as_mut())? {
            Some(dt) => {
                let at = now + dt.non_negative();
                let event = self.event(GeneratorEvent::Arrival);
                self.next_arrival = Some(clock.schedule_at(at, event)?);
            }
            None => {
                self.exhausted = true;
                info!("generator {}: demand exhausted at {now}", self.id);
                observer.on_demand_exhausted(self.id, now);
            }
        }
        Ok(())
    }

    /// Dispatch one of this generator's events.
    pub fn handle<N: LaneTopology + GtuPlacer>(
        &mut self,
        kind:     GeneratorEvent,
        network:  &mut N,
        clock:    &mut dyn Clock<Event>,
        observer: &mut dyn GeneratorObserver,
    ) -> GeneratorResult<()> {
        match kind {
            GeneratorEvent::Arrival => self.on_arrival(network, clock, observer),
            GeneratorEvent::Retry => {
                self.retry = RetryState::Idle;
                self.attempt(network, clock, observer)
            }
            GeneratorEvent::DisableStart(i) => self.on_disable_start(i, clock, observer),
            GeneratorEvent::DisableEnd(i) => self.on_disable_end(i, clock, observer),
        }
    }

    // ── Arrivals ──────────────────────────────────────────────────────────

    fn on_arrival<N: LaneTopology + GtuPlacer>(
        &mut self,
        network:  &mut N,
        clock:    &mut dyn Clock<Event>,
        observer: &mut dyn GeneratorObserver,
    ) -> GeneratorResult<()> {
        let now = clock.now();
        self.next_arrival = None;
        if self.fully_disabled_at(now) {
            warn!("generator {}: arrival at {now} suppressed by disable window", self.id);
            observer.on_suppressed(self.id, now);
            return Ok(());
        }
        self.schedule_arrival(clock, observer)?;
        let descriptor = self.descriptors.next_descriptor(self.rng.as_mut())?;
        self.enqueue(descriptor, network, clock, observer)
    }

    /// Desired speed of `descriptor` under the lowest limit over its
    /// accessible positions.
    pub fn desired_speed(&self, descriptor: &VehicleDescriptor, topology: &dyn LaneTopology) -> GeneratorResult<f64> {
        let ty = descriptor.gtu_type;
        let limit = self.positions.min_speed_limit(ty, topology)?;
        Ok(descriptor.behavior.desired_speed(ty, limit, descriptor.max_speed))
    }

    /// Draw a position index against the current backlog and disable mask.
    pub fn draw_position(
        &mut self,
        gtu_type:      GtuTypeId,
        desired_speed: f64,
        route:         Option<&Route>,
        now:           SimTime,
        topology:      &dyn LaneTopology,
    ) -> GeneratorResult<usize> {
        self.refresh_mask(now);
        let request = DrawRequest {
            gtu_type,
            desired_speed,
            route,
            backlog: self.backlog.counts(),
            blocked: &self.blocked,
        };
        Ok(self.positions.draw(&request, &self.biases, self.rng.as_mut(), topology)?)
    }

    /// `true` if the disable mask alone leaves `descriptor` without a
    /// candidate position.
    fn masked_out(&self, descriptor: &VehicleDescriptor, desired_speed: f64, topology: &dyn LaneTopology) -> bool {
        if !self.blocked.contains(&true) {
            return false;
        }
        let unmasked = DrawRequest {
            gtu_type: descriptor.gtu_type,
            desired_speed,
            route: descriptor.route.as_deref(),
            backlog: self.backlog.counts(),
            blocked: &[],
        };
        self.positions.has_candidate(&unmasked, &self.biases, topology)
    }

    /// Queue `descriptor` as if it arrived now.  Also the entry point for
    /// external descriptor sources.
    pub fn enqueue<N: LaneTopology + GtuPlacer>(
        &mut self,
        descriptor: VehicleDescriptor,
        network:    &mut N,
        clock:      &mut dyn Clock<Event>,
        observer:   &mut dyn GeneratorObserver,
    ) -> GeneratorResult<()> {
        let now = clock.now();
        let desired_speed = self.desired_speed(&descriptor, &*network)?;
        let drawn = self.draw_position(descriptor.gtu_type, desired_speed, descriptor.route.as_deref(), now, &*network);
        let position = match drawn {
            Ok(i) => i,
            Err(GeneratorError::Placement(PlacementError::NoCandidate(ty)))
                if self.masked_out(&descriptor, desired_speed, &*network) =>
            {
                warn!("generator {}: arrival of {ty} at {now} suppressed, its positions are disabled", self.id);
                observer.on_suppressed(self.id, now);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        debug!(
            "generator {}: {} arrived at {now}, queued for position {position} (backlog {})",
            self.id, descriptor.gtu_type, self.backlog.len() + 1
        );
        self.backlog.push(QueuedGtu { descriptor, position, desired_speed, arrival_time: now });
        observer.on_arrival(self.id, now, self.backlog.len());

        if self.retry == RetryState::Idle {
            self.attempt(network, clock, observer)?;
        }
        Ok(())
    }

    // ── Retry loop ────────────────────────────────────────────────────────

    fn schedule_retry(&mut self, clock: &mut dyn Clock<Event>) -> GeneratorResult<()> {
        let event = self.event(GeneratorEvent::Retry);
        let handle = clock.schedule_after(self.config.retry_interval, event)?;
        self.retry = RetryState::Scheduled(handle);
        Ok(())
    }

    /// Room check for the backlog head at its drawn position.
    fn check_head(&self, now: SimTime, topology: &dyn LaneTopology) -> Placement {
        let Some(head) = self.backlog.front() else {
            return Placement::NotNow;
        };
        if self.blocked[head.position] {
            trace!("generator {}: head held at {now}, position {} disabled", self.id, head.position);
            return Placement::NotNow;
        }
        let Some(position) = self.positions.get(head.position) else {
            return Placement::NotNow;
        };
        if !body_clear(position, head.descriptor.length, topology) {
            return Placement::NotNow;
        }
        let ty = head.descriptor.gtu_type;
        let leaders = find_leaders(position, ty, self.config.leader_search_range, topology);
        let request = RoomRequest {
            descriptor:    &head.descriptor,
            desired_speed: head.desired_speed,
            leaders:       &leaders,
            since_arrival: now.since(head.arrival_time),
            position,
        };
        self.room.can_place(&request, topology)
    }

    fn attempt<N: LaneTopology + GtuPlacer>(
        &mut self,
        network:  &mut N,
        clock:    &mut dyn Clock<Event>,
        observer: &mut dyn GeneratorObserver,
    ) -> GeneratorResult<()> {
        if self.backlog.is_empty() {
            return Ok(());
        }
        let now = clock.now();
        self.refresh_mask(now);

        match self.check_head(now, &*network) {
            Placement::Admit { speed, position } => {
                let Some(entry) = self.backlog.pop_front() else {
                    return Ok(());
                };
                let gtu = network.place(&entry.descriptor, &position, speed)?;
                self.placed += 1;
                debug!(
                    "generator {}: placed {gtu} ({}) at {now} on {} offset {:.1} at {speed:.1} m/s, waited {}",
                    self.id,
                    entry.descriptor.gtu_type,
                    position.primary().lane,
                    position.primary().offset,
                    now.since(entry.arrival_time),
                );
                observer.on_placed(&PlacedGtu {
                    generator:    self.id,
                    gtu,
                    gtu_type:     entry.descriptor.gtu_type,
                    time:         now,
                    arrival_time: entry.arrival_time,
                    position:     &position,
                    speed,
                    source:       PlacementSource::Backlog,
                });
                if !self.backlog.is_empty() {
                    self.schedule_retry(clock)?;
                }
            }
            Placement::NotNow => {
                trace!("generator {}: no room at {now} (backlog {})", self.id, self.backlog.len());
                observer.on_blocked(self.id, now, self.backlog.len());
                self.schedule_retry(clock)?;
            }
        }
        Ok(())
    }

    /// Place a GTU directly: no backlog, no room check.
    #[allow(clippy::too_many_arguments)]
    pub fn place_direct<N: GtuPlacer>(
        &mut self,
        descriptor: &VehicleDescriptor,
        position:   &GenerationPosition,
        speed:      f64,
        source:     PlacementSource,
        now:        SimTime,
        network:    &mut N,
        observer:   &mut dyn GeneratorObserver,
    ) -> GeneratorResult<GtuId> {
        let gtu = network.place(descriptor, position, speed)?;
        self.placed += 1;
        debug!("generator {}: {gtu} placed directly at {now} at {speed:.1} m/s ({source:?})", self.id);
        observer.on_placed(&PlacedGtu {
            generator:    self.id,
            gtu,
            gtu_type:     descriptor.gtu_type,
            time:         now,
            arrival_time: now,
            position,
            speed,
            source,
        });
        Ok(gtu)
    }

    // ── Disable windows ───────────────────────────────────────────────────

    /// Disable generation on `lanes` during `[start, end)`.
    ///
    /// Positions touching any of the lanes are masked out of the draw.  If
    /// that is every position, stochastic arrivals inside the window are
    /// cancelled and a fresh inter-arrival is drawn at `end`.
    pub fn disable(
        &mut self,
        start: SimTime,
        end:   SimTime,
        lanes: &[LaneId],
        clock: &mut dyn Clock<Event>,
    ) -> GeneratorResult<()> {
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(GeneratorError::InvalidWindow { start, end });
        }
        let positions: Vec<usize> = self
            .positions
            .positions()
            .iter()
            .enumerate()
            .filter(|(_, p)| lanes.iter().any(|&l| p.touches(l)))
            .map(|(i, _)| i)
            .collect();
        let full = positions.len() == self.positions.len();
        debug!(
            "generator {}: disable [{start}, {end}) on {} of {} positions",
            self.id, positions.len(), self.positions.len()
        );

        let i = self.windows.len();
        self.windows.push(DisableWindow { start, end, positions, full });
        let now = clock.now();
        clock.schedule_at(start.max(now), self.event(GeneratorEvent::DisableStart(i)))?;
        clock.schedule_at(end.max(now), self.event(GeneratorEvent::DisableEnd(i)))?;
        Ok(())
    }

    fn refresh_mask(&mut self, now: SimTime) {
        self.blocked.fill(false);
        for w in self.windows.iter().filter(|w| w.covers(now)) {
            for &i in &w.positions {
                self.blocked[i] = true;
            }
        }
    }

    fn on_disable_start(
        &mut self,
        i:        usize,
        clock:    &mut dyn Clock<Event>,
        observer: &mut dyn GeneratorObserver,
    ) -> GeneratorResult<()> {
        let now = clock.now();
        let Some(window) = self.windows.get(i) else {
            return Ok(());
        };
        let (full, end) = (window.full, window.end);
        if full {
            if let Some(handle) = self.next_arrival.filter(|h| h.time < end) {
                if clock.cancel(handle) {
                    warn!("generator {}: arrival at {} cancelled by disable window", self.id, handle.time);
                    observer.on_suppressed(self.id, now);
                }
                self.next_arrival = None;
            }
        }
        debug!("generator {}: window {i} open at {now} until {end}", self.id);
        observer.on_disabled(self.id, now);
        Ok(())
    }

    fn on_disable_end(
        &mut self,
        i:        usize,
        clock:    &mut dyn Clock<Event>,
        observer: &mut dyn GeneratorObserver,
    ) -> GeneratorResult<()> {
        let now = clock.now();
        let Some(window) = self.windows.get(i) else {
            return Ok(());
        };
        let full = window.full;
        debug!("generator {}: window {i} closed at {now}", self.id);
        observer.on_enabled(self.id, now);
        let resume = full
            && self.started
            && !self.exhausted
            && self.next_arrival.is_none()
            && !self.fully_disabled_at(now);
        if resume {
            self.schedule_arrival(clock, observer)?;
        }
        Ok(())
    }
}
