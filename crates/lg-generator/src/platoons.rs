//! Platoon scheduler: pre-declared GTUs that replace the stochastic demand
//! on a lane set for bounded intervals.
//!
//! # Lifecycle
//!
//! ```text
//! Armed    add_platoon(start, end)          opens the current interval
//!          add_gtu(time, o, d, category, v) start <= time < end
//! start()  every interval disables the target generator on the platoon lanes
//! Started  entries fire one by one in time order, each placed directly
//! ```
//!
//! Entries may be declared in any order.  They are kept in a
//! `BTreeMap<(SimTime, seq), entry>` so they drain by time, and by
//! declaration order at equal times.

use std::collections::BTreeMap;

use log::{debug, info};

use lg_core::{CategoryId, GeneratorId, LaneId, NodeId, PlatoonsId, RandomSource, SimTime};
use lg_demand::{VehicleDescriptor, VehicleTemplate};
use lg_events::Clock;
use lg_placement::GenerationPosition;

use crate::{
    Event, GeneratorError, GeneratorObserver, GeneratorResult, GtuPlacer, LaneBasedGenerator, PlacementSource,
};

// ── Characteristics ───────────────────────────────────────────────────────────

/// Builds the descriptor of one platoon GTU.
pub trait PlatoonCharacteristics {
    fn descriptor(
        &mut self,
        origin:      NodeId,
        destination: NodeId,
        category:    CategoryId,
        rng:         &mut dyn RandomSource,
    ) -> GeneratorResult<VehicleDescriptor>;
}

/// One vehicle template per category.
#[derive(Clone, Default)]
pub struct CategoryCharacteristics {
    templates: Vec<Option<VehicleTemplate>>,
}

impl CategoryCharacteristics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: CategoryId, template: VehicleTemplate) -> Self {
        let i = category.index();
        if self.templates.len() <= i {
            self.templates.resize(i + 1, None);
        }
        self.templates[i] = Some(template);
        self
    }
}

impl PlatoonCharacteristics for CategoryCharacteristics {
    fn descriptor(
        &mut self,
        origin:      NodeId,
        destination: NodeId,
        category:    CategoryId,
        rng:         &mut dyn RandomSource,
    ) -> GeneratorResult<VehicleDescriptor> {
        let template = self
            .templates
            .get(category.index())
            .and_then(Option::as_ref)
            .ok_or(GeneratorError::UnknownCategory(category))?;
        let mut descriptor = template.instantiate(rng);
        descriptor.origin = Some(origin);
        descriptor.destination = Some(destination);
        Ok(descriptor)
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlatoonEntry {
    pub origin:      NodeId,
    pub destination: NodeId,
    pub category:    CategoryId,
    /// Placement speed, m/s.
    pub speed:       f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlatoonState {
    Armed,
    Started,
}

/// Platoon schedule for one generator and one generation position.
pub struct Platoons {
    id:              PlatoonsId,
    generator:       GeneratorId,
    position:        GenerationPosition,
    characteristics: Box<dyn PlatoonCharacteristics>,
    rng:             Box<dyn RandomSource>,
    state:           PlatoonState,
    /// Declared intervals in declaration order; the last one is current.
    windows:         Vec<(SimTime, SimTime)>,
    entries:         BTreeMap<(SimTime, u64), PlatoonEntry>,
    next_seq:        u64,
    fixed:           Option<(NodeId, NodeId, CategoryId)>,
    placed:          usize,
}

impl Platoons {
    pub fn new(
        id:              PlatoonsId,
        generator:       GeneratorId,
        position:        GenerationPosition,
        characteristics: Box<dyn PlatoonCharacteristics>,
        rng:             Box<dyn RandomSource>,
    ) -> Self {
        Self {
            id,
            generator,
            position,
            characteristics,
            rng,
            state: PlatoonState::Armed,
            windows: Vec::new(),
            entries: BTreeMap::new(),
            next_seq: 0,
            fixed: None,
            placed: 0,
        }
    }

    pub fn id(&self) -> PlatoonsId {
        self.id
    }

    pub fn generator(&self) -> GeneratorId {
        self.generator
    }

    pub fn state(&self) -> PlatoonState {
        self.state
    }

    pub fn windows(&self) -> &[(SimTime, SimTime)] {
        &self.windows
    }

    /// Entries not placed yet.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Lanes the target generator is disabled on.
    pub fn lanes(&self) -> Vec<LaneId> {
        self.position.lanes.iter().map(|p| p.lane).collect()
    }

    fn ensure_armed(&self) -> GeneratorResult<()> {
        match self.state {
            PlatoonState::Armed => Ok(()),
            PlatoonState::Started => Err(GeneratorError::PlatoonsStarted),
        }
    }

    // ── Declaration ───────────────────────────────────────────────────────

    /// Open the interval `[start, end)` for subsequent [`add_gtu`](Self::add_gtu) calls.
    pub fn add_platoon(&mut self, start: SimTime, end: SimTime) -> GeneratorResult<()> {
        self.ensure_armed()?;
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(GeneratorError::InvalidWindow { start, end });
        }
        if self.windows.iter().any(|&(s, e)| start < e && s < end) {
            return Err(GeneratorError::PlatoonOverlap { start, end });
        }
        self.windows.push((start, end));
        Ok(())
    }

    /// Declare one GTU of the current platoon.
    pub fn add_gtu(
        &mut self,
        time:        SimTime,
        origin:      NodeId,
        destination: NodeId,
        category:    CategoryId,
        speed:       f64,
    ) -> GeneratorResult<()> {
        self.ensure_armed()?;
        let &(start, end) = self.windows.last().ok_or(GeneratorError::NoPlatoon)?;
        if !(start <= time && time < end) {
            return Err(GeneratorError::OutsidePlatoon { time, start, end });
        }
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(GeneratorError::Config(format!("platoon GTU speed {speed} must be finite and >= 0")));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((time, seq), PlatoonEntry { origin, destination, category, speed });
        Ok(())
    }

    /// Fix origin, destination and category for [`add_gtu_fixed`](Self::add_gtu_fixed).
    pub fn fix_info(&mut self, origin: NodeId, destination: NodeId, category: CategoryId) {
        self.fixed = Some((origin, destination, category));
    }

    pub fn add_gtu_fixed(&mut self, time: SimTime, speed: f64) -> GeneratorResult<()> {
        let (origin, destination, category) = self.fixed.ok_or(GeneratorError::PlatoonInfoNotFixed)?;
        self.add_gtu(time, origin, destination, category, speed)
    }

    // ── Replay ────────────────────────────────────────────────────────────

    /// Freeze the schedule, disable `generator` for every interval and arm
    /// the first entry.
    pub fn start(&mut self, generator: &mut LaneBasedGenerator, clock: &mut dyn Clock<Event>) -> GeneratorResult<()> {
        self.ensure_armed()?;
        if generator.id() != self.generator {
            return Err(GeneratorError::UnknownGenerator(generator.id()));
        }
        let now = clock.now();
        if let Some(&(time, _)) = self.entries.keys().next().filter(|(t, _)| *t < now) {
            return Err(GeneratorError::Config(format!(
                "platoons {}: GTU at {time} is before the start time {now}",
                self.id
            )));
        }
        self.state = PlatoonState::Started;
        let lanes = self.lanes();
        for &(start, end) in &self.windows {
            generator.disable(start, end, &lanes, clock)?;
        }
        info!(
            "platoons {}: started with {} GTUs in {} platoons",
            self.id, self.entries.len(), self.windows.len()
        );
        self.arm_next(clock)
    }

    fn arm_next(&mut self, clock: &mut dyn Clock<Event>) -> GeneratorResult<()> {
        if let Some(&(time, _)) = self.entries.keys().next() {
            clock.schedule_at(time, Event::Platoon { id: self.id })?;
        }
        Ok(())
    }

    /// Place the earliest entry and arm the next one.
    pub fn handle<N: GtuPlacer>(
        &mut self,
        generator: &mut LaneBasedGenerator,
        network:   &mut N,
        clock:     &mut dyn Clock<Event>,
        observer:  &mut dyn GeneratorObserver,
    ) -> GeneratorResult<()> {
        let now = clock.now();
        let Some((_, entry)) = self.entries.pop_first() else {
            return Ok(());
        };
        let descriptor = self
            .characteristics
            .descriptor(entry.origin, entry.destination, entry.category, self.rng.as_mut())?;
        let gtu = generator.place_direct(
            &descriptor,
            &self.position,
            entry.speed,
            PlacementSource::Platoon(self.id),
            now,
            network,
            observer,
        )?;
        self.placed += 1;
        debug!("platoons {}: {gtu} placed at {now}, {} left", self.id, self.entries.len());
        self.arm_next(clock)
    }
}
