//! The `Scenario` struct and its event loop.

use log::info;

use lg_core::{GeneratorId, LaneId, PlatoonsId, RandomSource, RunConfig, SimTime, StreamRng};
use lg_demand::VehicleDescriptor;
use lg_events::{Clock, EventClock};
use lg_network::LaneTopology;
use lg_placement::GenerationPosition;

use crate::{
    Event, GeneratorBuilder, GeneratorError, GeneratorObserver, GeneratorResult, GtuPlacer, LaneBasedGenerator,
    PlatoonCharacteristics, Platoons,
};

/// Stream ids at and above this value belong to platoon schedulers.
const PLATOON_STREAM_BASE: u64 = 1 << 32;

/// Owns the clock, the network and every generator and platoon scheduler,
/// and dispatches popped events to them.
///
/// ```text
/// start()        generators schedule their first arrival,
///                platoon schedulers disable their generator and arm
/// step()         pop the earliest event ≤ end_time, dispatch it
/// run()          step until the queue holds nothing ≤ end_time
/// ```
pub struct Scenario<N> {
    run:        RunConfig,
    clock:      EventClock<Event>,
    network:    N,
    generators: Vec<LaneBasedGenerator>,
    platoons:   Vec<Platoons>,
    started:    bool,
}

impl<N: LaneTopology + GtuPlacer> Scenario<N> {
    pub fn new(run: RunConfig, network: N) -> GeneratorResult<Self> {
        run.validate()?;
        Ok(Self {
            clock: EventClock::new(run.start_time),
            run,
            network,
            generators: Vec::new(),
            platoons: Vec::new(),
            started: false,
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    pub fn add_generator(&mut self, builder: GeneratorBuilder) -> GeneratorResult<GeneratorId> {
        let id = GeneratorId::try_from(self.generators.len())
            .map_err(|_| GeneratorError::Config("too many generators".into()))?;
        self.generators.push(builder.build(id, self.run.seed)?);
        Ok(id)
    }

    /// Add a platoon scheduler that places at `position` on behalf of `generator`.
    pub fn add_platoons(
        &mut self,
        generator:       GeneratorId,
        position:        GenerationPosition,
        characteristics: impl PlatoonCharacteristics + 'static,
    ) -> GeneratorResult<PlatoonsId> {
        if generator.index() >= self.generators.len() {
            return Err(GeneratorError::UnknownGenerator(generator));
        }
        let id = PlatoonsId::try_from(self.platoons.len())
            .map_err(|_| GeneratorError::Config("too many platoon schedulers".into()))?;
        let rng: Box<dyn RandomSource> = Box::new(StreamRng::new(self.run.seed, PLATOON_STREAM_BASE + id.index() as u64));
        self.platoons
            .push(Platoons::new(id, generator, position, Box::new(characteristics), rng));
        Ok(id)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    /// Mutable network access between steps, e.g. for the motion model.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    pub fn generator(&self, id: GeneratorId) -> GeneratorResult<&LaneBasedGenerator> {
        self.generators.get(id.index()).ok_or(GeneratorError::UnknownGenerator(id))
    }

    pub fn generators(&self) -> &[LaneBasedGenerator] {
        &self.generators
    }

    pub fn platoons(&self, id: PlatoonsId) -> GeneratorResult<&Platoons> {
        self.platoons.get(id.index()).ok_or(GeneratorError::UnknownPlatoons(id))
    }

    pub fn platoons_mut(&mut self, id: PlatoonsId) -> GeneratorResult<&mut Platoons> {
        self.platoons.get_mut(id.index()).ok_or(GeneratorError::UnknownPlatoons(id))
    }

    pub fn pending_events(&self) -> usize {
        self.clock.pending()
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Disable `generator` on `lanes` during `[start, end)`.
    pub fn disable(
        &mut self,
        generator: GeneratorId,
        start:     SimTime,
        end:       SimTime,
        lanes:     &[LaneId],
    ) -> GeneratorResult<()> {
        let g = self
            .generators
            .get_mut(generator.index())
            .ok_or(GeneratorError::UnknownGenerator(generator))?;
        g.disable(start, end, lanes, &mut self.clock)
    }

    /// Hand an externally produced descriptor to `generator`'s backlog.
    pub fn enqueue<O: GeneratorObserver>(
        &mut self,
        generator:  GeneratorId,
        descriptor: VehicleDescriptor,
        observer:   &mut O,
    ) -> GeneratorResult<()> {
        let g = self
            .generators
            .get_mut(generator.index())
            .ok_or(GeneratorError::UnknownGenerator(generator))?;
        g.enqueue(descriptor, &mut self.network, &mut self.clock, observer)
    }

    /// Start every generator and platoon scheduler.  Called by
    /// [`step`](Self::step) if not done yet.
    pub fn start<O: GeneratorObserver>(&mut self, observer: &mut O) -> GeneratorResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        info!(
            "scenario: {} generators, {} platoon schedulers, {} → {}",
            self.generators.len(),
            self.platoons.len(),
            self.run.start_time,
            self.run.end_time
        );
        for g in &mut self.generators {
            g.start(&mut self.clock, observer)?;
        }
        for p in &mut self.platoons {
            let g = self
                .generators
                .get_mut(p.generator().index())
                .ok_or(GeneratorError::UnknownGenerator(p.generator()))?;
            p.start(g, &mut self.clock)?;
        }
        Ok(())
    }

    /// Dispatch the earliest event at or before `limit`.
    ///
    /// Returns its time, or `None` when nothing is due by `limit`.
    pub fn step_until<O: GeneratorObserver>(&mut self, limit: SimTime, observer: &mut O) -> GeneratorResult<Option<SimTime>> {
        self.start(observer)?;
        let Some((time, event)) = self.clock.advance_until(limit.min(self.run.end_time)) else {
            return Ok(None);
        };
        self.dispatch(event, observer)?;
        Ok(Some(time))
    }

    pub fn step<O: GeneratorObserver>(&mut self, observer: &mut O) -> GeneratorResult<Option<SimTime>> {
        self.step_until(self.run.end_time, observer)
    }

    /// Dispatch every event at or before `limit`.  Returns how many ran.
    pub fn run_until<O: GeneratorObserver>(&mut self, limit: SimTime, observer: &mut O) -> GeneratorResult<usize> {
        let mut n = 0;
        while self.step_until(limit, observer)?.is_some() {
            n += 1;
        }
        Ok(n)
    }

    /// Run to the configured end time.
    pub fn run<O: GeneratorObserver>(&mut self, observer: &mut O) -> GeneratorResult<usize> {
        let n = self.run_until(self.run.end_time, observer)?;
        let placed: u64 = self.generators.iter().map(|g| g.placed()).sum();
        info!("scenario: {n} events, {placed} GTUs placed by {}", self.run.end_time);
        observer.on_run_end(self.run.end_time);
        Ok(n)
    }

    fn dispatch<O: GeneratorObserver>(&mut self, event: Event, observer: &mut O) -> GeneratorResult<()> {
        match event {
            Event::Generator { id, kind } => {
                let g = self
                    .generators
                    .get_mut(id.index())
                    .ok_or(GeneratorError::UnknownGenerator(id))?;
                g.handle(kind, &mut self.network, &mut self.clock, observer)
            }
            Event::Platoon { id } => {
                let p = self
                    .platoons
                    .get_mut(id.index())
                    .ok_or(GeneratorError::UnknownPlatoons(id))?;
                let g = self
                    .generators
                    .get_mut(p.generator().index())
                    .ok_or(GeneratorError::UnknownGenerator(p.generator()))?;
                p.handle(g, &mut self.network, &mut self.clock, observer)
            }
        }
    }
}
