//! Generator observer trait for data collection.

use lg_core::{GeneratorId, GtuId, GtuTypeId, PlatoonsId, SimTime};
use lg_placement::GenerationPosition;

/// Who placed a GTU.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementSource {
    /// The stochastic generator, through its backlog.
    Backlog,
    /// A platoon scheduler, bypassing the backlog.
    Platoon(PlatoonsId),
}

/// One successful placement.
#[derive(Clone, Debug)]
pub struct PlacedGtu<'a> {
    pub generator:    GeneratorId,
    pub gtu:          GtuId,
    pub gtu_type:     GtuTypeId,
    pub time:         SimTime,
    /// Nominal arrival time; equal to `time` for platoon GTUs.
    pub arrival_time: SimTime,
    pub position:     &'a GenerationPosition,
    pub speed:        f64,
    pub source:       PlacementSource,
}

/// Callbacks invoked by generators and platoon schedulers.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait GeneratorObserver {
    /// A descriptor entered the backlog.  `queue_len` includes it.
    fn on_arrival(&mut self, _generator: GeneratorId, _time: SimTime, _queue_len: usize) {}

    fn on_placed(&mut self, _placed: &PlacedGtu<'_>) {}

    /// The backlog head could not be placed; another attempt is scheduled.
    fn on_blocked(&mut self, _generator: GeneratorId, _time: SimTime, _queue_len: usize) {}

    /// An arrival was dropped because no generation position was available.
    fn on_suppressed(&mut self, _generator: GeneratorId, _time: SimTime) {}

    fn on_disabled(&mut self, _generator: GeneratorId, _time: SimTime) {}

    fn on_enabled(&mut self, _generator: GeneratorId, _time: SimTime) {}

    /// The arrival process delivered its last arrival.
    fn on_demand_exhausted(&mut self, _generator: GeneratorId, _time: SimTime) {}

    /// Called once when a scenario run ends.
    fn on_run_end(&mut self, _time: SimTime) {}
}

/// A [`GeneratorObserver`] that does nothing.
pub struct NoopObserver;

impl GeneratorObserver for NoopObserver {}
