//! Events the scenario feeds back into generators and platoon schedulers.

use lg_core::{GeneratorId, PlatoonsId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Generator { id: GeneratorId, kind: GeneratorEvent },
    Platoon { id: PlatoonsId },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneratorEvent {
    /// Next stochastic arrival.
    Arrival,
    /// Admission attempt for the backlog head.
    Retry,
    /// Disable window `i` opens.
    DisableStart(usize),
    /// Disable window `i` closes.
    DisableEnd(usize),
}
