//! `lg-generator`: backlog, retry loop, disable windows and platoons,
//! driven by a discrete-event scenario.
//!
//! # Event loop
//!
//! ```text
//! Scenario::step:
//!   pop earliest (time, seq) event from the EventClock
//!   Generator { id, Arrival }         → descriptor → position → backlog
//!   Generator { id, Retry }           → room check for the backlog head
//!   Generator { id, DisableStart(i) } → cancel arrivals inside window i
//!   Generator { id, DisableEnd(i) }   → fresh inter-arrival from now
//!   Platoon { id }                    → place next platoon GTU directly
//! ```
//!
//! Each handler re-arms itself by scheduling its next event and returning.
//! Events at the same instant run in the order they were scheduled.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`generator`] | `LaneBasedGenerator`                                      |
//! | [`builder`]   | `GeneratorBuilder`                                        |
//! | [`backlog`]   | `Backlog`, `QueuedGtu`                                    |
//! | [`platoons`]  | `Platoons`, `PlatoonCharacteristics`, `CategoryCharacteristics` |
//! | [`placer`]    | `GtuPlacer` (implemented for `LaneNetwork`)               |
//! | [`scenario`]  | `Scenario<N>`                                             |
//! | [`observer`]  | `GeneratorObserver`, `NoopObserver`, `PlacedGtu`          |
//! | [`loader`]    | `load_platoons_csv`, `load_platoons_reader`               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut scenario = Scenario::new(RunConfig::default(), network)?;
//! let g = scenario.add_generator(GeneratorBuilder::new(
//!     positions,
//!     Box::new(ArrivalProcess::new(profile, SimTime::ZERO)?),
//!     Box::new(CharacteristicsGenerator::new(templates)?),
//! ))?;
//! scenario.run(&mut NoopObserver)?;
//! ```

pub mod backlog;
pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod generator;
pub mod loader;
pub mod observer;
pub mod placer;
pub mod platoons;
pub mod scenario;


pub use backlog::{Backlog, QueuedGtu};
pub use builder::GeneratorBuilder;
pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use event::{Event, GeneratorEvent};
pub use generator::LaneBasedGenerator;
pub use loader::{load_platoons_csv, load_platoons_reader};
pub use observer::{GeneratorObserver, NoopObserver, PlacedGtu, PlacementSource};
pub use placer::GtuPlacer;
pub use platoons::{CategoryCharacteristics, PlatoonCharacteristics, PlatoonEntry, PlatoonState, Platoons};
pub use scenario::Scenario;
