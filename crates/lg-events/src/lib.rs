//! `lg-events`: discrete-event queue and clock.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`queue`] | `EventQueue<E>` (`BTreeMap<(SimTime, seq), E>`), `EventHandle` |
//! | [`clock`] | `Clock<E>` trait, `EventClock<E>`                           |
//! | [`error`] | `EventError`, `EventResult<T>`                              |
//!
//! # Ordering model
//!
//! Events are keyed by `(time, seq)` where `seq` is a counter incremented on
//! every push.  Events at the same instant therefore pop in the order they
//! were scheduled, which the generators rely on when an arrival and a retry
//! land on the same time.

pub mod clock;
pub mod error;
pub mod queue;

#[cfg(test)]
mod tests;

pub use clock::{Clock, EventClock};
pub use error::{EventError, EventResult};
pub use queue::{EventHandle, EventQueue};
