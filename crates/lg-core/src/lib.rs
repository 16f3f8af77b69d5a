//! `lg-core`: foundational types for the `lanegen` vehicle generator.
//!
//! This crate is a dependency of every other `lg-*` crate.  It has no `lg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`ids`]       | `LaneId`, `LinkId`, `NodeId`, `GtuTypeId`, `GtuId`, …       |
//! | [`time`]      | `SimTime`, `SimDuration`, `RunConfig`                       |
//! | [`rng`]       | `RandomSource`, `StreamRng`, `ScriptedSource`, `AsRng`      |
//! | [`direction`] | `Direction` (travel direction relative to the design line)  |
//! | [`error`]     | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::{CategoryId, GeneratorId, GtuId, GtuTypeId, LaneId, LinkId, NodeId, PlatoonsId};
pub use rng::{AsRng, RandomSource, ScriptedSource, StreamRng};
pub use time::{RunConfig, SimDuration, SimTime};
