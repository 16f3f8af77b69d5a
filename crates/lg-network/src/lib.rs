//! `lg-network`: lane network, GTU types, topology queries and routes.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`gtu_type`] | `GtuTypes` (flat parent-linked type hierarchy)             |
//! | [`network`]  | `LaneNetwork` (flat tables + occupancy), builder           |
//! | [`topology`] | `LaneTopology` trait consumed by placement                 |
//! | [`route`]    | `Route` (node sequence with adjacency test)                |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Uses `rustc-hash` for the GTU occupancy index.             |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.         |

pub mod error;
pub mod gtu_type;
pub mod network;
pub mod route;
pub mod topology;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use gtu_type::GtuTypes;
pub use network::{GtuOnLane, LaneNetwork, LaneNetworkBuilder};
pub use route::Route;
pub use topology::LaneTopology;
