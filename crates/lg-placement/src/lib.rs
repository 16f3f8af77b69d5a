//! `lg-placement`: where a new GTU goes and whether it fits.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`bias`]     | `LateralPreference`, `LaneBias`, `LaneBiases`                 |
//! | [`position`] | `LanePosition`, `GenerationPosition`, `NetworkPosition`, `DrawRequest` |
//! | [`leaders`]  | `Leader`, `find_leaders`, `body_clear`                        |
//! | [`room`]     | `Placement`, `RoomChecker`, one-shot and car-following checks |
//! | [`error`]    | `PlacementError`, `PlacementResult<T>`                        |
//!
//! # Two-level draw (summary)
//!
//! ```text
//! link   ∝ fixed weight | accessible lanes      (0 if off-route)
//! lane k ∝ 1 / ((d+1)^bias · (backlog_k + 1))   (0 if d ≥ sticky lanes)
//! d      = |pos(v)·(N-1) + 1 - k|
//! ```
//!
//! Lane `k` counts the type's accessible lanes of the link from the right
//! edge, `N` is their number and `pos(v)` the lateral preference at desired
//! speed `v` (0 = right edge, 1 = left edge).

pub mod bias;
pub mod error;
pub mod leaders;
pub mod position;
pub mod room;

#[cfg(test)]
mod tests;

pub use bias::{LaneBias, LaneBiases, LateralPreference};
pub use error::{PlacementError, PlacementResult};
pub use leaders::{body_clear, find_leaders, Leader};
pub use position::{DrawRequest, GenerationPosition, LanePosition, NetworkPosition};
pub use room::{
    one_shot_speed, required_gap, CarFollowingRoomChecker, CongestionHeadwayFactor, HeadwayFactor,
    NoAdjustment, Placement, RoomChecker, RoomRequest, SingleLeaderRoomChecker, DEFAULT_HEADWAY, MIN_GAP,
};
