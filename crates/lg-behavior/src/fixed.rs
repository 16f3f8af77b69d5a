//! A behaviour with a constant speed factor and a constant headway.

use lg_core::{GtuTypeId, SimDuration};

use crate::DrivingBehavior;

/// Drives at `speed_factor · speed_limit` (capped at the vehicle's maximum)
/// and keeps a constant time headway.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedBehavior {
    pub speed_factor: f64,
    pub headway:      SimDuration,
}

impl FixedBehavior {
    pub fn new(speed_factor: f64, headway: SimDuration) -> Self {
        Self { speed_factor, headway }
    }
}

impl Default for FixedBehavior {
    fn default() -> Self {
        Self { speed_factor: 1.0, headway: SimDuration(1.2) }
    }
}

impl DrivingBehavior for FixedBehavior {
    fn desired_speed(&self, _gtu_type: GtuTypeId, speed_limit: f64, max_speed: f64) -> f64 {
        (speed_limit * self.speed_factor).min(max_speed).max(0.0)
    }

    fn desired_headway(&self, _gtu_type: GtuTypeId, _speed: f64) -> Option<SimDuration> {
        Some(self.headway)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
