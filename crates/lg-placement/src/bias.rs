//! Lateral lane bias per GTU type.
//!
//! A bias says where across the roadway a type prefers to enter, how sharply
//! that preference falls off, and how far from the preferred lane it may
//! ever be placed.  Biases are registered per type; a type without one
//! inherits its nearest ancestor's, and a type with no biased ancestor gets
//! [`LaneBias::NONE`].

use lg_core::GtuTypeId;
use lg_network::GtuTypes;

use crate::{PlacementError, PlacementResult};

// ── LateralPreference ─────────────────────────────────────────────────────────

/// Preferred lateral fraction: 0 = right edge, 1 = left edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LateralPreference {
    Constant(f64),
    /// Linear in desired speed: 0 at `right_speed` or below, 1 at
    /// `left_speed` or above.
    BySpeed { right_speed: f64, left_speed: f64 },
}

impl LateralPreference {
    pub fn fraction(&self, desired_speed: f64) -> f64 {
        match *self {
            LateralPreference::Constant(p) => p.clamp(0.0, 1.0),
            LateralPreference::BySpeed { right_speed, left_speed } => {
                if left_speed == right_speed {
                    return if desired_speed >= left_speed { 1.0 } else { 0.0 };
                }
                ((desired_speed - right_speed) / (left_speed - right_speed)).clamp(0.0, 1.0)
            }
        }
    }
}

// ── LaneBias ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneBias {
    preference:   LateralPreference,
    strength:     f64,
    sticky_lanes: f64,
}

impl LaneBias {
    /// Every accessible lane equally likely (before backlog).
    pub const NONE: LaneBias = LaneBias {
        preference:   LateralPreference::Constant(0.0),
        strength:     0.0,
        sticky_lanes: f64::INFINITY,
    };

    pub const WEAK_LEFT: LaneBias = LaneBias::left(1.0);
    pub const MODERATE_LEFT: LaneBias = LaneBias::left(2.0);
    pub const STRONG_LEFT: LaneBias = LaneBias::left(5.0);

    /// Trucks: right lane strongly preferred, never more than one lane away.
    pub const TRUCK_RIGHT: LaneBias = LaneBias {
        preference:   LateralPreference::Constant(0.0),
        strength:     5.0,
        sticky_lanes: 2.0,
    };

    const fn left(strength: f64) -> LaneBias {
        LaneBias {
            preference: LateralPreference::Constant(1.0),
            strength,
            sticky_lanes: f64::INFINITY,
        }
    }

    /// `strength >= 0`, `sticky_lanes >= 1` (may be infinite), constant
    /// preferences inside `[0, 1]`.
    pub fn new(preference: LateralPreference, strength: f64, sticky_lanes: f64) -> PlacementResult<Self> {
        if !(strength.is_finite() && strength >= 0.0) {
            return Err(PlacementError::InvalidBiasStrength(strength));
        }
        if sticky_lanes.is_nan() || sticky_lanes < 1.0 {
            return Err(PlacementError::InvalidStickyLanes(sticky_lanes));
        }
        if let LateralPreference::Constant(p) = preference {
            if !(0.0..=1.0).contains(&p) {
                return Err(PlacementError::InvalidPreference(p));
            }
        }
        Ok(Self { preference, strength, sticky_lanes })
    }

    /// Preference that moves left with desired speed.
    pub fn by_speed(right_speed: f64, left_speed: f64, strength: f64, sticky_lanes: f64) -> PlacementResult<Self> {
        Self::new(LateralPreference::BySpeed { right_speed, left_speed }, strength, sticky_lanes)
    }

    pub fn preference(&self) -> LateralPreference {
        self.preference
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn sticky_lanes(&self) -> f64 {
        self.sticky_lanes
    }

    /// Preferred (fractional) lane number in `1..=lanes`.
    pub fn preferred_lane(&self, lanes: usize, desired_speed: f64) -> f64 {
        let n = lanes.max(1) as f64;
        self.preference.fraction(desired_speed) * (n - 1.0) + 1.0
    }

    /// Draw weight of lane `k` (1 = rightmost accessible) out of `lanes`,
    /// with `backlog` descriptors already queued for it.
    pub fn weight(&self, k: usize, lanes: usize, desired_speed: f64, backlog: usize) -> f64 {
        let d = (self.preferred_lane(lanes, desired_speed) - k as f64).abs();
        if d >= self.sticky_lanes {
            return 0.0;
        }
        1.0 / ((d + 1.0).powf(self.strength) * (backlog as f64 + 1.0))
    }
}

impl Default for LaneBias {
    fn default() -> Self {
        LaneBias::NONE
    }
}

// ── LaneBiases ────────────────────────────────────────────────────────────────

/// Bias per GTU type, flat table indexed by `GtuTypeId`.
#[derive(Clone, Debug, Default)]
pub struct LaneBiases {
    by_type: Vec<Option<LaneBias>>,
}

impl LaneBiases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, gtu_type: GtuTypeId, bias: LaneBias) -> &mut Self {
        let i = gtu_type.index();
        if self.by_type.len() <= i {
            self.by_type.resize(i + 1, None);
        }
        self.by_type[i] = Some(bias);
        self
    }

    pub fn with(mut self, gtu_type: GtuTypeId, bias: LaneBias) -> Self {
        self.add(gtu_type, bias);
        self
    }

    /// Bias registered for exactly `gtu_type`.
    pub fn get(&self, gtu_type: GtuTypeId) -> Option<&LaneBias> {
        self.by_type.get(gtu_type.index()).and_then(Option::as_ref)
    }

    /// Bias of `gtu_type` or its nearest ancestor, else [`LaneBias::NONE`].
    pub fn resolve(&self, gtu_type: GtuTypeId, types: &GtuTypes) -> LaneBias {
        types
            .ancestors(gtu_type)
            .find_map(|t| self.get(t).copied())
            .or_else(|| self.get(gtu_type).copied())
            .unwrap_or(LaneBias::NONE)
    }
}
