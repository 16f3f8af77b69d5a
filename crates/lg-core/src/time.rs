//! Simulation time model.
//!
//! # Design
//!
//! Generation happens in continuous time: inter-arrival draws produce
//! arbitrary real-valued offsets (e.g. `6.93 s`), so time is a `f64` number
//! of seconds rather than an integer tick.  Two newtypes keep instants and
//! spans apart:
//!
//! ```text
//! SimTime + SimDuration = SimTime
//! SimTime - SimTime     = SimDuration
//! ```
//!
//! `SimTime` is totally ordered (`f64::total_cmp`) so it can key a
//! `BTreeMap` directly.  `SimTime::INFINITY` is a valid value and means
//! "never": the arrival process returns it once demand runs out.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation instant, in seconds since the scenario origin.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The instant that never comes.
    pub const INFINITY: SimTime = SimTime(f64::INFINITY);

    /// Construct from seconds, rejecting NaN.
    pub fn from_secs(secs: f64) -> CoreResult<SimTime> {
        if secs.is_nan() {
            return Err(CoreError::InvalidTime(secs));
        }
        Ok(SimTime(secs))
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Time elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> SimDuration {
        SimDuration(self.0 - earlier.0)
    }

    #[inline]
    pub fn min(self, other: SimTime) -> SimTime {
        if other < self { other } else { self }
    }

    #[inline]
    pub fn max(self, other: SimTime) -> SimTime {
        if other > self { other } else { self }
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for SimTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.to_bits());
    }
}

impl Add<SimDuration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl AddAssign<SimDuration> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: SimDuration) {
        self.0 += rhs.0;
    }
}

impl Sub for SimTime {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: SimTime) -> SimDuration {
        SimDuration(self.0 - rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() {
            write!(f, "t={:.3}s", self.0)
        } else {
            f.write_str("t=inf")
        }
    }
}

// ── SimDuration ───────────────────────────────────────────────────────────────

/// A span of simulated time in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDuration(pub f64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0.0);

    #[inline]
    pub fn from_secs(secs: f64) -> SimDuration {
        SimDuration(secs)
    }

    #[inline]
    pub fn from_millis(millis: f64) -> SimDuration {
        SimDuration(millis / 1000.0)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Clamp negative spans to zero.
    #[inline]
    pub fn non_negative(self) -> SimDuration {
        SimDuration(self.0.max(0.0))
    }
}

impl Add for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0 + rhs.0)
    }
}

impl Mul<f64> for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn mul(self, rhs: f64) -> SimDuration {
        SimDuration(self.0 * rhs)
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the scenario.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Instant at which generators start drawing arrivals.
    pub start_time: SimTime,

    /// Events scheduled after this instant are not executed.
    pub end_time: SimTime,
}

impl RunConfig {
    /// Check that the run window is well formed.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.start_time.is_finite() || self.end_time < self.start_time {
            return Err(CoreError::Config(format!(
                "run window {} .. {} is empty or unbounded at the start",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }

    /// Length of the run window.
    pub fn duration(&self) -> SimDuration {
        self.end_time - self.start_time
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed:       42,
            start_time: SimTime::ZERO,
            end_time:   SimTime(3_600.0),
        }
    }
}
