//! Piecewise demand profiles.
//!
//! A profile is a strictly increasing list of breakpoints `t_0 < … < t_n`
//! with one rate (vehicles per second) per breakpoint.  The profile covers
//! `[t_0, t_n)`; outside it there is no demand.
//!
//! | Mode       | Rate inside `[t_i, t_{i+1})`                               |
//! |------------|------------------------------------------------------------|
//! | `Stepwise` | `r_i` (the last rate only closes the profile)              |
//! | `Linear`   | `r_i` at `t_i` rising or falling linearly to `r_{i+1}`     |

use lg_core::SimTime;

use crate::{DemandError, DemandResult};

/// How the rate varies between breakpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Stepwise,
    Linear,
}

/// Validated time/rate breakpoints.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandProfile {
    times:         Vec<SimTime>,
    rates:         Vec<f64>,
    interpolation: Interpolation,
}

impl DemandProfile {
    /// Build a profile, rejecting short, mismatched, unordered or negative input.
    pub fn new(times: Vec<SimTime>, rates: Vec<f64>, interpolation: Interpolation) -> DemandResult<Self> {
        if times.len() < 2 {
            return Err(DemandError::ProfileTooShort(times.len()));
        }
        if times.len() != rates.len() {
            return Err(DemandError::LengthMismatch { times: times.len(), rates: rates.len() });
        }
        if !times[0].is_finite() {
            return Err(DemandError::NonIncreasingTime { index: 0 });
        }
        for i in 1..times.len() {
            if times[i] <= times[i - 1] || !times[i].is_finite() {
                return Err(DemandError::NonIncreasingTime { index: i });
            }
        }
        if let Some((index, &rate)) = rates.iter().enumerate().find(|(_, r)| !(r.is_finite() && **r >= 0.0)) {
            return Err(DemandError::InvalidRate { index, rate });
        }
        Ok(Self { times, rates, interpolation })
    }

    /// Convenience constructor from plain seconds.
    pub fn from_secs(times: &[f64], rates: &[f64], interpolation: Interpolation) -> DemandResult<Self> {
        let times = times
            .iter()
            .map(|&t| SimTime::from_secs(t))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(times, rates.to_vec(), interpolation)
    }

    /// A single constant rate over `[start, end)`.
    pub fn constant(start: SimTime, end: SimTime, rate: f64) -> DemandResult<Self> {
        Self::new(vec![start, end], vec![rate, rate], Interpolation::Stepwise)
    }

    pub fn start(&self) -> SimTime {
        self.times[0]
    }

    pub fn end(&self) -> SimTime {
        self.times[self.times.len() - 1]
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn times(&self) -> &[SimTime] {
        &self.times
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Number of intervals (`breakpoints - 1`).
    pub fn interval_count(&self) -> usize {
        self.times.len() - 1
    }

    /// Index `i` of the interval `[t_i, t_{i+1})` containing `t`.
    pub fn interval_of(&self, t: SimTime) -> Option<usize> {
        if t < self.start() || t >= self.end() {
            return None;
        }
        // First breakpoint after t, minus one.
        Some(self.times.partition_point(|&bp| bp <= t) - 1)
    }

    /// Rate at the start and end of interval `i`, per the interpolation mode.
    pub fn interval_rates(&self, i: usize) -> (f64, f64) {
        match self.interpolation {
            Interpolation::Stepwise => (self.rates[i], self.rates[i]),
            Interpolation::Linear   => (self.rates[i], self.rates[i + 1]),
        }
    }

    /// Instantaneous rate at `t` (0 outside the profile).
    pub fn rate_at(&self, t: SimTime) -> f64 {
        let Some(i) = self.interval_of(t) else { return 0.0 };
        let (r0, r1) = self.interval_rates(i);
        let span = (self.times[i + 1] - self.times[i]).secs();
        let frac = (t - self.times[i]).secs() / span;
        r0 + (r1 - r0) * frac
    }

    /// Expected number of arrivals over the whole profile.
    pub fn expected_arrivals(&self) -> f64 {
        (0..self.interval_count())
            .map(|i| {
                let (r0, r1) = self.interval_rates(i);
                0.5 * (r0 + r1) * (self.times[i + 1] - self.times[i]).secs()
            })
            .sum()
    }
}
