//! Inter-arrival draws from a demand profile.
//!
//! [`ArrivalProcess`] samples a non-homogeneous Poisson process without
//! rejection.  Each draw takes one uniform `u`, turns it into the unit
//! exponential `E = -ln u`, and walks the profile from `now`, subtracting
//! the arrival mass `∫ λ` of each interval from `E`:
//!
//! ```text
//!  rate
//!   5 ┤████                ████
//!   0 ┤    ················
//!     └────┬───────────────┬────▶ t
//!         t_1             t_2
//! ```
//!
//! A draw started inside the zero-rate interval `[t_1, t_2)` finds no mass
//! there and continues at `t_2` with all of `E` left, so no arrival can fall
//! strictly inside a zero-rate interval.  A draw that runs off the last
//! breakpoint means demand is exhausted.

use lg_core::{RandomSource, SimDuration, SimTime};

use crate::{DemandError, DemandProfile, DemandResult, Interpolation};

/// Rates below this are treated as zero inside an interval.
const RATE_EPS: f64 = 1e-12;

// ── ArrivalSource ─────────────────────────────────────────────────────────────

/// Produces the time until the next arrival.
///
/// `Ok(None)` means no further arrivals.
pub trait ArrivalSource {
    fn next_interval(&mut self, now: SimTime, rng: &mut dyn RandomSource) -> DemandResult<Option<SimDuration>>;
}

// ── ArrivalProcess ────────────────────────────────────────────────────────────

/// Profile-driven Poisson arrivals.
#[derive(Clone, Debug)]
pub struct ArrivalProcess {
    profile: DemandProfile,
}

impl ArrivalProcess {
    /// Wrap `profile`; `start` must not precede its first breakpoint.
    pub fn new(profile: DemandProfile, start: SimTime) -> DemandResult<Self> {
        if start < profile.start() {
            return Err(DemandError::BeforeProfile { now: start, start: profile.start() });
        }
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &DemandProfile {
        &self.profile
    }

    /// Time from `now` to the next arrival, or `None` once demand runs out.
    pub fn draw(&self, now: SimTime, rng: &mut dyn RandomSource) -> DemandResult<Option<SimDuration>> {
        if now < self.profile.start() {
            return Err(DemandError::BeforeProfile { now, start: self.profile.start() });
        }
        let Some(mut i) = self.profile.interval_of(now) else {
            return Ok(None);
        };
        let u = rng.next_uniform().max(f64::MIN_POSITIVE);
        let mut remaining = -u.ln();

        let times = self.profile.times();
        let mut t = now;
        while i < self.profile.interval_count() {
            let t_end = times[i + 1];
            let (a, slope) = self.rate_and_slope(i, t);
            let len = (t_end - t).secs();
            let mass = a * len + 0.5 * slope * len * len;
            if mass > 0.0 && remaining <= mass {
                let advance = solve_within(a, slope, remaining).min(len);
                return Ok(Some((t + SimDuration(advance)) - now));
            }
            remaining -= mass.max(0.0);
            t = t_end;
            i += 1;
        }
        Ok(None)
    }

    /// Rate at `t` inside interval `i` and its slope (veh/s²).
    fn rate_and_slope(&self, i: usize, t: SimTime) -> (f64, f64) {
        let (r0, r1) = self.profile.interval_rates(i);
        match self.profile.interpolation() {
            Interpolation::Stepwise => (r0, 0.0),
            Interpolation::Linear => {
                let times = self.profile.times();
                let span = (times[i + 1] - times[i]).secs();
                let slope = (r1 - r0) / span;
                let a = r0 + slope * (t - times[i]).secs();
                (a.max(0.0), slope)
            }
        }
    }
}

/// Smallest `x >= 0` with `a·x + ½·k·x² = e`, for `e` within reach.
///
/// Written as `2e / (a + √(a² + 2ke))` so that `k → 0` and `a → 0` stay
/// well conditioned.
fn solve_within(a: f64, k: f64, e: f64) -> f64 {
    if k.abs() < RATE_EPS {
        return e / a;
    }
    let disc = (a * a + 2.0 * k * e).max(0.0);
    2.0 * e / (a + disc.sqrt())
}

impl ArrivalSource for ArrivalProcess {
    fn next_interval(&mut self, now: SimTime, rng: &mut dyn RandomSource) -> DemandResult<Option<SimDuration>> {
        self.draw(now, rng)
    }
}

// ── FixedHeadway ──────────────────────────────────────────────────────────────

/// Deterministic arrivals every `headway` until `until`.
#[derive(Clone, Debug)]
pub struct FixedHeadway {
    pub headway: SimDuration,
    pub until:   SimTime,
}

impl FixedHeadway {
    pub fn new(headway: SimDuration, until: SimTime) -> Self {
        Self { headway, until }
    }
}

impl ArrivalSource for FixedHeadway {
    fn next_interval(&mut self, now: SimTime, _rng: &mut dyn RandomSource) -> DemandResult<Option<SimDuration>> {
        if now + self.headway > self.until || self.headway.secs() <= 0.0 {
            return Ok(None);
        }
        Ok(Some(self.headway))
    }
}
