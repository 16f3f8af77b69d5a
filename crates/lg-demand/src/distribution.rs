//! Continuous distributions for vehicle dimensions and performance.
//!
//! [`DistSpec`] is the plain description (deserializable from config);
//! [`ContinuousDist`] is the validated, ready-to-sample form built on
//! `rand_distr`.  Sampling goes through the generator's opaque
//! [`RandomSource`] via [`AsRng`], so every draw stays on the generator's own
//! stream.

use rand_distr::{Distribution, Exp, LogNormal, Normal, Triangular, Uniform};
use serde::Deserialize;

use lg_core::{AsRng, RandomSource};

use crate::{DemandError, DemandResult};

/// Description of a continuous distribution.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DistSpec {
    Constant    { value: f64 },
    Uniform     { min: f64, max: f64 },
    Normal      { mean: f64, std_dev: f64 },
    Triangular  { min: f64, mode: f64, max: f64 },
    Exponential { mean: f64 },
    LogNormal   { mu: f64, sigma: f64 },
}

#[derive(Clone, Debug)]
enum Sampler {
    Constant(f64),
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
    Triangular(Triangular<f64>),
    Exponential(Exp<f64>),
    LogNormal(LogNormal<f64>),
}

/// A validated distribution.
#[derive(Clone, Debug)]
pub struct ContinuousDist {
    spec:    DistSpec,
    sampler: Sampler,
}

fn dist_err(e: impl std::fmt::Display) -> DemandError {
    DemandError::Distribution(e.to_string())
}

impl ContinuousDist {
    pub fn new(spec: DistSpec) -> DemandResult<Self> {
        let sampler = match spec {
            DistSpec::Constant { value } => {
                if !value.is_finite() {
                    return Err(dist_err(format!("constant {value} is not finite")));
                }
                Sampler::Constant(value)
            }
            DistSpec::Uniform { min, max } => {
                if !(min.is_finite() && max.is_finite() && min <= max) {
                    return Err(dist_err(format!("uniform bounds [{min}, {max}] are invalid")));
                }
                Sampler::Uniform(Uniform::new_inclusive(min, max))
            }
            DistSpec::Normal { mean, std_dev } => {
                Sampler::Normal(Normal::new(mean, std_dev).map_err(dist_err)?)
            }
            DistSpec::Triangular { min, mode, max } => {
                Sampler::Triangular(Triangular::new(min, max, mode).map_err(dist_err)?)
            }
            DistSpec::Exponential { mean } => {
                if !(mean.is_finite() && mean > 0.0) {
                    return Err(dist_err(format!("exponential mean {mean} must be positive")));
                }
                Sampler::Exponential(Exp::new(1.0 / mean).map_err(dist_err)?)
            }
            DistSpec::LogNormal { mu, sigma } => {
                Sampler::LogNormal(LogNormal::new(mu, sigma).map_err(dist_err)?)
            }
        };
        Ok(Self { spec, sampler })
    }

    /// Always `value`.
    pub fn constant(value: f64) -> Self {
        Self { spec: DistSpec::Constant { value }, sampler: Sampler::Constant(value) }
    }

    pub fn spec(&self) -> &DistSpec {
        &self.spec
    }

    /// Draw one value.  A constant consumes no randomness.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        let mut r = AsRng(rng);
        match &self.sampler {
            Sampler::Constant(v)    => *v,
            Sampler::Uniform(d)     => d.sample(&mut r),
            Sampler::Normal(d)      => d.sample(&mut r),
            Sampler::Triangular(d)  => d.sample(&mut r),
            Sampler::Exponential(d) => d.sample(&mut r),
            Sampler::LogNormal(d)   => d.sample(&mut r),
        }
    }

    /// Draw one value no smaller than `floor`.
    pub fn sample_at_least(&self, rng: &mut dyn RandomSource, floor: f64) -> f64 {
        self.sample(rng).max(floor)
    }
}

impl TryFrom<DistSpec> for ContinuousDist {
    type Error = DemandError;

    fn try_from(spec: DistSpec) -> DemandResult<Self> {
        Self::new(spec)
    }
}
