//! Deterministic random sources for generation.
//!
//! # Determinism strategy
//!
//! Every generator and platoon scheduler owns one independent stream seeded
//! by:
//!
//!   seed = global_seed XOR (stream * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio, so
//! consecutive stream numbers land far apart in seed space.  Adding a
//! generator at the end of a scenario leaves the draws of existing ones
//! untouched.
//!
//! # Opaque sources
//!
//! Generation logic only ever asks for "a uniform number in [0, 1)".  That
//! question is the [`RandomSource`] trait, implemented by [`StreamRng`] for
//! production and by [`ScriptedSource`] for tests that need to pin every
//! draw.  [`AsRng`] adapts any source into a `rand::RngCore` so `rand_distr`
//! distributions can sample from it.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// 2^53, the number of distinct `f64` values rand draws in [0, 1).
const F64_STEPS: f64 = (1u64 << 53) as f64;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

// ── StreamRng ─────────────────────────────────────────────────────────────────

/// Seeded stream owned by a single generator or platoon scheduler.
pub struct StreamRng(SmallRng);

impl StreamRng {
    /// Seed deterministically from the run's global seed and a stream number.
    pub fn new(global_seed: u64, stream: u64) -> Self {
        let seed = global_seed ^ stream.wrapping_mul(MIXING_CONSTANT);
        StreamRng(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for StreamRng {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

/// Replays a fixed list of uniforms, cycling when exhausted.
///
/// An empty script yields `0.0` forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), cursor: 0 }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let u = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        u
    }
}

// ── AsRng ─────────────────────────────────────────────────────────────────────

/// Adapter presenting a [`RandomSource`] as a `rand::RngCore`.
///
/// `next_u64` places the uniform in the top 53 bits, which is exactly what
/// rand's `Standard` `f64` conversion reads back, so `AsRng(src).gen::<f64>()`
/// returns the source's own uniform.
pub struct AsRng<'a, S: RandomSource + ?Sized>(pub &'a mut S);

impl<S: RandomSource + ?Sized> RngCore for AsRng<'_, S> {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let u = self.0.next_uniform().clamp(0.0, 1.0);
        let steps = ((u * F64_STEPS) as u64).min((1u64 << 53) - 1);
        steps << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
