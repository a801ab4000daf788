//! Injectable source of randomness.
//!
//! Every stochastic decision of the engine (tie-breaking among subsumers,
//! deletion sampling, roulette-wheel selection, mutation, crossover points,
//! mark differences) draws from a [`RandomSource`] passed in by the caller.
//! Any [`rand::RngCore`] is a [`RandomSource`]; [`ScriptedRandom`] replays
//! fixed sequences in tests.
use rand::{Rng, RngCore};
use std::collections::VecDeque;

/// A source of random numbers used by the learning passes.
pub trait RandomSource {
    /// Returns a sample from the uniform distribution on `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Returns a uniformly distributed integer in `0..n`.
    ///
    /// `n` must be positive.
    fn below(&mut self, n: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        self.gen_range(0..n)
    }
}

/// Replays predefined random values.
///
/// Uniform samples and integers are kept in separate queues. Once a queue is
/// exhausted its last value is repeated (`0.0` / `0` if it was empty from
/// the start). Integers are reduced modulo `n`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    uniforms: VecDeque<f64>,
    integers: VecDeque<usize>,
    last_uniform: f64,
    last_integer: usize,
}

impl ScriptedRandom {
    /// Constructs a scripted source from uniform samples and integers.
    pub fn new(uniforms: impl IntoIterator<Item = f64>, integers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
            integers: integers.into_iter().collect(),
            last_uniform: 0.0,
            last_integer: 0,
        }
    }

    /// Constructs a scripted source that only replays uniform samples.
    pub fn uniforms(uniforms: impl IntoIterator<Item = f64>) -> Self {
        Self::new(uniforms, [])
    }

    /// Number of uniform samples not consumed yet.
    pub fn remaining_uniforms(&self) -> usize {
        self.uniforms.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        if let Some(v) = self.uniforms.pop_front() {
            self.last_uniform = v;
        }
        self.last_uniform
    }

    fn below(&mut self, n: usize) -> usize {
        if let Some(v) = self.integers.pop_front() {
            self.last_integer = v;
        }
        self.last_integer % n
    }
}
