// src/generator/random.rs

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;
use std::collections::VecDeque;

/// The only thing the carver needs from a random generator.
pub trait RandomSource {
    /// A uniformly chosen integer in `[low, high)`. Callers guarantee `low < high`.
    fn next_in_range(&mut self, low: usize, high: usize) -> usize;
}

impl RandomSource for StdRng {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        self.random_range(low..high)
    }
}

impl RandomSource for ThreadRng {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        self.random_range(low..high)
    }
}

/// Replays a fixed list of values, for pinning down a particular walk.
///
/// Each value is folded into the requested range as `low + v % (high - low)`.
/// Once the script runs out every draw returns `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<usize>,
    draws: usize,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = usize>>(values: I) -> Self {
        ScriptedSource {
            values: values.into_iter().collect(),
            draws: 0,
        }
    }

    /// How many values have been requested so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        self.draws += 1;
        match self.values.pop_front() {
            Some(v) if high > low => low + v % (high - low),
            _ => low,
        }
    }
}
