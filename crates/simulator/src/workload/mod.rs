//! Initial data generation.
//!
//! Produces one sequence per rank, each `elements_per_process` long.

use crate::config::DataMode;
use oddeven_core::Value;
use rand::distributions::{Distribution, Uniform};
use std::ops::RangeInclusive;

/// Trait for generating per-process data.
pub trait DataGenerator {
    /// Generate one sequence per process.
    fn generate(
        &mut self,
        num_processes: u32,
        elements_per_process: usize,
        rng: &mut impl rand::Rng,
    ) -> Vec<Vec<Value>>;
}

/// Uniform random values.
#[derive(Debug, Clone)]
pub struct RandomData {
    range: RangeInclusive<Value>,
}

impl RandomData {
    /// Draw values uniformly from `range`.
    pub fn new(range: RangeInclusive<Value>) -> Self {
        Self { range }
    }
}

impl DataGenerator for RandomData {
    fn generate(
        &mut self,
        num_processes: u32,
        elements_per_process: usize,
        rng: &mut impl rand::Rng,
    ) -> Vec<Vec<Value>> {
        let dist = Uniform::from(self.range.clone());
        (0..num_processes)
            .map(|_| {
                (0..elements_per_process)
                    .map(|_| dist.sample(rng))
                    .collect()
            })
            .collect()
    }
}

/// Deterministic data in strictly descending order: value `i` of rank `r`
/// is `-(r * K + i)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendingData;

impl DataGenerator for DescendingData {
    fn generate(
        &mut self,
        num_processes: u32,
        elements_per_process: usize,
        _rng: &mut impl rand::Rng,
    ) -> Vec<Vec<Value>> {
        (0..num_processes as usize)
            .map(|rank| {
                (0..elements_per_process)
                    .map(|i| -((rank * elements_per_process + i) as Value))
                    .collect()
            })
            .collect()
    }
}

impl DataMode {
    /// Generate data according to this mode.
    pub fn generate(
        self,
        num_processes: u32,
        elements_per_process: usize,
        value_range: RangeInclusive<Value>,
        rng: &mut impl rand::Rng,
    ) -> Vec<Vec<Value>> {
        match self {
            DataMode::Random => {
                RandomData::new(value_range).generate(num_processes, elements_per_process, rng)
            }
            DataMode::Descending => {
                DescendingData.generate(num_processes, elements_per_process, rng)
            }
        }
    }
}
