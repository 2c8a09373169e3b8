//! Seeded random workload generation.
//!
//! Produces reproducible process sets for experiments and invariant
//! tests. The same seed and profile always yield the same workload.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{ProcessSpec, Ticks};

/// Parameter ranges for generated processes (inclusive bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadProfile {
    /// Latest possible arrival tick.
    pub max_arrival: Ticks,
    /// Shortest burst.
    pub min_burst: Ticks,
    /// Longest burst.
    pub max_burst: Ticks,
    /// Priority values are drawn from `0..=max_priority`.
    pub max_priority: i32,
    /// Probability that a process is short (`min_burst..=short_burst`).
    pub p_short: f64,
    /// Upper bound of the short-burst range.
    pub short_burst: Ticks,
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self {
            max_arrival: 10,
            min_burst: 1,
            max_burst: 8,
            max_priority: 4,
            p_short: 0.3,
            short_burst: 2,
        }
    }
}

impl WorkloadProfile {
    /// Sets the arrival window.
    pub fn with_max_arrival(mut self, max_arrival: Ticks) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min_burst: Ticks, max_burst: Ticks) -> Self {
        self.min_burst = min_burst;
        self.max_burst = max_burst;
        self
    }
}

/// Generates `count` processes from `profile` using `seed`.
///
/// Bounds are clamped so every process has arrival >= 0 and burst >= 1.
pub fn random_workload(count: usize, profile: &WorkloadProfile, seed: u64) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);

    let max_arrival = profile.max_arrival.max(0);
    let min_burst = profile.min_burst.max(1);
    let max_burst = profile.max_burst.max(min_burst);
    let short_burst = profile.short_burst.clamp(min_burst, max_burst);
    let max_priority = profile.max_priority.max(0);

    (0..count)
        .map(|_| {
            let arrival = rng.random_range(0..=max_arrival);
            let burst = if rng.random::<f64>() < profile.p_short {
                rng.random_range(min_burst..=short_burst)
            } else {
                rng.random_range(min_burst..=max_burst)
            };
            let priority = rng.random_range(0..=max_priority);
            ProcessSpec::new(arrival, burst).with_priority(priority)
        })
        .collect()
}
