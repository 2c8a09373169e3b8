//! Simulation input configuration.

use serde::{Deserialize, Serialize};

use super::{Discipline, ProcessSpec, Ticks, BAND_COUNT};

/// Everything needed to initialize a simulation run.
///
/// Processes receive IDs `1..=n` in vector order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Submitted processes, in assignment order.
    pub processes: Vec<ProcessSpec>,
    /// Discipline per band, band 0 first.
    pub disciplines: [Discipline; BAND_COUNT],
    /// Quantum shared by every RoundRobin band.
    pub time_quantum: Ticks,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            processes: Vec::new(),
            disciplines: [Discipline::Fcfs; BAND_COUNT],
            time_quantum: 1,
        }
    }
}

impl SimulationConfig {
    /// Creates a config with the given band disciplines and no processes.
    pub fn new(disciplines: [Discipline; BAND_COUNT]) -> Self {
        Self {
            disciplines,
            ..Default::default()
        }
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, time_quantum: Ticks) -> Self {
        self.time_quantum = time_quantum;
        self
    }

    /// Appends a process.
    pub fn with_process(mut self, spec: ProcessSpec) -> Self {
        self.processes.push(spec);
        self
    }

    /// Appends several processes.
    pub fn with_processes(mut self, specs: impl IntoIterator<Item = ProcessSpec>) -> Self {
        self.processes.extend(specs);
        self
    }

    /// Whether any band runs round-robin.
    pub fn uses_round_robin(&self) -> bool {
        self.disciplines.iter().any(|d| d.is_round_robin())
    }
}
