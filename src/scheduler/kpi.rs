//! Run statistics (KPIs).
//!
//! Computes per-process and aggregate performance indicators from a
//! finished process table.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first start - arrival |
//! | Makespan | Latest completion time |
//! | CPU Utilization | busy ticks / makespan |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessId, Ticks};

/// Completion metrics of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub pid: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i32,
    pub band: usize,
    pub start_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Ticks,
}

/// Statistics snapshot of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Per-process rows in ID order.
    pub processes: Vec<ProcessStats>,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Latest completion time.
    pub makespan: Ticks,
    /// Total executed units.
    pub busy_time: Ticks,
    /// `busy_time / makespan` (0.0 for an empty makespan).
    pub cpu_utilization: f64,
}

impl SimulationStats {
    /// Computes statistics from a process table.
    ///
    /// Returns `None` while any process is unfinished. Does not mutate
    /// the processes, so it can be recomputed at any time.
    pub fn calculate(processes: &[Process]) -> Option<Self> {
        let rows = processes
            .iter()
            .map(ProcessStats::from_process)
            .collect::<Option<Vec<_>>>()?;

        let count = rows.len();
        let mean = |sum: Ticks| {
            if count == 0 {
                0.0
            } else {
                sum as f64 / count as f64
            }
        };

        let makespan = rows.iter().map(|r| r.completion_time).max().unwrap_or(0);
        let busy_time: Ticks = rows.iter().map(|r| r.burst_time).sum();
        let cpu_utilization = if makespan > 0 {
            busy_time as f64 / makespan as f64
        } else {
            0.0
        };

        Some(Self {
            avg_turnaround_time: mean(rows.iter().map(|r| r.turnaround_time).sum()),
            avg_waiting_time: mean(rows.iter().map(|r| r.waiting_time).sum()),
            avg_response_time: mean(rows.iter().map(|r| r.response_time).sum()),
            makespan,
            busy_time,
            cpu_utilization,
            processes: rows,
        })
    }

    /// Row for one process.
    pub fn process(&self, pid: ProcessId) -> Option<&ProcessStats> {
        self.processes.iter().find(|r| r.pid == pid)
    }
}

impl ProcessStats {
    fn from_process(p: &Process) -> Option<Self> {
        if !p.finished {
            return None;
        }
        let start_time = p.start_time?;
        Some(Self {
            pid: p.pid,
            arrival_time: p.arrival_time,
            burst_time: p.burst_time,
            priority: p.priority,
            band: p.band,
            start_time,
            completion_time: p.completion_time?,
            turnaround_time: p.turnaround_time?,
            waiting_time: p.waiting_time?,
            response_time: start_time - p.arrival_time,
        })
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PID\tAT\tBT\tPrio\tCT\tTAT\tWT")?;
        for r in &self.processes {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                r.pid,
                r.arrival_time,
                r.burst_time,
                r.priority,
                r.completion_time,
                r.turnaround_time,
                r.waiting_time
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Average Turnaround Time: {:.2}", self.avg_turnaround_time)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.avg_waiting_time)?;
        writeln!(f, "Average Response Time: {:.2}", self.avg_response_time)?;
        write!(
            f,
            "Makespan: {}  CPU Utilization: {:.1}%",
            self.makespan,
            self.cpu_utilization * 100.0
        )
    }
}
