//! Execution timeline (Gantt chart) of a run.
//!
//! Every dispatch decision opens a new slice; ticks that continue the
//! current holder extend it. Idle ticks leave gaps.

use serde::{Deserialize, Serialize};

use super::{ProcessId, Ticks};

/// One contiguous stretch of execution after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSlice {
    /// Executing process.
    pub pid: ProcessId,
    /// Band the process was dispatched from.
    pub band: usize,
    /// First tick of the slice.
    pub start: Ticks,
    /// Tick after the last executed unit.
    pub end: Ticks,
}

impl ExecutionSlice {
    /// Number of executed units in the slice.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Ordered list of execution slices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    slices: Vec<ExecutionSlice>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one executed unit at `tick`.
    ///
    /// `dispatched` starts a new slice even when `pid` already owns the
    /// last one (a round-robin re-dispatch of a lone process).
    pub fn record(&mut self, pid: ProcessId, band: usize, tick: Ticks, dispatched: bool) {
        if !dispatched {
            if let Some(last) = self.slices.last_mut() {
                if last.pid == pid && last.end == tick {
                    last.end = tick + 1;
                    return;
                }
            }
        }
        self.slices.push(ExecutionSlice {
            pid,
            band,
            start: tick,
            end: tick + 1,
        });
    }

    /// All slices in execution order.
    pub fn slices(&self) -> &[ExecutionSlice] {
        &self.slices
    }

    /// Slices belonging to one process.
    pub fn slices_for(&self, pid: ProcessId) -> Vec<&ExecutionSlice> {
        self.slices.iter().filter(|s| s.pid == pid).collect()
    }

    /// Total executed units across all slices.
    pub fn busy_time(&self) -> Ticks {
        self.slices.iter().map(ExecutionSlice::duration).sum()
    }

    /// End of the last slice (0 when empty).
    pub fn makespan(&self) -> Ticks {
        self.slices.last().map(|s| s.end).unwrap_or(0)
    }

    /// Compact `P1[0-2] P2[2-4]` rendering.
    pub fn describe(&self) -> String {
        self.slices
            .iter()
            .map(|s| format!("P{}[{}-{}]", s.pid, s.start, s.end))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Removes every slice.
    pub fn clear(&mut self) {
        self.slices.clear();
    }

    /// Whether nothing has executed.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}
