//! Process (workload item) model.
//!
//! A process is one schedulable unit: its static parameters (arrival,
//! burst, priority) plus the runtime progress the engine records while
//! simulating it.
//!
//! # Time Representation
//! All times are discrete ticks relative to the simulation start (t=0).

use serde::{Deserialize, Serialize};

/// Discrete simulation time unit.
pub type Ticks = i64;

/// Stable 1-based process identifier (assignment order).
pub type ProcessId = usize;

/// Input parameters for one process.
///
/// This is what a configuration or workload file supplies. The engine
/// turns each spec into a [`Process`] at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Tick at which the process becomes eligible (>= 0).
    pub arrival_time: Ticks,
    /// Total execution units required (> 0).
    pub burst_time: Ticks,
    /// Static priority (lower = more important). Only the Priority
    /// discipline reads it.
    pub priority: i32,
    /// Band override. `None` = interleaved layout (`index mod 4`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<usize>,
}

impl ProcessSpec {
    /// Creates a spec with priority 0 and the default band layout.
    pub fn new(arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority: 0,
            band: None,
        }
    }

    /// Sets the static priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Pins the process to a specific band.
    pub fn in_band(mut self, band: usize) -> Self {
        self.band = Some(band);
        self
    }
}

/// A process together with its runtime progress.
///
/// Fields marked "post-completion" are `None` until the process finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Stable identifier, 1-based.
    pub pid: ProcessId,
    /// Arrival tick.
    pub arrival_time: Ticks,
    /// Total required execution units.
    pub burst_time: Ticks,
    /// Static priority (lower = more important).
    pub priority: i32,
    /// Band this process belongs to (0 = highest priority).
    pub band: usize,
    /// Units still needed. Always within `0..=burst_time`.
    pub remaining_time: Ticks,
    /// Whether the process has executed at least once.
    pub started: bool,
    /// Whether `remaining_time` reached zero.
    pub finished: bool,
    /// Tick of the first executed unit.
    pub start_time: Option<Ticks>,
    /// Tick after the last executed unit (post-completion).
    pub completion_time: Option<Ticks>,
    /// `completion_time - arrival_time` (post-completion).
    pub turnaround_time: Option<Ticks>,
    /// `turnaround_time - burst_time` (post-completion).
    pub waiting_time: Option<Ticks>,
    /// Tick at which the process last ran. `None` sorts before any real tick.
    pub last_scheduled_time: Option<Ticks>,
    /// Round-robin quantum counter while holding the CPU in a RoundRobin band.
    pub time_slice_remaining: Ticks,
}

impl Process {
    /// Creates a fresh, never-run process from its spec.
    pub fn from_spec(pid: ProcessId, band: usize, spec: &ProcessSpec) -> Self {
        Self {
            pid,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            band,
            remaining_time: spec.burst_time,
            started: false,
            finished: false,
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            last_scheduled_time: None,
            time_slice_remaining: 0,
        }
    }

    /// Restores the initial runtime state in place.
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.started = false;
        self.finished = false;
        self.start_time = None;
        self.completion_time = None;
        self.turnaround_time = None;
        self.waiting_time = None;
        self.last_scheduled_time = None;
        self.time_slice_remaining = 0;
    }

    /// Whether the process can be selected at `now`.
    #[inline]
    pub fn is_ready(&self, now: Ticks) -> bool {
        self.arrival_time <= now && !self.finished
    }

    /// Units already executed.
    #[inline]
    pub fn executed_time(&self) -> Ticks {
        self.burst_time - self.remaining_time
    }

    /// Executes one unit at tick `now`.
    ///
    /// Returns `true` when this unit finished the process; completion
    /// metrics are filled in at that point.
    pub(crate) fn execute_unit(&mut self, now: Ticks) -> bool {
        if !self.started {
            self.started = true;
            self.start_time = Some(now);
        }
        self.last_scheduled_time = Some(now);
        self.remaining_time -= 1;

        if self.remaining_time > 0 {
            return false;
        }

        let completion = now + 1;
        let turnaround = completion - self.arrival_time;
        self.remaining_time = 0;
        self.finished = true;
        self.completion_time = Some(completion);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = ProcessSpec::new(3, 7).with_priority(2).in_band(1);
        assert_eq!(spec.arrival_time, 3);
        assert_eq!(spec.burst_time, 7);
        assert_eq!(spec.priority, 2);
        assert_eq!(spec.band, Some(1));
    }

    #[test]
    fn test_from_spec_is_fresh() {
        let p = Process::from_spec(1, 0, &ProcessSpec::new(0, 4));
        assert_eq!(p.remaining_time, 4);
        assert!(!p.started);
        assert!(!p.finished);
        assert_eq!(p.last_scheduled_time, None);
        assert_eq!(p.completion_time, None);
    }

    #[test]
    fn test_ready_on_arrival_tick() {
        let p = Process::from_spec(1, 0, &ProcessSpec::new(2, 1));
        assert!(!p.is_ready(1));
        assert!(p.is_ready(2));
    }

    #[test]
    fn test_execute_until_completion() {
        let mut p = Process::from_spec(1, 0, &ProcessSpec::new(1, 2));
        assert!(!p.execute_unit(3));
        assert_eq!(p.start_time, Some(3));
        assert_eq!(p.executed_time(), 1);
        assert!(p.execute_unit(5));
        assert!(p.finished);
        assert_eq!(p.completion_time, Some(6));
        assert_eq!(p.turnaround_time, Some(5));
        assert_eq!(p.waiting_time, Some(3));
        assert_eq!(p.last_scheduled_time, Some(5));
        assert!(!p.is_ready(10));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let fresh = Process::from_spec(2, 1, &ProcessSpec::new(0, 3).with_priority(4));
        let mut p = fresh.clone();
        p.execute_unit(0);
        p.time_slice_remaining = 2;
        p.reset();
        assert_eq!(p, fresh);
    }
}
