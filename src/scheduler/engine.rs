//! Tick-stepped multilevel queue engine.
//!
//! # Algorithm (one tick)
//!
//! 1. If a holder exists, is unfinished, and either runs in a non-RR band
//!    or still has quantum left, it continues without re-selection.
//! 2. Otherwise bands are scanned 0→3; the first band with a ready process
//!    supplies the holder via its discipline. RR holders get a fresh
//!    quantum. No candidate anywhere = idle tick.
//! 3. The holder executes one unit.
//! 4. Completion or quantum exhaustion clears the holder.
//! 5. The clock advances; when every process is finished the engine
//!    becomes `Completed` and computes statistics.
//!
//! The holder is stored as a `(band, pid)` pair and resolved by lookup
//! every tick, so resets and reloads can never leave it dangling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SimulationStats;
use crate::dispatching;
use crate::error::Result;
use crate::models::{
    default_band, Discipline, Process, ProcessId, QueueAssignment, SimulationConfig, Ticks,
    Timeline,
};
use crate::persistence;
use crate::validation::validate_config;

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Initialized, not started.
    Ready,
    /// Ticks advance the simulation.
    Running,
    /// Ticks are ignored until resumed.
    Paused,
    /// Every process finished; ticks are no-ops.
    Completed,
}

/// The process currently holding the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    /// Band the holder was dispatched from.
    pub band: usize,
    /// Holder's process ID.
    pub pid: ProcessId,
}

/// What a single call to [`SchedulingEngine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Engine not running (ready, paused or completed); nothing changed.
    Inactive,
    /// No process was ready; only the clock advanced.
    Idle { time: Ticks },
    /// One unit of `pid` executed at `time`.
    Executed {
        time: Ticks,
        pid: ProcessId,
        band: usize,
        /// Holder was (re)selected this tick rather than continued.
        selected: bool,
        /// This unit finished the process.
        completed: bool,
        /// Round-robin quantum ran out without finishing.
        preempted: bool,
    },
}

/// Read-only, serializable view of engine state between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub current_time: Ticks,
    pub state: EngineState,
    pub holder: Option<Holder>,
    pub processes: Vec<Process>,
    pub timeline: Timeline,
    pub statistics: Option<SimulationStats>,
}

/// Multilevel queue scheduling engine.
///
/// Owns the process table; bands hold IDs only. External drivers call
/// [`tick`](Self::tick) and read state between ticks.
///
/// # Example
///
/// ```
/// use mlq_sched::models::{Discipline, ProcessSpec, SimulationConfig};
/// use mlq_sched::scheduler::SchedulingEngine;
///
/// let config = SimulationConfig::new([Discipline::Fcfs; 4])
///     .with_process(ProcessSpec::new(0, 3))
///     .with_process(ProcessSpec::new(1, 2).in_band(0));
/// let mut engine = SchedulingEngine::initialize(config).unwrap();
/// let stats = engine.run_to_completion().unwrap();
/// assert_eq!(stats.makespan, 5);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingEngine {
    config: SimulationConfig,
    processes: Vec<Process>,
    queues: QueueAssignment,
    current_time: Ticks,
    holder: Option<Holder>,
    state: EngineState,
    timeline: Timeline,
    stats: Option<SimulationStats>,
}

impl SchedulingEngine {
    /// Validates `config` and builds a `Ready` engine.
    pub fn initialize(config: SimulationConfig) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self::build(config))
    }

    /// Loads a workload file and builds a `Ready` engine from it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::initialize(persistence::load_config(path)?)
    }

    fn build(config: SimulationConfig) -> Self {
        let processes = config
            .processes
            .iter()
            .enumerate()
            .map(|(index, spec)| Process::from_spec(index + 1, default_band(index, spec), spec))
            .collect();
        let queues =
            QueueAssignment::from_specs(&config.processes, config.disciplines, config.time_quantum);

        log::info!(
            "initialized {} processes, bands [{}], quantum {}",
            config.processes.len(),
            config
                .disciplines
                .iter()
                .map(|d| d.name())
                .collect::<Vec<_>>()
                .join(", "),
            config.time_quantum
        );

        Self {
            config,
            processes,
            queues,
            current_time: 0,
            holder: None,
            state: EngineState::Ready,
            timeline: Timeline::new(),
            stats: None,
        }
    }

    /// Replaces the whole workload. On error the current state is kept.
    pub fn reinitialize(&mut self, config: SimulationConfig) -> Result<()> {
        validate_config(&config)?;
        *self = Self::build(config);
        Ok(())
    }

    /// Replaces the workload from a file, discarding in-flight execution.
    ///
    /// On any read, parse or validation failure the engine is unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config = persistence::load_config(path)?;
        self.reinitialize(config)?;
        log::info!("loaded workload from {}", path.display());
        Ok(())
    }

    /// Writes the initial parameters of the current workload.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        persistence::save_config(path, &self.config)
    }

    /// Restores the state right after initialization.
    pub fn reset(&mut self) {
        for p in &mut self.processes {
            p.reset();
        }
        self.current_time = 0;
        self.holder = None;
        self.state = EngineState::Ready;
        self.timeline.clear();
        self.stats = None;
        log::debug!("reset to t=0");
    }

    /// `Ready` → `Running`. Ignored in any other state.
    pub fn start(&mut self) {
        if self.state == EngineState::Ready {
            self.state = EngineState::Running;
            log::info!("simulation started");
        }
    }

    /// `Running` → `Paused`.
    pub fn pause(&mut self) {
        if self.state == EngineState::Running {
            self.state = EngineState::Paused;
            log::debug!("paused at t={}", self.current_time);
        }
    }

    /// `Paused` → `Running`.
    pub fn resume(&mut self) {
        if self.state == EngineState::Paused {
            self.state = EngineState::Running;
            log::debug!("resumed at t={}", self.current_time);
        }
    }

    /// Start if ready, otherwise flip between running and paused.
    pub fn toggle(&mut self) {
        match self.state {
            EngineState::Ready => self.start(),
            EngineState::Running => self.pause(),
            EngineState::Paused => self.resume(),
            EngineState::Completed => {}
        }
    }

    /// Advances the simulation by one time unit.
    ///
    /// A no-op returning [`TickOutcome::Inactive`] unless `Running`.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != EngineState::Running {
            return TickOutcome::Inactive;
        }

        let now = self.current_time;
        let (holder, selected) = match self.continuing_holder() {
            Some(holder) => (Some(holder), false),
            None => {
                self.holder = None;
                (self.dispatch(now), true)
            }
        };

        let outcome = match holder {
            Some(holder) => self.execute(holder, now, selected),
            None => {
                log::debug!("t={now}: idle");
                TickOutcome::Idle { time: now }
            }
        };

        self.current_time += 1;

        if self.processes.iter().all(|p| p.finished) {
            self.state = EngineState::Completed;
            self.stats = SimulationStats::calculate(&self.processes);
            if let Some(stats) = &self.stats {
                log::info!(
                    "simulation completed at t={}: avg turnaround {:.2}, avg waiting {:.2}",
                    self.current_time,
                    stats.avg_turnaround_time,
                    stats.avg_waiting_time
                );
            }
        }

        outcome
    }

    /// Runs (starting or resuming as needed) until every process finishes.
    pub fn run_to_completion(&mut self) -> Option<&SimulationStats> {
        match self.state {
            EngineState::Ready => self.start(),
            EngineState::Paused => self.resume(),
            EngineState::Running | EngineState::Completed => {}
        }
        while self.state == EngineState::Running {
            self.tick();
        }
        self.stats.as_ref()
    }

    /// Holder that keeps the CPU this tick without re-selection.
    fn continuing_holder(&self) -> Option<Holder> {
        let holder = self.holder?;
        let process = dispatching::lookup(&self.processes, holder.pid)?;
        if process.finished {
            return None;
        }
        match self.queues.discipline(holder.band)? {
            Discipline::RoundRobin if process.time_slice_remaining <= 0 => None,
            _ => Some(holder),
        }
    }

    /// Picks a new holder from the highest band with a ready process.
    fn dispatch(&mut self, now: Ticks) -> Option<Holder> {
        let quantum = self.queues.time_quantum();
        let (band, pid) = self
            .queues
            .bands()
            .iter()
            .enumerate()
            .find_map(|(band, b)| {
                dispatching::select_from_band(b, &self.processes, now).map(|pid| (band, pid))
            })?;

        if self.queues.discipline(band).is_some_and(Discipline::is_round_robin) {
            if let Some(p) = self.process_mut(pid) {
                p.time_slice_remaining = quantum;
            }
        }

        log::debug!("t={now}: dispatch P{pid} from band {band}");
        let holder = Holder { band, pid };
        self.holder = Some(holder);
        Some(holder)
    }

    fn execute(&mut self, holder: Holder, now: Ticks, selected: bool) -> TickOutcome {
        let round_robin = self
            .queues
            .discipline(holder.band)
            .is_some_and(Discipline::is_round_robin);

        let Some(process) = self.process_mut(holder.pid) else {
            self.holder = None;
            return TickOutcome::Idle { time: now };
        };

        let completed = process.execute_unit(now);
        if round_robin && process.time_slice_remaining > 0 {
            process.time_slice_remaining -= 1;
        }
        let preempted = !completed && round_robin && process.time_slice_remaining <= 0;

        if completed {
            log::debug!("t={now}: P{} completed at {}", holder.pid, now + 1);
        } else if preempted {
            log::debug!("t={now}: P{} quantum expired", holder.pid);
        }
        if completed || preempted {
            self.holder = None;
        }

        self.timeline.record(holder.pid, holder.band, now, selected);

        TickOutcome::Executed {
            time: now,
            pid: holder.pid,
            band: holder.band,
            selected,
            completed,
            preempted,
        }
    }

    fn process_mut(&mut self, pid: ProcessId) -> Option<&mut Process> {
        pid.checked_sub(1).and_then(|i| self.processes.get_mut(i))
    }

    // ---------------------------------------------------------------
    // Read-only accessors
    // ---------------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether every process has finished.
    pub fn is_complete(&self) -> bool {
        self.state == EngineState::Completed
    }

    /// Next tick to be simulated.
    pub fn current_time(&self) -> Ticks {
        self.current_time
    }

    /// Process holding the CPU across ticks, if any.
    pub fn holder(&self) -> Option<Holder> {
        self.holder
    }

    /// All processes in ID order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// A process by ID.
    pub fn process(&self, pid: ProcessId) -> Option<&Process> {
        dispatching::lookup(&self.processes, pid)
    }

    /// Band layout and disciplines.
    pub fn queues(&self) -> &QueueAssignment {
        &self.queues
    }

    /// Configuration the engine was initialized with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// IDs of the processes in `band` that are ready at the current tick.
    pub fn ready_set(&self, band: usize) -> Vec<ProcessId> {
        self.queues
            .band(band)
            .map(|b| {
                dispatching::ready_set(b, &self.processes, self.current_time)
                    .iter()
                    .map(|p| p.pid)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Execution slices so far.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Statistics, available once completed.
    pub fn statistics(&self) -> Option<&SimulationStats> {
        self.stats.as_ref()
    }

    /// Owned copy of the observable state.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_time: self.current_time,
            state: self.state,
            holder: self.holder,
            processes: self.processes.clone(),
            timeline: self.timeline.clone(),
            statistics: self.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessSpec, BAND_COUNT};
    use crate::validation::ValidationErrorKind;

    fn single_band(discipline: Discipline, quantum: Ticks, specs: Vec<ProcessSpec>) -> SchedulingEngine {
        let config = SimulationConfig::new([discipline; BAND_COUNT])
            .with_quantum(quantum)
            .with_processes(specs.into_iter().map(|s| s.in_band(0)));
        SchedulingEngine::initialize(config).unwrap()
    }

    fn completion(engine: &SchedulingEngine, pid: ProcessId) -> Option<Ticks> {
        engine.process(pid).and_then(|p| p.completion_time)
    }

    #[test]
    fn test_initialize_rejects_invalid() {
        let config = SimulationConfig::new([Discipline::Fcfs; BAND_COUNT])
            .with_process(ProcessSpec::new(0, 0));
        let err = SchedulingEngine::initialize(config).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::NonPositiveBurst
        );
    }

    #[test]
    fn test_reinitialize_failure_keeps_state() {
        let mut engine = single_band(Discipline::Fcfs, 1, vec![ProcessSpec::new(0, 2)]);
        engine.start();
        engine.tick();
        let before = engine.snapshot();
        let bad = SimulationConfig::default();
        assert!(engine.reinitialize(bad).is_err());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut engine = single_band(Discipline::Fcfs, 1, vec![ProcessSpec::new(0, 1)]);
        assert_eq!(engine.tick(), TickOutcome::Inactive);
        assert_eq!(engine.current_time(), 0);
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn test_pause_resume_toggle() {
        let mut engine = single_band(Discipline::Fcfs, 1, vec![ProcessSpec::new(0, 3)]);
        engine.toggle();
        assert_eq!(engine.state(), EngineState::Running);
        engine.tick();
        engine.toggle();
        assert_eq!(engine.state(), EngineState::Paused);
        assert_eq!(engine.tick(), TickOutcome::Inactive);
        assert_eq!(engine.current_time(), 1);
        engine.resume();
        assert!(matches!(engine.tick(), TickOutcome::Executed { time: 1, pid: 1, .. }));
    }

    #[test]
    fn test_completed_tick_is_noop() {
        let mut engine = single_band(Discipline::Fcfs, 1, vec![ProcessSpec::new(0, 1)]);
        engine.start();
        let outcome = engine.tick();
        assert!(matches!(outcome, TickOutcome::Executed { completed: true, .. }));
        assert!(engine.is_complete());
        assert_eq!(engine.tick(), TickOutcome::Inactive);
        assert_eq!(engine.current_time(), 1);
        engine.toggle();
        assert!(engine.is_complete());
    }

    #[test]
    fn test_idle_ticks_advance_time() {
        let mut engine = single_band(Discipline::Fcfs, 1, vec![ProcessSpec::new(2, 1)]);
        engine.start();
        assert_eq!(engine.tick(), TickOutcome::Idle { time: 0 });
        assert_eq!(engine.tick(), TickOutcome::Idle { time: 1 });
        assert!(matches!(engine.tick(), TickOutcome::Executed { time: 2, completed: true, .. }));
        assert_eq!(completion(&engine, 1), Some(3));
        assert_eq!(engine.process(1).and_then(|p| p.waiting_time), Some(0));
    }

    #[test]
    fn test_non_preemptive_continuation() {
        // P2 has higher priority but arrives while P1 holds the CPU.
        let mut engine = single_band(
            Discipline::Priority,
            1,
            vec![
                ProcessSpec::new(0, 3).with_priority(5),
                ProcessSpec::new(1, 1).with_priority(0),
            ],
        );
        engine.run_to_completion();
        assert_eq!(completion(&engine, 1), Some(3));
        assert_eq!(completion(&engine, 2), Some(4));
    }

    #[test]
    fn test_holder_not_preempted_by_higher_band_arrival() {
        let config = SimulationConfig::new([Discipline::Fcfs; BAND_COUNT])
            .with_process(ProcessSpec::new(1, 1).in_band(0))
            .with_process(ProcessSpec::new(0, 3).in_band(2));
        let mut engine = SchedulingEngine::initialize(config).unwrap();
        engine.run_to_completion();
        assert_eq!(completion(&engine, 2), Some(3));
        assert_eq!(completion(&engine, 1), Some(4));
    }

    #[test]
    fn test_higher_band_wins_at_selection() {
        let config = SimulationConfig::new([Discipline::Fcfs; BAND_COUNT])
            .with_process(ProcessSpec::new(0, 2).in_band(3))
            .with_process(ProcessSpec::new(0, 2).in_band(1));
        let mut engine = SchedulingEngine::initialize(config).unwrap();
        engine.start();
        assert!(matches!(engine.tick(), TickOutcome::Executed { pid: 2, band: 1, selected: true, .. }));
        assert_eq!(engine.holder(), Some(Holder { band: 1, pid: 2 }));
    }

    #[test]
    fn test_round_robin_quantum_and_preemption() {
        let mut engine = single_band(
            Discipline::RoundRobin,
            2,
            vec![ProcessSpec::new(0, 3), ProcessSpec::new(0, 3)],
        );
        engine.start();
        assert!(matches!(engine.tick(), TickOutcome::Executed { pid: 1, selected: true, preempted: false, .. }));
        assert_eq!(engine.process(1).map(|p| p.time_slice_remaining), Some(1));
        assert!(matches!(engine.tick(), TickOutcome::Executed { pid: 1, selected: false, preempted: true, .. }));
        assert_eq!(engine.holder(), None);
        assert!(matches!(engine.tick(), TickOutcome::Executed { pid: 2, selected: true, .. }));
    }

    #[test]
    fn test_round_robin_lone_process_redispatched() {
        let mut engine = single_band(Discipline::RoundRobin, 1, vec![ProcessSpec::new(0, 3)]);
        engine.run_to_completion();
        assert_eq!(completion(&engine, 1), Some(3));
        assert_eq!(engine.timeline().slices_for(1).len(), 3);
    }

    #[test]
    fn test_sjf_selects_on_remaining_at_dispatch() {
        let mut engine = single_band(
            Discipline::Sjf,
            1,
            vec![ProcessSpec::new(0, 4), ProcessSpec::new(1, 1), ProcessSpec::new(0, 2)],
        );
        engine.run_to_completion();
        // P3 (2) runs 0-2, P2 (1) runs 2-3, P1 (4) runs 3-7.
        assert_eq!(completion(&engine, 3), Some(2));
        assert_eq!(completion(&engine, 2), Some(3));
        assert_eq!(completion(&engine, 1), Some(7));
    }

    #[test]
    fn test_reset_matches_fresh_engine() {
        let mut engine = single_band(
            Discipline::RoundRobin,
            2,
            vec![ProcessSpec::new(0, 5), ProcessSpec::new(1, 3)],
        );
        let fresh = engine.snapshot();
        engine.start();
        for _ in 0..4 {
            engine.tick();
        }
        engine.reset();
        assert_eq!(engine.snapshot(), fresh);
        assert_eq!(engine.state(), EngineState::Ready);

        engine.run_to_completion();
        engine.reset();
        assert_eq!(engine.snapshot(), fresh);
    }

    #[test]
    fn test_ready_set_accessor() {
        let config = SimulationConfig::new([Discipline::Fcfs; BAND_COUNT])
            .with_process(ProcessSpec::new(0, 1))
            .with_process(ProcessSpec::new(3, 1))
            .with_process(ProcessSpec::new(0, 1).in_band(1));
        let engine = SchedulingEngine::initialize(config).unwrap();
        assert_eq!(engine.ready_set(0), vec![1]);
        assert_eq!(engine.ready_set(1), vec![3]);
        assert!(engine.ready_set(4).is_empty());
    }

    #[test]
    fn test_snapshot_json() {
        let mut engine = single_band(
            Discipline::RoundRobin,
            2,
            vec![ProcessSpec::new(0, 3), ProcessSpec::new(1, 2)],
        );
        engine.run_to_completion();
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        assert!(json.contains("\"state\":\"Completed\""));
        let back: EngineSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.processes, engine.processes());
        assert_eq!(back.timeline, *engine.timeline());
    }

    #[test]
    fn test_statistics_only_after_completion() {
        let mut engine = single_band(Discipline::Fcfs, 1, vec![ProcessSpec::new(0, 2)]);
        engine.start();
        engine.tick();
        assert!(engine.statistics().is_none());
        engine.tick();
        let stats = engine.statistics().unwrap();
        assert_eq!(stats.process(1).map(|r| r.completion_time), Some(2));
    }
}
