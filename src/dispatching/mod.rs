//! Per-band process selection.
//!
//! Given one band and the current tick, extracts the ready set (arrived
//! and unfinished members) and picks the process its discipline would run
//! next. Everything here is a pure function of the process table and the
//! clock.
//!
//! # Usage
//!
//! ```
//! use mlq_sched::dispatching;
//! use mlq_sched::models::{Discipline, Process, ProcessSpec};
//!
//! let processes = vec![
//!     Process::from_spec(1, 0, &ProcessSpec::new(0, 4).with_priority(2)),
//!     Process::from_spec(2, 0, &ProcessSpec::new(0, 2).with_priority(1)),
//! ];
//! let ready: Vec<&Process> = processes.iter().collect();
//! let next = dispatching::select(Discipline::Priority, &ready);
//! assert_eq!(next.map(|p| p.pid), Some(2));
//! ```

pub mod rules;

use crate::models::{Band, Discipline, Process, ProcessId, Ticks};

/// Looks up a process by its 1-based ID.
#[inline]
pub fn lookup(processes: &[Process], pid: ProcessId) -> Option<&Process> {
    pid.checked_sub(1).and_then(|i| processes.get(i))
}

/// Members of `band` that have arrived by `now` and are not finished.
pub fn ready_set<'a>(band: &Band, processes: &'a [Process], now: Ticks) -> Vec<&'a Process> {
    band.members
        .iter()
        .filter_map(|&pid| lookup(processes, pid))
        .filter(|p| p.is_ready(now))
        .collect()
}

/// Picks the next process from a ready set using `discipline`.
pub fn select<'a>(discipline: Discipline, ready: &[&'a Process]) -> Option<&'a Process> {
    match discipline {
        Discipline::Fcfs => rules::fcfs(ready),
        Discipline::Priority => rules::priority(ready),
        Discipline::Sjf => rules::sjf(ready),
        Discipline::RoundRobin => rules::round_robin(ready),
    }
}

/// Candidate from one band at `now`, or `None` when nothing there is ready.
pub fn select_from_band(band: &Band, processes: &[Process], now: Ticks) -> Option<ProcessId> {
    let ready = ready_set(band, processes, now);
    select(band.discipline, &ready).map(|p| p.pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn table() -> Vec<Process> {
        vec![
            Process::from_spec(1, 0, &ProcessSpec::new(0, 3)),
            Process::from_spec(2, 0, &ProcessSpec::new(2, 1)),
            Process::from_spec(3, 0, &ProcessSpec::new(0, 2)),
        ]
    }

    #[test]
    fn test_lookup() {
        let t = table();
        assert_eq!(lookup(&t, 2).map(|p| p.pid), Some(2));
        assert!(lookup(&t, 0).is_none());
        assert!(lookup(&t, 4).is_none());
    }

    #[test]
    fn test_ready_set_filters_arrival_and_finished() {
        let mut t = table();
        let band = Band {
            discipline: Discipline::Fcfs,
            members: vec![1, 2, 3],
        };
        let ids: Vec<_> = ready_set(&band, &t, 1).iter().map(|p| p.pid).collect();
        assert_eq!(ids, vec![1, 3]);

        t[0].finished = true;
        let ids: Vec<_> = ready_set(&band, &t, 2).iter().map(|p| p.pid).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_select_from_band_dispatches_on_discipline() {
        let t = table();
        let mut band = Band {
            discipline: Discipline::Fcfs,
            members: vec![1, 3],
        };
        assert_eq!(select_from_band(&band, &t, 0), Some(1));
        band.discipline = Discipline::Sjf;
        assert_eq!(select_from_band(&band, &t, 0), Some(3));
    }

    #[test]
    fn test_select_from_band_nothing_arrived() {
        let t = table();
        let band = Band {
            discipline: Discipline::RoundRobin,
            members: vec![2],
        };
        assert_eq!(select_from_band(&band, &t, 1), None);
    }
}
