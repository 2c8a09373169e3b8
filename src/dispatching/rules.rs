//! Built-in selection rules, one per [`Discipline`](crate::models::Discipline).
//!
//! Each rule is a total order over the ready set; the minimum wins. The
//! last key of every order is the process ID, so ties resolve the same
//! way on every run.

use crate::models::Process;

/// First-come-first-served: earliest arrival, then lowest ID.
pub fn fcfs<'a>(ready: &[&'a Process]) -> Option<&'a Process> {
    ready
        .iter()
        .copied()
        .min_by_key(|p| (p.arrival_time, p.pid))
}

/// Static priority: lowest priority value, then earliest arrival, then lowest ID.
pub fn priority<'a>(ready: &[&'a Process]) -> Option<&'a Process> {
    ready
        .iter()
        .copied()
        .min_by_key(|p| (p.priority, p.arrival_time, p.pid))
}

/// Shortest job first on *remaining* work, then earliest arrival, then lowest ID.
pub fn sjf<'a>(ready: &[&'a Process]) -> Option<&'a Process> {
    ready
        .iter()
        .copied()
        .min_by_key(|p| (p.remaining_time, p.arrival_time, p.pid))
}

/// Round-robin: least recently run first, never-run before anything,
/// then earliest arrival, then lowest ID.
pub fn round_robin<'a>(ready: &[&'a Process]) -> Option<&'a Process> {
    ready
        .iter()
        .copied()
        .min_by_key(|p| (p.last_scheduled_time, p.arrival_time, p.pid))
}
