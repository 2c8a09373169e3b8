//! Multilevel queue engine and run statistics.
//!
//! # Engine
//!
//! `SchedulingEngine` is a tick-stepped state machine over four fixed
//! bands. Band 0 wins every selection; within a band the discipline picks.
//! FCFS, Priority and SJF holders run to completion once selected;
//! Round Robin holders yield when their quantum expires.
//!
//! # KPI
//!
//! `SimulationStats` derives turnaround, waiting and response times per
//! process, their averages, makespan and CPU utilization.

mod engine;
mod kpi;

pub use engine::{EngineSnapshot, EngineState, Holder, SchedulingEngine, TickOutcome};
pub use kpi::{ProcessStats, SimulationStats};
