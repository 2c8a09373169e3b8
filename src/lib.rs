//! Multilevel queue CPU scheduling simulator.
//!
//! Four priority bands, each bound to its own discipline (FCFS, static
//! priority, shortest-remaining-job-first or round-robin), advanced one
//! discrete time unit per tick until every process completes.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Process`, `ProcessSpec`, `Discipline`,
//!   `QueueAssignment`, `SimulationConfig`, `Timeline`
//! - **`dispatching`**: Ready-set extraction and per-discipline selection
//! - **`scheduler`**: `SchedulingEngine` state machine and `SimulationStats`
//! - **`validation`**: Configuration checks (counts, bursts, codes, quantum)
//! - **`persistence`**: Plain-text workload files
//! - **`generate`**: Seeded random workloads
//!
//! # Example
//!
//! ```
//! use mlq_sched::models::{Discipline, ProcessSpec, SimulationConfig};
//! use mlq_sched::scheduler::SchedulingEngine;
//!
//! let config = SimulationConfig::new([Discipline::RoundRobin; 4])
//!     .with_quantum(2)
//!     .with_process(ProcessSpec::new(0, 5).in_band(0))
//!     .with_process(ProcessSpec::new(0, 3).in_band(0));
//!
//! let mut engine = SchedulingEngine::initialize(config)?;
//! engine.start();
//! while !engine.is_complete() {
//!     engine.tick();
//! }
//! assert_eq!(engine.timeline().describe(), "P1[0-2] P2[2-4] P1[4-6] P2[6-7] P1[7-8]");
//! # Ok::<(), mlq_sched::SimError>(())
//! ```

pub mod dispatching;
pub mod error;
pub mod generate;
pub mod models;
pub mod persistence;
pub mod scheduler;
pub mod validation;

pub use error::{Result, SimError};
