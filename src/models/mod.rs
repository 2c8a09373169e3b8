//! Simulation domain models.
//!
//! Core data types for a multilevel queue run: the processes, the band
//! layout with its disciplines, the input configuration, and the
//! execution timeline a run produces.
//!
//! | Type | Role |
//! |------|------|
//! | `ProcessSpec` | Input record (arrival, burst, priority) |
//! | `Process` | Runtime record mutated by the engine |
//! | `QueueAssignment` | Fixed partition into four bands |
//! | `Discipline` | Per-band selection policy |
//! | `Timeline` | Dispatch-by-dispatch execution trace |

mod config;
mod discipline;
mod process;
mod queue;
mod timeline;

pub use config::SimulationConfig;
pub use discipline::Discipline;
pub use process::{Process, ProcessId, ProcessSpec, Ticks};
pub use queue::{default_band, Band, QueueAssignment, BAND_COUNT};
pub use timeline::{ExecutionSlice, Timeline};
