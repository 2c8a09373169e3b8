//! Crate error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ProcessId;
use crate::validation::ValidationError;

/// Errors surfaced by initialization, loading and saving.
///
/// None of these are fatal: the engine keeps its previous state and the
/// caller may retry with corrected input.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected end of input while reading {field}")]
    Truncated { field: String },

    #[error("invalid number {token:?} for {field}")]
    InvalidNumber { field: String, token: String },

    #[error("process P{pid} is pinned to band {band}, which the workload file format cannot express")]
    UnrepresentableLayout { pid: ProcessId, band: usize },
}

impl SimError {
    /// Validation errors carried by an `InvalidConfig`, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SimError::InvalidConfig(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimError::InvalidConfig(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenient Result type
pub type Result<T> = std::result::Result<T, SimError>;
