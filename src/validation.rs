//! Input validation for simulation configurations.
//!
//! Checks a [`SimulationConfig`] before the engine accepts it. Detects:
//! - Empty workloads
//! - Negative arrival times and non-positive burst times
//! - Band pins outside the four bands
//! - Quanta that cannot drive a round-robin band
//!
//! Raw discipline codes (as read from a workload file) are checked by
//! [`validate_band_codes`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Discipline, SimulationConfig, BAND_COUNT};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No processes were supplied (or a non-positive count was declared).
    EmptyWorkload,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs zero or negative execution units.
    NonPositiveBurst,
    /// A band discipline code is not 0..3.
    UnknownDiscipline,
    /// Fewer than four band discipline codes were supplied.
    MissingBandCodes,
    /// The quantum cannot drive the configured bands.
    InvalidQuantum,
    /// A process is pinned to a band that does not exist.
    InvalidBand,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a simulation configuration.
///
/// Checks:
/// 1. At least one process
/// 2. Every arrival time is >= 0
/// 3. Every burst time is > 0
/// 4. Every band pin is < 4
/// 5. The quantum is >= 0, and > 0 when any band is RoundRobin
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Workload contains no processes",
        ));
    }

    for (index, spec) in config.processes.iter().enumerate() {
        let pid = index + 1;
        if spec.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process P{pid} has negative arrival time {}", spec.arrival_time),
            ));
        }
        if spec.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process P{pid} has non-positive burst time {}", spec.burst_time),
            ));
        }
        if let Some(band) = spec.band {
            if band >= BAND_COUNT {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidBand,
                    format!("Process P{pid} is pinned to band {band}, only 0..{BAND_COUNT} exist"),
                ));
            }
        }
    }

    if config.time_quantum < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Time quantum {} is negative", config.time_quantum),
        ));
    } else if config.time_quantum == 0 && config.uses_round_robin() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            "Time quantum must be positive when a band uses Round Robin",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Decodes four band discipline codes.
///
/// Reports every unknown code, and a missing-codes error when fewer
/// than four are given. Codes beyond the fourth are ignored.
pub fn validate_band_codes(codes: &[i64]) -> Result<[Discipline; BAND_COUNT], Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut disciplines = [Discipline::Fcfs; BAND_COUNT];

    if codes.len() < BAND_COUNT {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingBandCodes,
            format!(
                "Expected {BAND_COUNT} band discipline codes, found {}",
                codes.len()
            ),
        ));
    }

    for (band, &code) in codes.iter().take(BAND_COUNT).enumerate() {
        match Discipline::from_code(code) {
            Some(d) => disciplines[band] = d,
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDiscipline,
                format!("Band {band} has unknown discipline code {code} (expected 0..3)"),
            )),
        }
    }

    if errors.is_empty() {
        Ok(disciplines)
    } else {
        Err(errors)
    }
}
