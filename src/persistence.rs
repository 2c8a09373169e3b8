//! Plain-text workload files.
//!
//! # Format
//!
//! Whitespace/newline separated integers:
//!
//! ```text
//! <process_count>
//! <time_quantum>
//! <arrival_time> <burst_time> <priority>     (process_count lines)
//! <band0_code> <band1_code> <band2_code> <band3_code>
//! ```
//!
//! Codes: 0=FCFS, 1=Priority, 2=SJF, 3=Round Robin. Process IDs follow
//! file order and bands follow `index mod 4`.
//!
//! Loading is all-or-nothing: a config is returned only when the whole
//! file parses and validates.

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use crate::error::{Result, SimError};
use crate::models::{default_band, ProcessSpec, SimulationConfig, BAND_COUNT};
use crate::validation::{
    validate_band_codes, validate_config, ValidationError, ValidationErrorKind,
};

/// Reads and validates a workload file.
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulationConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Writes a workload file.
///
/// Fails with [`SimError::UnrepresentableLayout`] when a process is pinned
/// to a band other than its interleaved default.
pub fn save_config(path: impl AsRef<Path>, config: &SimulationConfig) -> Result<()> {
    let path = path.as_ref();
    let text = render_config(config)?;
    fs::write(path, text).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("saved {} processes to {}", config.processes.len(), path.display());
    Ok(())
}

/// Parses workload text into a validated config.
pub fn parse_config(text: &str) -> Result<SimulationConfig> {
    let mut fields = Fields::new(text);

    let count: i64 = fields.number("process count")?;
    if count <= 0 {
        return Err(SimError::InvalidConfig(vec![ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            format!("Declared process count {count} must be positive"),
        )]));
    }
    let time_quantum = fields.number("time quantum")?;

    let mut processes = Vec::new();
    for pid in 1..=count {
        let arrival_time = fields.number(&format!("arrival time of P{pid}"))?;
        let burst_time = fields.number(&format!("burst time of P{pid}"))?;
        let priority = fields.number(&format!("priority of P{pid}"))?;
        processes.push(ProcessSpec {
            arrival_time,
            burst_time,
            priority,
            band: None,
        });
    }

    let mut codes: Vec<i64> = Vec::with_capacity(BAND_COUNT);
    for band in 0..BAND_COUNT {
        match fields.optional_number(&format!("discipline code of band {band}"))? {
            Some(code) => codes.push(code),
            None => break,
        }
    }
    let disciplines = validate_band_codes(&codes)?;

    let trailing = fields.remaining();
    if trailing > 0 {
        log::warn!("ignoring {trailing} trailing fields in workload file");
    }

    let config = SimulationConfig {
        processes,
        disciplines,
        time_quantum,
    };
    validate_config(&config)?;
    Ok(config)
}

/// Renders a config in the workload file format.
pub fn render_config(config: &SimulationConfig) -> Result<String> {
    for (index, spec) in config.processes.iter().enumerate() {
        if let Some(band) = spec.band {
            if band != index % BAND_COUNT {
                return Err(SimError::UnrepresentableLayout {
                    pid: index + 1,
                    band: default_band(index, spec),
                });
            }
        }
    }

    let mut out = format!("{}\n{}\n", config.processes.len(), config.time_quantum);
    for spec in &config.processes {
        out.push_str(&format!(
            "{} {} {}\n",
            spec.arrival_time, spec.burst_time, spec.priority
        ));
    }
    let codes = config
        .disciplines
        .iter()
        .map(|d| d.code().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&codes);
    out.push('\n');
    Ok(out)
}

/// Token cursor over workload text.
struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
        }
    }

    fn optional_number<T: std::str::FromStr>(&mut self, field: &str) -> Result<Option<T>> {
        let Some(token) = self.tokens.next() else {
            return Ok(None);
        };
        token
            .parse()
            .map(Some)
            .map_err(|_| SimError::InvalidNumber {
                field: field.to_string(),
                token: token.to_string(),
            })
    }

    fn number<T: std::str::FromStr>(&mut self, field: &str) -> Result<T> {
        self.optional_number(field)?
            .ok_or_else(|| SimError::Truncated {
                field: field.to_string(),
            })
    }

    fn remaining(self) -> usize {
        self.tokens.count()
    }
}
