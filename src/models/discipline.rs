//! Per-band scheduling disciplines.
//!
//! Numeric codes and display names are serialization details; inside the
//! crate a band's discipline is always the [`Discipline`] enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheduling discipline bound to one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    /// First-come-first-served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Static priority (lower value runs first).
    #[serde(rename = "Priority")]
    Priority,
    /// Shortest remaining job first.
    #[serde(rename = "SJF")]
    Sjf,
    /// Round-robin with the global time quantum.
    #[serde(rename = "RoundRobin")]
    RoundRobin,
}

impl Discipline {
    /// All disciplines in code order.
    pub const ALL: [Discipline; 4] = [
        Discipline::Fcfs,
        Discipline::Priority,
        Discipline::Sjf,
        Discipline::RoundRobin,
    ];

    /// File-format code (0=FCFS, 1=Priority, 2=SJF, 3=RoundRobin).
    pub fn code(self) -> i64 {
        match self {
            Discipline::Fcfs => 0,
            Discipline::Priority => 1,
            Discipline::Sjf => 2,
            Discipline::RoundRobin => 3,
        }
    }

    /// Decodes a file-format code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Discipline::Fcfs),
            1 => Some(Discipline::Priority),
            2 => Some(Discipline::Sjf),
            3 => Some(Discipline::RoundRobin),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Discipline::Fcfs => "FCFS",
            Discipline::Priority => "Priority",
            Discipline::Sjf => "SJF",
            Discipline::RoundRobin => "Round Robin",
        }
    }

    /// Whether the band preempts on quantum expiry.
    #[inline]
    pub fn is_round_robin(self) -> bool {
        matches!(self, Discipline::RoundRobin)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Discipline {
    type Err = String;

    /// Accepts a numeric code or a case-insensitive name (`rr`, `round-robin`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Discipline::from_code(code)
                .ok_or_else(|| format!("unknown discipline code {code}"));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Discipline::Fcfs),
            "priority" | "prio" => Ok(Discipline::Priority),
            "sjf" => Ok(Discipline::Sjf),
            "rr" | "round robin" | "round-robin" | "roundrobin" => Ok(Discipline::RoundRobin),
            other => Err(format!("unknown discipline '{other}'")),
        }
    }
}
