//! Multilevel queue layout.
//!
//! Four bands in strict priority order. Each band holds process IDs (the
//! engine owns the processes) and the discipline that orders them.
//! Membership is fixed for the lifetime of a run.

use serde::{Deserialize, Serialize};

use super::{Discipline, ProcessId, ProcessSpec, Ticks};

/// Number of bands in the multilevel queue.
pub const BAND_COUNT: usize = 4;

/// One priority band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Discipline used to pick among this band's ready processes.
    pub discipline: Discipline,
    /// Member process IDs in assignment order.
    pub members: Vec<ProcessId>,
}

/// Fixed partition of all processes into [`BAND_COUNT`] bands.
///
/// Band 0 preempts bands 1..3 at every selection point, band 1 preempts
/// 2..3, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueAssignment {
    bands: [Band; BAND_COUNT],
    time_quantum: Ticks,
}

/// Band a process lands in: its pinned band, else `index mod 4`.
#[inline]
pub fn default_band(index: usize, spec: &ProcessSpec) -> usize {
    spec.band.unwrap_or(index % BAND_COUNT)
}

impl QueueAssignment {
    /// Builds the layout for validated specs. IDs are `index + 1`.
    ///
    /// Callers must have rejected out-of-range band pins beforehand
    /// (see [`crate::validation::validate_config`]).
    pub(crate) fn from_specs(
        specs: &[ProcessSpec],
        disciplines: [Discipline; BAND_COUNT],
        time_quantum: Ticks,
    ) -> Self {
        let mut bands = disciplines.map(|discipline| Band {
            discipline,
            members: Vec::new(),
        });
        for (index, spec) in specs.iter().enumerate() {
            bands[default_band(index, spec)].members.push(index + 1);
        }
        Self {
            bands,
            time_quantum,
        }
    }

    /// All bands, highest priority first.
    pub fn bands(&self) -> &[Band; BAND_COUNT] {
        &self.bands
    }

    /// A single band.
    pub fn band(&self, index: usize) -> Option<&Band> {
        self.bands.get(index)
    }

    /// Discipline of a band.
    pub fn discipline(&self, index: usize) -> Option<Discipline> {
        self.bands.get(index).map(|b| b.discipline)
    }

    /// Disciplines in band order.
    pub fn disciplines(&self) -> [Discipline; BAND_COUNT] {
        self.bands.each_ref().map(|b| b.discipline)
    }

    /// Global round-robin quantum.
    pub fn time_quantum(&self) -> Ticks {
        self.time_quantum
    }

    /// Band that contains `pid`.
    pub fn band_of(&self, pid: ProcessId) -> Option<usize> {
        self.bands.iter().position(|b| b.members.contains(&pid))
    }

    /// Total number of member processes.
    pub fn len(&self) -> usize {
        self.bands.iter().map(|b| b.members.len()).sum()
    }

    /// Whether no band has members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
