//! Append-only simulation history.
//!
//! The live run keeps the *full* step log — trend fits, persistence
//! windows, and the end-of-run diagnosis all read windowed slices of it.
//! Export and audit surfaces instead consume [`HistoryStore::audit_log`],
//! which is capped at [`AUDIT_LOG_CAP`] records so long-running callers
//! never ship unbounded payloads.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::phase::Phase;
use crate::stage::Stage;

/// Maximum number of records exposed on export/audit surfaces.
pub const AUDIT_LOG_CAP: usize = 100;

/// One step's full tuple.  The ordered sequence of these records is the
/// authoritative history of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u32,
    /// Primary pole `A`.
    pub state: f64,
    /// Dialectical negation `¬A`.
    pub negation: f64,
    pub tension: f64,
    /// XEPTQLRI composite risk index.
    pub risk_index: f64,
    pub paradox_score: f64,
    pub stage: Stage,
    pub phase: Phase,
}

/// Ordered, append-only log of [`StepRecord`]s for one run.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<StepRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, rejecting non-finite scalars.
    ///
    /// Every stored quantity is clamped upstream, so a NaN or infinity
    /// here indicates an engine defect and fails the step rather than
    /// poisoning downstream statistics.
    pub fn push(&mut self, record: StepRecord) -> Result<(), EngineError> {
        for (quantity, value) in [
            ("state", record.state),
            ("negation", record.negation),
            ("tension", record.tension),
            ("risk index", record.risk_index),
            ("paradox score", record.paradox_score),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFinite { step: record.step, quantity });
            }
        }
        self.records.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full record log, oldest first.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }

    /// The most recent `k` records (fewer if the run is younger than `k`).
    pub fn recent(&self, k: usize) -> &[StepRecord] {
        let n = self.records.len();
        &self.records[n.saturating_sub(k)..]
    }

    /// Mean of the last `k` state values; `0.0` with no history.
    pub fn mean_recent_state(&self, k: usize) -> f64 {
        let recent = self.recent(k);
        if recent.is_empty() {
            return 0.0;
        }
        recent.iter().map(|r| r.state).sum::<f64>() / recent.len() as f64
    }

    /// Capped view for export/audit interfaces: the most recent
    /// [`AUDIT_LOG_CAP`] records.
    pub fn audit_log(&self) -> &[StepRecord] {
        self.recent(AUDIT_LOG_CAP)
    }
}
