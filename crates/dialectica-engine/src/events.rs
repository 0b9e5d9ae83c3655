//! Risk and paradox event detection.
//!
//! Events are immutable records appended to per-run logs as they are
//! detected; the logs are never pruned while the run lives.  Export
//! surfaces take the capped tail (see [`crate::AUDIT_LOG_CAP`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SystemConfig;
use crate::history::StepRecord;
use crate::stage::Stage;

/// Severity of a risk event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Critical,
}

/// Emitted whenever the risk index crosses the warning threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEvent {
    pub step: u32,
    pub risk_index: f64,
    pub tension: f64,
    pub state: f64,
    pub negation: f64,
    pub paradox_score: f64,
    pub stage: Stage,
    pub severity: Severity,
}

/// The three deceptive-stability signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParadoxKind {
    /// Both poles beyond the simultaneous-extremity threshold.
    SimultaneousExtremity,
    /// The step classified as τ₇ — apparent calm over extreme values.
    FalseStability,
    /// Paradox score beyond the meta-paradox threshold.
    MetaParadox,
}

impl ParadoxKind {
    pub fn label(self) -> &'static str {
        match self {
            ParadoxKind::SimultaneousExtremity => "SIMULTANEOUS_EXTREMITY",
            ParadoxKind::FalseStability => "FALSE_STABILITY",
            ParadoxKind::MetaParadox => "META_PARADOX",
        }
    }
}

/// Emitted when one of the paradox signatures fires.  The three kinds
/// trigger independently; a single step can emit all of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParadoxEvent {
    pub step: u32,
    pub kind: ParadoxKind,
    pub state: f64,
    pub negation: f64,
    pub paradox_score: f64,
    pub stage: Stage,
}

/// Check the freshly-computed step record against the risk warning
/// threshold.
pub fn detect_risk_event(record: &StepRecord, config: &SystemConfig) -> Option<RiskEvent> {
    let th = &config.thresholds;
    if record.risk_index <= th.risk_warning {
        return None;
    }

    let severity = if record.risk_index > th.risk_critical {
        Severity::Critical
    } else {
        Severity::High
    };

    debug!(
        step = record.step,
        risk_index = record.risk_index,
        ?severity,
        "risk warning threshold crossed"
    );

    Some(RiskEvent {
        step: record.step,
        risk_index: record.risk_index,
        tension: record.tension,
        state: record.state,
        negation: record.negation,
        paradox_score: record.paradox_score,
        stage: record.stage,
        severity,
    })
}

/// Check the step record for the three paradox signatures.
pub fn detect_paradox_events(record: &StepRecord, config: &SystemConfig) -> Vec<ParadoxEvent> {
    let th = &config.thresholds;
    let mut events = Vec::new();

    let mut emit = |kind: ParadoxKind| {
        debug!(step = record.step, kind = kind.label(), "paradox signature detected");
        events.push(ParadoxEvent {
            step: record.step,
            kind,
            state: record.state,
            negation: record.negation,
            paradox_score: record.paradox_score,
            stage: record.stage,
        });
    };

    if record.state.abs() > th.stage_paradox_pole && record.negation.abs() > th.stage_paradox_pole {
        emit(ParadoxKind::SimultaneousExtremity);
    }
    if record.stage == Stage::FalseStability {
        emit(ParadoxKind::FalseStability);
    }
    if record.paradox_score > th.meta_paradox_event {
        emit(ParadoxKind::MetaParadox);
    }

    events
}
