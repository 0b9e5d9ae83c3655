//! The aggregate run report.
//!
//! A [`Report`] is computed on demand from the run's full history and
//! event logs and never mutated afterwards.  Serialization via serde is
//! the JSON contract the excluded presentation layers consume.

use serde::Serialize;

use dialectica_engine::{DialecticalSystem, ParadoxKind, Phase, Stage};

use crate::diagnosis::{stability_deception, true_system_state, TrueSystemState};
use crate::recommend::recommendations;

/// Identity block for the reported run.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub name: String,
    /// Deterministic 8-hex id — identical configurations report the same id.
    pub id: String,
    pub total_steps: u32,
    pub horizon: u32,
    pub aufhebung_threshold: f64,
}

/// Summary statistics over the full run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Metrics {
    pub mean_xeptqlri: f64,
    pub max_xeptqlri: f64,
    pub min_xeptqlri: f64,
    pub std_xeptqlri: f64,
    pub final_xeptqlri: f64,
    pub mean_tension: f64,
    pub max_tension: f64,
    pub mean_paradox_score: f64,
    pub max_paradox_score: f64,
    /// See [`crate::diagnosis::stability_deception`].
    pub stability_deception: f64,
    /// Fraction of all steps with `|A|` beyond the extremity threshold.
    pub permanent_transcendence_score: f64,
    /// Fraction of all steps with both poles beyond the extremity threshold.
    pub simultaneous_extremity_score: f64,
}

/// The last recorded step, echoed for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentState {
    pub stage: Stage,
    pub stage_index: u8,
    pub stage_name: &'static str,
    pub state: f64,
    pub negation: f64,
    pub paradox_score: f64,
    pub phase: Phase,
    pub phase_name: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageCount {
    pub index: u8,
    pub name: &'static str,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PhaseCount {
    pub index: usize,
    pub name: &'static str,
    pub count: u32,
}

/// Step counts banded by risk level.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RiskLevels {
    /// XEPTQLRI < 0.5
    pub low: u32,
    /// 0.5 ≤ XEPTQLRI < 1.0
    pub medium: u32,
    /// 1.0 ≤ XEPTQLRI < 2.0
    pub high: u32,
    /// XEPTQLRI ≥ 2.0
    pub extreme: u32,
}

/// Frequency distributions over the full run.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    /// One entry per stage τ₀…τ₉, zero counts included.
    pub stages: Vec<StageCount>,
    /// One entry per phase, zero counts included.
    pub phases: Vec<PhaseCount>,
    pub risk_levels: RiskLevels,
}

/// Paradox event totals and persistence.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParadoxAnalysis {
    pub total_paradox_events: usize,
    pub simultaneous_extremity_events: usize,
    pub false_stability_events: usize,
    pub meta_paradox_events: usize,
    /// Fraction of all steps with paradox score > 0.7.
    pub paradox_persistence: f64,
}

/// Read-only aggregate snapshot of a run.
///
/// `metrics` and `current_state` are `None` for a run with zero steps —
/// the explicit no-data form, never a malformed report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub system_info: SystemInfo,
    pub metrics: Option<Metrics>,
    pub current_state: Option<CurrentState>,
    pub distribution: Distribution,
    pub paradox_analysis: ParadoxAnalysis,
    pub risk_event_count: usize,
    pub true_system_state: TrueSystemState,
    pub recommendations: Vec<String>,
}

impl Report {
    /// Build the report from a run's history and event logs.
    pub fn from_system(system: &DialecticalSystem) -> Report {
        let config = system.config();
        let history = system.history();
        let records = history.records();

        let system_info = SystemInfo {
            name: config.name.clone(),
            id: config.system_id(),
            total_steps: system.steps_taken(),
            horizon: config.horizon,
            aufhebung_threshold: config.aufhebung_threshold,
        };

        let metrics = Self::metrics(system);
        let current_state = history.last().map(|r| CurrentState {
            stage: r.stage,
            stage_index: r.stage.index(),
            stage_name: r.stage.name(),
            state: r.state,
            negation: r.negation,
            paradox_score: r.paradox_score,
            phase: r.phase,
            phase_name: r.phase.name(),
        });

        let stages = Stage::ALL
            .iter()
            .map(|&stage| StageCount {
                index: stage.index(),
                name: stage.name(),
                count: records.iter().filter(|r| r.stage == stage).count() as u32,
            })
            .collect();

        let phases = Phase::ALL
            .iter()
            .map(|&phase| PhaseCount {
                index: phase.index(),
                name: phase.name(),
                count: records.iter().filter(|r| r.phase == phase).count() as u32,
            })
            .collect();

        let mut risk_levels = RiskLevels::default();
        for record in records {
            match record.risk_index {
                r if r < 0.5 => risk_levels.low += 1,
                r if r < 1.0 => risk_levels.medium += 1,
                r if r < 2.0 => risk_levels.high += 1,
                _ => risk_levels.extreme += 1,
            }
        }

        let count_kind = |kind: ParadoxKind| {
            system.paradox_events().iter().filter(|e| e.kind == kind).count()
        };
        let paradox_persistence = if records.is_empty() {
            0.0
        } else {
            records.iter().filter(|r| r.paradox_score > 0.7).count() as f64
                / records.len() as f64
        };
        let paradox_analysis = ParadoxAnalysis {
            total_paradox_events: system.paradox_events().len(),
            simultaneous_extremity_events: count_kind(ParadoxKind::SimultaneousExtremity),
            false_stability_events: count_kind(ParadoxKind::FalseStability),
            meta_paradox_events: count_kind(ParadoxKind::MetaParadox),
            paradox_persistence,
        };

        let diagnosis = true_system_state(history, &config.thresholds);
        let recommendations =
            recommendations(diagnosis, metrics.as_ref(), &paradox_analysis);

        Report {
            system_info,
            metrics,
            current_state,
            distribution: Distribution { stages, phases, risk_levels },
            paradox_analysis,
            risk_event_count: system.risk_events().len(),
            true_system_state: diagnosis,
            recommendations,
        }
    }

    fn metrics(system: &DialecticalSystem) -> Option<Metrics> {
        let records = system.history().records();
        if records.is_empty() {
            return None;
        }

        let n = records.len() as f64;
        let extremity = system.config().thresholds.extremity;

        let risks: Vec<f64> = records.iter().map(|r| r.risk_index).collect();
        let mean_risk = risks.iter().sum::<f64>() / n;
        let std_risk =
            (risks.iter().map(|r| (r - mean_risk).powi(2)).sum::<f64>() / n).sqrt();

        let mean_tension = records.iter().map(|r| r.tension).sum::<f64>() / n;
        let mean_paradox = records.iter().map(|r| r.paradox_score).sum::<f64>() / n;

        fn fold_max(values: impl Iterator<Item = f64>) -> f64 {
            values.fold(f64::NEG_INFINITY, f64::max)
        }
        fn fold_min(values: impl Iterator<Item = f64>) -> f64 {
            values.fold(f64::INFINITY, f64::min)
        }

        Some(Metrics {
            mean_xeptqlri: mean_risk,
            max_xeptqlri: fold_max(risks.iter().copied()),
            min_xeptqlri: fold_min(risks.iter().copied()),
            std_xeptqlri: std_risk,
            final_xeptqlri: risks[risks.len() - 1],
            mean_tension,
            max_tension: fold_max(records.iter().map(|r| r.tension)),
            mean_paradox_score: mean_paradox,
            max_paradox_score: fold_max(records.iter().map(|r| r.paradox_score)),
            stability_deception: stability_deception(system.history()),
            permanent_transcendence_score: records
                .iter()
                .filter(|r| r.state.abs() > extremity)
                .count() as f64
                / n,
            simultaneous_extremity_score: records
                .iter()
                .filter(|r| r.state.abs() > extremity && r.negation.abs() > extremity)
                .count() as f64
                / n,
        })
    }
}
