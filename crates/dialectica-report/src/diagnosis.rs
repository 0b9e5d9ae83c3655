//! True-system-state diagnosis.
//!
//! Per-step stage labels answer "what does this step look like"; the
//! diagnosis answers "what is this system actually doing" by reading the
//! last [`DIAGNOSIS_WINDOW`] records together.  The decision tree checks
//! the deceptive regimes first: persistent paradox outranks simultaneous
//! extremity, which outranks raw time-at-extremes, so a system is never
//! labelled merely "extreme" when its extremity is also *quiet*.

use serde::{Deserialize, Serialize};

use dialectica_engine::{HistoryStore, StepRecord, Thresholds};

/// History depth the diagnosis tree requires.
pub const DIAGNOSIS_WINDOW: usize = 100;

/// History depth the stability-deception index requires.
pub const DECEPTION_WINDOW: usize = 50;

/// Diagnosed regime over the recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrueSystemState {
    PermanentParadoxicalTranscendence,
    IntermittentParadoxicalState,
    SimultaneousExtremityRegime,
    PermanentTranscendence,
    ChaoticDialectics,
    FalseStabilityRegime,
    TrueStability,
    DynamicEquilibrium,
    InsufficientData,
}

impl TrueSystemState {
    pub fn label(self) -> &'static str {
        match self {
            TrueSystemState::PermanentParadoxicalTranscendence => {
                "PERMANENT_PARADOXICAL_TRANSCENDENCE"
            }
            TrueSystemState::IntermittentParadoxicalState => "INTERMITTENT_PARADOXICAL_STATE",
            TrueSystemState::SimultaneousExtremityRegime => "SIMULTANEOUS_EXTREMITY_REGIME",
            TrueSystemState::PermanentTranscendence => "PERMANENT_TRANSCENDENCE",
            TrueSystemState::ChaoticDialectics => "CHAOTIC_DIALECTICS",
            TrueSystemState::FalseStabilityRegime => "FALSE_STABILITY_REGIME",
            TrueSystemState::TrueStability => "TRUE_STABILITY",
            TrueSystemState::DynamicEquilibrium => "DYNAMIC_EQUILIBRIUM",
            TrueSystemState::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

fn fraction(records: &[StepRecord], predicate: impl Fn(&StepRecord) -> bool) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let hits = records.iter().copied().filter(|r| predicate(r)).count();
    hits as f64 / records.len() as f64
}

/// Diagnose the system from the last [`DIAGNOSIS_WINDOW`] records.
///
/// Returns [`TrueSystemState::InsufficientData`] below that depth —
/// explicitly, rather than guessing from a thin window.
pub fn true_system_state(history: &HistoryStore, thresholds: &Thresholds) -> TrueSystemState {
    if history.len() < DIAGNOSIS_WINDOW {
        return TrueSystemState::InsufficientData;
    }

    let recent = history.recent(DIAGNOSIS_WINDOW);
    let extremity = thresholds.extremity;

    let time_at_extremes = fraction(recent, |r| r.state.abs() > extremity);
    let simultaneous_extremes = fraction(recent, |r| {
        r.state.abs() > extremity && r.negation.abs() > extremity
    });
    let paradox_persistence = fraction(recent, |r| r.paradox_score > 0.7);

    let stage_indices: Vec<f64> = recent.iter().map(|r| f64::from(r.stage.index())).collect();
    let mean_stage = stage_indices.iter().sum::<f64>() / stage_indices.len() as f64;
    let stage_variability = (stage_indices
        .iter()
        .map(|i| (i - mean_stage).powi(2))
        .sum::<f64>()
        / stage_indices.len() as f64)
        .sqrt();

    let mean_recent_risk =
        recent.iter().map(|r| r.risk_index).sum::<f64>() / recent.len() as f64;

    if paradox_persistence > 0.6 {
        if time_at_extremes > 0.7 {
            TrueSystemState::PermanentParadoxicalTranscendence
        } else {
            TrueSystemState::IntermittentParadoxicalState
        }
    } else if simultaneous_extremes > 0.5 {
        TrueSystemState::SimultaneousExtremityRegime
    } else if time_at_extremes > 0.8 {
        TrueSystemState::PermanentTranscendence
    } else if stage_variability > 2.0 {
        TrueSystemState::ChaoticDialectics
    } else if mean_recent_risk < 0.3 {
        if time_at_extremes > 0.3 {
            TrueSystemState::FalseStabilityRegime
        } else {
            TrueSystemState::TrueStability
        }
    } else {
        TrueSystemState::DynamicEquilibrium
    }
}

/// How deceptive the apparent stability is, in `[0, 1]`.
///
/// Non-zero only when the recent risk index reads low *while* the pole
/// magnitudes remain high — the signature of a system that looks settled
/// because its opposition has gone quiet, not because it relaxed.
/// Returns `0.0` below [`DECEPTION_WINDOW`] steps of history.
pub fn stability_deception(history: &HistoryStore) -> f64 {
    if history.len() < DECEPTION_WINDOW {
        return 0.0;
    }

    let recent = history.recent(DECEPTION_WINDOW);
    let n = recent.len() as f64;
    let mean_risk = recent.iter().map(|r| r.risk_index).sum::<f64>() / n;
    let mean_state = recent.iter().map(|r| r.state.abs()).sum::<f64>() / n;
    let mean_negation = recent.iter().map(|r| r.negation.abs()).sum::<f64>() / n;

    if mean_risk < 0.5 && (mean_state > 0.7 || mean_negation > 0.7) {
        ((mean_state + mean_negation) / 2.0).min(1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialectica_engine::{Phase, Stage};

    fn record(
        step: u32,
        state: f64,
        negation: f64,
        risk_index: f64,
        paradox_score: f64,
        stage: Stage,
    ) -> StepRecord {
        StepRecord {
            step,
            state,
            negation,
            tension: 0.2,
            risk_index,
            paradox_score,
            stage,
            phase: Phase::Stability,
        }
    }

    fn history_of(records: impl IntoIterator<Item = StepRecord>) -> HistoryStore {
        let mut history = HistoryStore::new();
        for r in records {
            history.push(r).unwrap();
        }
        history
    }

    #[test]
    fn thin_history_is_insufficient_data() {
        let history = history_of(
            (0..99).map(|s| record(s, 0.1, -0.1, 0.1, 0.1, Stage::Coherence)),
        );
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::InsufficientData);
    }

    #[test]
    fn persistent_paradox_at_extremes_is_permanent_paradoxical() {
        let history = history_of(
            (0..100).map(|s| record(s, 0.95, -0.95, 0.6, 0.9, Stage::ParadoxicalTranscendence)),
        );
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::PermanentParadoxicalTranscendence);
    }

    #[test]
    fn persistent_paradox_off_extremes_is_intermittent() {
        let history = history_of(
            (0..100).map(|s| record(s, 0.5, -0.5, 0.6, 0.9, Stage::SystemSaturation)),
        );
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::IntermittentParadoxicalState);
    }

    #[test]
    fn simultaneous_extremes_without_paradox_scores() {
        // Extreme poles, low paradox scores: the second branch fires.
        let history = history_of(
            (0..100).map(|s| record(s, 0.9, -0.9, 0.6, 0.2, Stage::SystemSaturation)),
        );
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::SimultaneousExtremityRegime);
    }

    #[test]
    fn one_sided_extremity_is_permanent_transcendence() {
        let history = history_of(
            (0..100).map(|s| record(s, 0.9, -0.2, 0.6, 0.2, Stage::SystemSaturation)),
        );
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::PermanentTranscendence);
    }

    #[test]
    fn churning_stages_are_chaotic_dialectics() {
        let history = history_of((0..100).map(|s| {
            let stage = if s % 2 == 0 { Stage::Coherence } else { Stage::QualitativeLeap }; // σ = 2.5
            record(s, 0.3, -0.3, 0.6, 0.2, stage)
        }));
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::ChaoticDialectics);
    }

    #[test]
    fn low_risk_at_extremes_is_false_stability_regime() {
        // 40% of the window at extreme state values, risk reading low.
        let history = history_of((0..100).map(|s| {
            let state = if s % 5 < 2 { 0.9 } else { 0.2 };
            record(s, state, -0.3, 0.1, 0.2, Stage::Coherence)
        }));
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::FalseStabilityRegime);
    }

    #[test]
    fn low_risk_low_poles_is_true_stability() {
        let history = history_of(
            (0..100).map(|s| record(s, 0.2, -0.2, 0.1, 0.1, Stage::Coherence)),
        );
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::TrueStability);
    }

    #[test]
    fn moderate_everything_is_dynamic_equilibrium() {
        let history = history_of(
            (0..100).map(|s| record(s, 0.4, -0.4, 0.5, 0.3, Stage::AnomalyRepetition)),
        );
        let state = true_system_state(&history, &Thresholds::default());
        assert_eq!(state, TrueSystemState::DynamicEquilibrium);
    }

    #[test]
    fn deception_zero_below_window() {
        let history = history_of(
            (0..49).map(|s| record(s, 0.9, -0.9, 0.1, 0.2, Stage::Coherence)),
        );
        assert_eq!(stability_deception(&history), 0.0);
    }

    #[test]
    fn deception_flags_quiet_extremity() {
        let history = history_of(
            (0..50).map(|s| record(s, 0.9, -0.85, 0.2, 0.2, Stage::FalseStability)),
        );
        let deception = stability_deception(&history);
        assert!((deception - 0.875).abs() < 1e-12);
    }

    #[test]
    fn deception_zero_when_risk_is_honest() {
        // High poles but the risk index already says so: nothing deceptive.
        let history = history_of(
            (0..50).map(|s| record(s, 0.9, -0.9, 1.5, 0.2, Stage::QualitativeLeap)),
        );
        assert_eq!(stability_deception(&history), 0.0);
    }

    #[test]
    fn deception_zero_when_poles_are_low() {
        let history = history_of(
            (0..50).map(|s| record(s, 0.2, -0.2, 0.1, 0.1, Stage::Coherence)),
        );
        assert_eq!(stability_deception(&history), 0.0);
    }

    #[test]
    fn labels_match_export_schema() {
        assert_eq!(
            TrueSystemState::FalseStabilityRegime.label(),
            "FALSE_STABILITY_REGIME"
        );
        let json = serde_json::to_string(&TrueSystemState::InsufficientData).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_DATA\"");
    }
}
