//! Dialectical stage classification.
//!
//! Ten ordinal stages τ₀…τ₉ describe the current regime.  Classification
//! is *not* a linear ladder: rules are evaluated in a fixed priority
//! order and the first match wins, so a system can fall from τ₆ straight
//! back to τ₀ when its poles relax.  The paradox rules outrank the plain
//! tension bands — the whole point of the classifier is that apparent
//! calm with extreme poles must not be read as coherence.

use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::history::HistoryStore;

/// Qualitative dialectical regime, τ₀ through τ₉.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Coherence,
    FirstAnomaly,
    AnomalyRepetition,
    MeaningIncompatibility,
    SystemSaturation,
    QualitativeLeap,
    ParadoxicalTranscendence,
    FalseStability,
    PermanentDialectics,
    MetaTranscendence,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Coherence,
        Stage::FirstAnomaly,
        Stage::AnomalyRepetition,
        Stage::MeaningIncompatibility,
        Stage::SystemSaturation,
        Stage::QualitativeLeap,
        Stage::ParadoxicalTranscendence,
        Stage::FalseStability,
        Stage::PermanentDialectics,
        Stage::MetaTranscendence,
    ];

    /// Ordinal index, 0–9.
    pub fn index(self) -> u8 {
        match self {
            Stage::Coherence => 0,
            Stage::FirstAnomaly => 1,
            Stage::AnomalyRepetition => 2,
            Stage::MeaningIncompatibility => 3,
            Stage::SystemSaturation => 4,
            Stage::QualitativeLeap => 5,
            Stage::ParadoxicalTranscendence => 6,
            Stage::FalseStability => 7,
            Stage::PermanentDialectics => 8,
            Stage::MetaTranscendence => 9,
        }
    }

    pub fn from_index(index: u8) -> Option<Stage> {
        Stage::ALL.get(usize::from(index)).copied()
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Coherence => "τ₀: Coherence",
            Stage::FirstAnomaly => "τ₁: First Anomaly",
            Stage::AnomalyRepetition => "τ₂: Anomaly Repetition",
            Stage::MeaningIncompatibility => "τ₃: Meaning Incompatibility",
            Stage::SystemSaturation => "τ₄: System Saturation",
            Stage::QualitativeLeap => "τ₅: Qualitative Leap (⤊)",
            Stage::ParadoxicalTranscendence => "τ₆: Paradoxical Transcendence (⟡)",
            Stage::FalseStability => "τ₇: False Stability",
            Stage::PermanentDialectics => "τ₈: Permanent Dialectics",
            Stage::MetaTranscendence => "τ₉: Meta-Transcendence",
        }
    }
}

/// Classify the current step.  Rules are checked in priority order; the
/// first match wins.
///
/// 1. Both poles beyond `stage_paradox_pole` with tension under
///    `stage_paradox_tension` → τ₆.
/// 2. Tension under `stage_false_stability_tension` with either pole
///    beyond `stage_false_stability_pole` → τ₇.
/// 3. Stage-index σ over the last `stage_dialectics_window` steps beyond
///    `stage_dialectics_std` with mean beyond `stage_dialectics_mean` → τ₈.
/// 4. Paradox score beyond `stage_meta_paradox` with tension beyond
///    `stage_meta_tension` → τ₉.
/// 5. Tension bands: < 0.15 → τ₀, < 0.30 → τ₁, < 0.45 → τ₂, < 0.60 → τ₃,
///    < aufhebung threshold → τ₄, else τ₅.
///
/// Rules 3 requires a full window of history and is skipped before that
/// depth; at step 0 only rule 5 (and rules 1–2, which need no history)
/// can fire.
pub fn classify(
    tension: f64,
    state: f64,
    negation: f64,
    paradox_score: f64,
    history: &HistoryStore,
    config: &SystemConfig,
) -> Stage {
    let th = &config.thresholds;
    let a = state.abs();
    let n = negation.abs();

    // Rule 1: paradoxical transcendence.
    if a > th.stage_paradox_pole && n > th.stage_paradox_pole && tension < th.stage_paradox_tension
    {
        return Stage::ParadoxicalTranscendence;
    }

    // Rule 2: false stability.
    if tension < th.stage_false_stability_tension
        && (a > th.stage_false_stability_pole || n > th.stage_false_stability_pole)
    {
        return Stage::FalseStability;
    }

    // Rule 3: permanent dialectics — sustained stage churn at elevated levels.
    let window = th.stage_dialectics_window;
    let recent = history.recent(window);
    if recent.len() >= window && window > 0 {
        let indices: Vec<f64> = recent.iter().map(|r| f64::from(r.stage.index())).collect();
        let mean = indices.iter().sum::<f64>() / indices.len() as f64;
        let variance =
            indices.iter().map(|i| (i - mean).powi(2)).sum::<f64>() / indices.len() as f64;
        if variance.sqrt() > th.stage_dialectics_std && mean > th.stage_dialectics_mean {
            return Stage::PermanentDialectics;
        }
    }

    // Rule 4: meta-transcendence — extreme paradox under genuine tension.
    if paradox_score > th.stage_meta_paradox && tension > th.stage_meta_tension {
        return Stage::MetaTranscendence;
    }

    // Rule 5: tension bands.
    if tension < 0.15 {
        Stage::Coherence
    } else if tension < 0.30 {
        Stage::FirstAnomaly
    } else if tension < 0.45 {
        Stage::AnomalyRepetition
    } else if tension < 0.60 {
        Stage::MeaningIncompatibility
    } else if tension < config.aufhebung_threshold {
        Stage::SystemSaturation
    } else {
        Stage::QualitativeLeap
    }
}
