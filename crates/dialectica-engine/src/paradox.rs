//! Paradox scoring — how deceptive is the current configuration?
//!
//! A high paradox score means both poles sit at extreme values while the
//! visible dynamics look unremarkable.  Four signals are blended:
//!
//! ```text
//! score = 0.4 × extremity      min(|A|, |¬A|)
//!       + 0.3 × symmetry       1 − ||A| − |¬A||
//!       + 0.2 × indicator      1 if extremity > 0.7 ∧ tension < 0.3
//!       + 0.1 × persistence    fraction of last 10 steps with both poles > 0.7
//! ```
//! clipped to `[0, 1]`.

use crate::history::HistoryStore;

/// Look-back window for the persistence signal.
pub const PERSISTENCE_WINDOW: usize = 10;

const W_EXTREMITY: f64 = 0.4;
const W_SYMMETRY: f64 = 0.3;
const W_TENSION_PARADOX: f64 = 0.2;
const W_PERSISTENCE: f64 = 0.1;

/// Composite paradox score in `[0, 1]`.
///
/// With fewer than [`PERSISTENCE_WINDOW`] records of history the
/// persistence signal contributes 0 — the usual early-run degradation,
/// not an error.
pub fn paradox_score(state: f64, negation: f64, tension: f64, history: &HistoryStore) -> f64 {
    let a = state.abs();
    let n = negation.abs();

    let extremity = a.min(n);
    let symmetry = 1.0 - (a - n).abs();

    let tension_paradox = if extremity > 0.7 && tension < 0.3 { 1.0 } else { 0.0 };

    let recent = history.recent(PERSISTENCE_WINDOW);
    let persistence = if recent.len() < PERSISTENCE_WINDOW {
        0.0
    } else {
        let both_extreme = recent
            .iter()
            .filter(|r| r.state.abs() > 0.7 && r.negation.abs() > 0.7)
            .count();
        both_extreme as f64 / recent.len() as f64
    };

    (extremity * W_EXTREMITY
        + symmetry * W_SYMMETRY
        + tension_paradox * W_TENSION_PARADOX
        + persistence * W_PERSISTENCE)
        .clamp(0.0, 1.0)
}
