//! XEPTQLRI — the composite pre-transitional risk index.
//!
//! ```text
//! XEPTQLRI = tension × trend_factor × paradox_factor × extremity_multiplier
//!            ─────────────────────────────────────────────────────────────
//!                              aufhebung_threshold
//! ```
//!
//! then an extremity-persistence boost, a small multiplicative jitter, and
//! a clip to `[0, risk_max]`.
//!
//! The trend factor uses the *continuous* formulation,
//! `1 + |slope| × trend_gain`, over a least-squares fit of the last
//! `trend_window` tension samples.  Risk climbs fastest when tension is
//! rising — the index is explicitly pre-transitional, weighting where the
//! system is headed over where it stands.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::SystemConfig;
use crate::history::HistoryStore;

/// Window for the extremity-persistence boost.
const PERSISTENCE_WINDOW: usize = 50;
/// Fraction of the persistence window that must be extreme to boost.
const PERSISTENCE_FRACTION: f64 = 0.7;
/// Boost applied when extremity has persisted.
const PERSISTENCE_BOOST: f64 = 1.3;

/// Least-squares slope of tension over the last `window` records.
///
/// Returns `None` below full depth — the caller degrades to a neutral
/// trend factor of 1.0.
pub fn tension_slope(history: &HistoryStore, window: usize) -> Option<f64> {
    let recent = history.recent(window);
    if recent.len() < window || window < 2 {
        return None;
    }

    let n = window as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = recent.iter().map(|r| r.tension).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, record) in recent.iter().enumerate() {
        let dx = i as f64 - mean_x;
        numerator += dx * (record.tension - mean_y);
        denominator += dx * dx;
    }

    Some(numerator / denominator)
}

/// Compute the risk index for the current step.
///
/// `config.aufhebung_threshold` is validated strictly positive at
/// construction, so the division is always well-defined.
pub fn risk_index(
    tension: f64,
    state: f64,
    negation: f64,
    history: &HistoryStore,
    config: &SystemConfig,
    rng: &mut impl Rng,
) -> f64 {
    let th = &config.thresholds;
    let a = state.abs();
    let n = negation.abs();

    let trend_factor = match tension_slope(history, th.trend_window) {
        Some(slope) => 1.0 + slope.abs() * th.trend_gain,
        None => 1.0,
    };

    // Both poles extreme is the dangerous configuration; extreme poles
    // with *low* tension is the false-stability signature and scores
    // highest of all.
    let paradox_factor = if a > th.extremity && n > th.extremity {
        if tension < th.paradox_low_tension {
            2.8
        } else {
            2.0
        }
    } else if a > 0.9 || n > 0.9 {
        1.5
    } else {
        1.0
    };

    let extremity_multiplier = if a > th.extremity && n > th.extremity { 1.5 } else { 1.0 };

    let mut risk = (tension * trend_factor * paradox_factor * extremity_multiplier)
        / config.aufhebung_threshold;

    // Sustained extremity over the recent past compounds the risk.
    let recent = history.recent(PERSISTENCE_WINDOW);
    if recent.len() >= PERSISTENCE_WINDOW {
        let extreme = recent.iter().filter(|r| r.state.abs() > th.extremity).count();
        if extreme as f64 / recent.len() as f64 > PERSISTENCE_FRACTION {
            risk *= PERSISTENCE_BOOST;
        }
    }

    let eps: f64 = rng.sample(StandardNormal);
    risk *= 1.0 + config.volatility * 0.3 * eps;

    risk.clamp(0.0, th.risk_max)
}
