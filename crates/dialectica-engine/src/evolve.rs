//! State evolution — the `¬ᴰ` negation operator and the phase-driven
//! advance of the primary pole.
//!
//! ## Negation
//! Not "not-A" but the internal opposition that *preserves* A:
//!
//! ```text
//! ¬A = −A × preservation × historical_weight × (1 + memory) + ε
//!
//! preservation       ~ U[0.7, 1.0]
//! historical_weight  ~ U[1.0, 1.3]
//! memory             = 0.2 × tanh(2 × mean(last ≤10 states))
//! ε                  ~ N(0, (0.05 × (1 + |A|))²)
//! ```
//!
//! The random factors are drawn fresh every call from the injected RNG —
//! per-step irreducible randomness, reproducible only through the seed.
//!
//! ## Advance
//! ```text
//! A' = A + tension × pressure(phase)
//!        + amplitude(phase) × sin(step × frequency(phase))
//!        + noise_sigma(phase) × N(0, 1)
//! ```
//!
//! Both operations clamp into the configured state bounds and always
//! return finite values.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::Thresholds;
use crate::history::HistoryStore;
use crate::phase::Phase;

/// Look-back window for the negation memory effect.
pub const MEMORY_WINDOW: usize = 10;

/// Compute the dialectical negation of `state`.
pub fn dialectical_negation(
    state: f64,
    history: &HistoryStore,
    thresholds: &Thresholds,
    rng: &mut impl Rng,
) -> f64 {
    let memory_effect = if history.is_empty() {
        0.0
    } else {
        0.2 * (2.0 * history.mean_recent_state(MEMORY_WINDOW)).tanh()
    };

    let preservation = 0.7 + 0.3 * rng.gen::<f64>();
    let historical_weight = 1.0 + 0.3 * rng.gen::<f64>();

    let negation = -state * preservation * historical_weight * (1.0 + memory_effect);

    let noise_level = 0.05 * (1.0 + state.abs());
    let eps: f64 = rng.sample(StandardNormal);

    (negation + noise_level * eps).clamp(thresholds.state_min, thresholds.state_max)
}

/// Advance the primary pole by one step of autonomous evolution.
///
/// `tension` is the previous step's tension (0 at the first step of a
/// fresh run); the phase schedule supplies the pressure, oscillation,
/// and noise coefficients for the current position in the horizon.
pub fn advance_state(
    state: f64,
    tension: f64,
    step: u32,
    horizon: u32,
    thresholds: &Thresholds,
    rng: &mut impl Rng,
) -> f64 {
    let params = Phase::for_step(step, horizon).params();

    let pressure = tension * params.pressure;
    let pattern = params.amplitude * (f64::from(step) * params.frequency).sin();
    let eps: f64 = rng.sample(StandardNormal);

    (state + pressure + pattern + params.noise_sigma * eps)
        .clamp(thresholds.state_min, thresholds.state_max)
}
