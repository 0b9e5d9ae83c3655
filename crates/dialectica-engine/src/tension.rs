//! Dialectical tension — bounded intensity of `A ∧ ¬A`.

/// Pole magnitude above which the strong non-linear boost applies.
const BOTH_EXTREME: f64 = 0.8;
/// Pole magnitude above which the mild boost applies to either pole.
const EITHER_ELEVATED: f64 = 0.6;

/// Interaction intensity of the pole pair, in `[0, 1]`.
///
/// Base intensity is `|A × ¬A|`.  When both poles are individually
/// extreme the product understates how charged the configuration is, so
/// it is raised by `x^0.7 × 1.5`; a single elevated pole gets the milder
/// `x^0.8 × 1.2`.  Pure function — no history, no randomness.
pub fn tension(state: f64, negation: f64) -> f64 {
    let raw = (state * negation).abs();
    let a = state.abs();
    let n = negation.abs();

    let boosted = if a > BOTH_EXTREME && n > BOTH_EXTREME {
        raw.powf(0.7) * 1.5
    } else if a > EITHER_ELEVATED || n > EITHER_ELEVATED {
        raw.powf(0.8) * 1.2
    } else {
        raw
    };

    boosted.clamp(0.0, 1.0)
}
