//! Macro-phase schedule.
//!
//! A run passes through seven coarse phases, selected by fractional
//! position within the configured horizon.  Each phase carries its own
//! pressure, noise, and oscillation coefficients, so the same engine
//! produces a calm opening and an increasingly agitated endgame without
//! any per-phase branching in the evolution code itself.

use serde::{Deserialize, Serialize};

/// Fractional phase boundaries over the horizon.
const PHASE_BOUNDARIES: [f64; 7] = [0.2, 0.4, 0.6, 0.75, 0.85, 0.95, 1.0];

/// Coarse macro-period of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Stability,
    Anomaly,
    Contradiction,
    Crisis,
    Transition,
    Paradox,
    MetaStability,
}

/// Per-phase evolution coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseParams {
    /// Scale on the tension-driven dialectical pressure term.
    pub pressure: f64,
    /// Standard deviation of the systemic Gaussian noise.
    pub noise_sigma: f64,
    /// Amplitude of the phase-specific oscillatory pattern.
    pub amplitude: f64,
    /// Angular frequency of the oscillatory pattern (per step).
    pub frequency: f64,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Stability,
        Phase::Anomaly,
        Phase::Contradiction,
        Phase::Crisis,
        Phase::Transition,
        Phase::Paradox,
        Phase::MetaStability,
    ];

    pub fn index(self) -> usize {
        match self {
            Phase::Stability => 0,
            Phase::Anomaly => 1,
            Phase::Contradiction => 2,
            Phase::Crisis => 3,
            Phase::Transition => 4,
            Phase::Paradox => 5,
            Phase::MetaStability => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Stability => "Stability Phase",
            Phase::Anomaly => "Anomaly Phase",
            Phase::Contradiction => "Contradiction Phase",
            Phase::Crisis => "Crisis Phase",
            Phase::Transition => "Transition Phase",
            Phase::Paradox => "Paradox Phase",
            Phase::MetaStability => "Meta-Stability Phase",
        }
    }

    /// Phase active at `step` of a run with the given horizon.
    ///
    /// Boundaries truncate toward zero, so short horizons collapse the
    /// early phases rather than stretching them.
    pub fn for_step(step: u32, horizon: u32) -> Phase {
        let h = f64::from(horizon);
        for (i, fraction) in PHASE_BOUNDARIES.iter().enumerate() {
            let boundary = (h * fraction) as u32;
            if step < boundary {
                return Phase::ALL[i];
            }
        }
        Phase::MetaStability
    }

    pub fn params(self) -> PhaseParams {
        match self {
            Phase::Stability => PhaseParams { pressure: 0.02, noise_sigma: 0.01, amplitude: 0.01, frequency: 0.05 },
            Phase::Anomaly => PhaseParams { pressure: 0.05, noise_sigma: 0.03, amplitude: 0.02, frequency: 0.08 },
            Phase::Contradiction => PhaseParams { pressure: 0.10, noise_sigma: 0.05, amplitude: 0.03, frequency: 0.12 },
            Phase::Crisis => PhaseParams { pressure: 0.15, noise_sigma: 0.08, amplitude: 0.04, frequency: 0.18 },
            Phase::Transition => PhaseParams { pressure: 0.20, noise_sigma: 0.12, amplitude: 0.05, frequency: 0.25 },
            Phase::Paradox => PhaseParams { pressure: 0.25, noise_sigma: 0.15, amplitude: 0.06, frequency: 0.35 },
            Phase::MetaStability => PhaseParams { pressure: 0.30, noise_sigma: 0.20, amplitude: 0.03, frequency: 0.10 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_is_stability() {
        assert_eq!(Phase::for_step(0, 200), Phase::Stability);
    }

    #[test]
    fn last_step_is_meta_stability() {
        assert_eq!(Phase::for_step(199, 200), Phase::MetaStability);
    }

    #[test]
    fn boundaries_partition_the_horizon() {
        // 200-step horizon: boundaries at 40/80/120/150/170/190/200.
        assert_eq!(Phase::for_step(39, 200), Phase::Stability);
        assert_eq!(Phase::for_step(40, 200), Phase::Anomaly);
        assert_eq!(Phase::for_step(119, 200), Phase::Contradiction);
        assert_eq!(Phase::for_step(120, 200), Phase::Crisis);
        assert_eq!(Phase::for_step(169, 200), Phase::Transition);
        assert_eq!(Phase::for_step(170, 200), Phase::Paradox);
        assert_eq!(Phase::for_step(190, 200), Phase::MetaStability);
    }

    #[test]
    fn phases_are_monotone_in_step() {
        let mut last = 0;
        for step in 0..500 {
            let idx = Phase::for_step(step, 500).index();
            assert!(idx >= last, "phase regressed at step {step}");
            last = idx;
        }
    }

    #[test]
    fn params_escalate_noise_through_the_run() {
        let mut last = 0.0;
        for phase in Phase::ALL {
            let sigma = phase.params().noise_sigma;
            assert!(sigma > last, "{:?} should be noisier than its predecessor", phase);
            last = sigma;
        }
    }

    #[test]
    fn tiny_horizon_does_not_panic() {
        assert_eq!(Phase::for_step(0, 1), Phase::MetaStability);
    }
}
