//! Configuration for a dialectical run.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Tunable thresholds of the `continuous-trend` profile.
///
/// The engine's duplicated ancestors disagreed on several constants
/// (extremity cutoffs of 0.8 vs 0.85, risk clipping at 3.0 vs 3.5, tiered
/// vs continuous trend scaling).  This struct pins one canonical profile as
/// the default and keeps every disputed constant configurable rather than
/// hard-coded at the call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    // ── State bounds ──────────────────────────────────────────────────────

    /// Lower clamp bound for `A` and `¬A`.
    /// Default: `-1.5`
    pub state_min: f64,

    /// Upper clamp bound for `A` and `¬A`.
    /// Default: `1.5`
    pub state_max: f64,

    // ── Risk index ────────────────────────────────────────────────────────

    /// Pole magnitude above which the risk paradox factor and extremity
    /// multiplier engage.
    /// Default: `0.8`
    pub extremity: f64,

    /// Tension below which simultaneous extremity reads as *false
    /// stability* and earns the maximum paradox factor.
    /// Default: `0.35`
    pub paradox_low_tension: f64,

    /// Window length for the least-squares tension trend fit.
    /// Default: `5`
    pub trend_window: usize,

    /// Gain applied to the absolute trend slope: `1 + |slope| × gain`.
    /// Default: `15.0`
    pub trend_gain: f64,

    /// XEPTQLRI warning threshold; crossing it emits a [`crate::RiskEvent`].
    /// Default: `0.7`
    pub risk_warning: f64,

    /// XEPTQLRI level above which a risk event is CRITICAL rather than HIGH.
    /// Default: `1.0`
    pub risk_critical: f64,

    /// Hard upper clip for the risk index.
    /// Default: `3.5`
    pub risk_max: f64,

    // ── Stage rules ───────────────────────────────────────────────────────

    /// Pole magnitude required (both poles) for τ₆ Paradoxical
    /// Transcendence, and for the simultaneous-extremity paradox event.
    /// Default: `0.85`
    pub stage_paradox_pole: f64,

    /// Tension ceiling for τ₆: both poles extreme *and* tension below this
    /// reads as transcendence, not saturation.
    /// Default: `0.4`
    pub stage_paradox_tension: f64,

    /// Tension ceiling for τ₇ False Stability.
    /// Default: `0.25`
    pub stage_false_stability_tension: f64,

    /// Pole magnitude (either pole) required for τ₇.
    /// Default: `0.75`
    pub stage_false_stability_pole: f64,

    /// Look-back window for the τ₈ Permanent Dialectics rule.
    /// Default: `20`
    pub stage_dialectics_window: usize,

    /// Stage-index standard deviation over the window required for τ₈.
    /// Default: `1.8`
    pub stage_dialectics_std: f64,

    /// Mean stage index over the window required for τ₈.
    /// Default: `3.0`
    pub stage_dialectics_mean: f64,

    /// Paradox score required for τ₉ Meta-Transcendence.
    /// Default: `0.8`
    pub stage_meta_paradox: f64,

    /// Tension floor for τ₉ — high paradox with *high* tension, the inverse
    /// signature of false stability.
    /// Default: `0.6`
    pub stage_meta_tension: f64,

    /// Paradox score above which a MetaParadox event fires.
    /// Default: `0.9`
    pub meta_paradox_event: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            state_min:                      -1.5,
            state_max:                      1.5,
            extremity:                      0.8,
            paradox_low_tension:            0.35,
            trend_window:                   5,
            trend_gain:                     15.0,
            risk_warning:                   0.7,
            risk_critical:                  1.0,
            risk_max:                       3.5,
            stage_paradox_pole:             0.85,
            stage_paradox_tension:          0.4,
            stage_false_stability_tension:  0.25,
            stage_false_stability_pole:     0.75,
            stage_dialectics_window:        20,
            stage_dialectics_std:           1.8,
            stage_dialectics_mean:          3.0,
            stage_meta_paradox:             0.8,
            stage_meta_tension:             0.6,
            meta_paradox_event:             0.9,
        }
    }
}

/// Full configuration for one [`crate::DialecticalSystem`] run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Human-readable name, echoed into reports.
    pub name: String,

    /// Initial value of the primary state `A`.  Clamped into the state
    /// bounds at construction.
    /// Default: `0.3`
    pub initial_state: f64,

    /// Number of simulation steps in the run.  Must be ≥ 1.
    /// Default: `200`
    pub horizon: u32,

    /// Critical tension threshold for the τ₅ qualitative leap, and the
    /// normaliser of the risk index.  Must lie in `(0, 1]` — a zero or
    /// negative threshold is a configuration error, not a clampable value.
    /// Default: `0.85`
    pub aufhebung_threshold: f64,

    /// Stochastic volatility factor of the dialectical process; scales the
    /// multiplicative jitter on the risk index.  Must be ≥ 0.
    /// Default: `0.03`
    pub volatility: f64,

    /// Seed for the run-owned RNG.  `None` seeds from OS entropy; supply a
    /// value for reproducible runs.
    pub seed: Option<u64>,

    /// Threshold profile (see [`Thresholds`]).
    pub thresholds: Thresholds,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            name:                "Default System".to_string(),
            initial_state:       0.3,
            horizon:             200,
            aufhebung_threshold: 0.85,
            volatility:          0.03,
            seed:                None,
            thresholds:          Thresholds::default(),
        }
    }
}

impl SystemConfig {
    /// Check the hard construction constraints.  Called by
    /// [`crate::DialecticalSystem::new`]; exposed for callers that build
    /// configurations from untrusted input.
    pub fn validate(&self) -> Result<(), EngineError> {
        let th = &self.thresholds;

        if !(self.aufhebung_threshold > 0.0 && self.aufhebung_threshold <= 1.0) {
            return Err(EngineError::Config(format!(
                "aufhebung_threshold must be in (0, 1], got {}",
                self.aufhebung_threshold
            )));
        }
        if self.horizon == 0 {
            return Err(EngineError::Config("horizon must be >= 1".to_string()));
        }
        if !(self.volatility >= 0.0 && self.volatility.is_finite()) {
            return Err(EngineError::Config(format!(
                "volatility must be finite and >= 0, got {}",
                self.volatility
            )));
        }
        if !(th.state_min.is_finite() && th.state_max.is_finite() && th.state_min < th.state_max) {
            return Err(EngineError::Config(format!(
                "state bounds must be finite with min < max, got [{}, {}]",
                th.state_min, th.state_max
            )));
        }
        if !(th.risk_max > 0.0 && th.risk_max.is_finite()) {
            return Err(EngineError::Config(format!(
                "risk_max must be finite and > 0, got {}",
                th.risk_max
            )));
        }
        if th.trend_window < 2 {
            return Err(EngineError::Config(
                "trend_window must be >= 2 for a slope fit".to_string(),
            ));
        }
        if !self.initial_state.is_finite() {
            return Err(EngineError::Config("initial_state must be finite".to_string()));
        }

        Ok(())
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// | Variable                        | Default          |
    /// |---------------------------------|------------------|
    /// | `DIALECTICA_NAME`               | `Default System` |
    /// | `DIALECTICA_INITIAL_STATE`      | `0.3`            |
    /// | `DIALECTICA_HORIZON`            | `200`            |
    /// | `DIALECTICA_AUFHEBUNG`          | `0.85`           |
    /// | `DIALECTICA_VOLATILITY`         | `0.03`           |
    /// | `DIALECTICA_SEED`               | unset            |
    pub fn from_env() -> Self {
        fn env_f64(key: &str, default: f64) -> f64 {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        }
        fn env_u32(key: &str, default: u32) -> u32 {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        Self {
            name: std::env::var("DIALECTICA_NAME").unwrap_or(defaults.name),
            initial_state: env_f64("DIALECTICA_INITIAL_STATE", defaults.initial_state),
            horizon: env_u32("DIALECTICA_HORIZON", defaults.horizon),
            aufhebung_threshold: env_f64("DIALECTICA_AUFHEBUNG", defaults.aufhebung_threshold),
            volatility: env_f64("DIALECTICA_VOLATILITY", defaults.volatility),
            seed: std::env::var("DIALECTICA_SEED").ok().and_then(|s| s.parse().ok()),
            thresholds: Thresholds::default(),
        }
    }

    /// Deterministic 8-hex identifier derived from `(name, seed, horizon)`.
    ///
    /// Identical configurations yield identical ids across processes, so
    /// reports from reproduced runs can be matched up.
    pub fn system_id(&self) -> String {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in self.name.bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
        h ^= self.seed.unwrap_or(0);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
        h ^= u64::from(self.horizon);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
        format!("{:08x}", (h >> 32) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        SystemConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_aufhebung_threshold_rejected() {
        let cfg = SystemConfig {
            aufhebung_threshold: 0.0,
            ..SystemConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn negative_aufhebung_threshold_rejected() {
        let cfg = SystemConfig {
            aufhebung_threshold: -0.5,
            ..SystemConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_horizon_rejected() {
        let cfg = SystemConfig {
            horizon: 0,
            ..SystemConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_volatility_rejected() {
        let cfg = SystemConfig {
            volatility: -0.01,
            ..SystemConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_state_bounds_rejected() {
        let mut cfg = SystemConfig::default();
        cfg.thresholds.state_min = 2.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn system_id_is_deterministic() {
        let a = SystemConfig {
            name: "banking".into(),
            seed: Some(7),
            ..SystemConfig::default()
        };
        let b = a.clone();
        assert_eq!(a.system_id(), b.system_id());
        assert_eq!(a.system_id().len(), 8);
    }

    #[test]
    fn system_id_varies_with_name() {
        let a = SystemConfig { name: "alpha".into(), ..SystemConfig::default() };
        let b = SystemConfig { name: "beta".into(), ..SystemConfig::default() };
        assert_ne!(a.system_id(), b.system_id());
    }

    /// Env-var scenarios share one test to avoid races on process-global
    /// environment state.
    #[test]
    fn from_env_all_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        for key in [
            "DIALECTICA_NAME",
            "DIALECTICA_INITIAL_STATE",
            "DIALECTICA_HORIZON",
            "DIALECTICA_AUFHEBUNG",
            "DIALECTICA_VOLATILITY",
            "DIALECTICA_SEED",
        ] {
            std::env::remove_var(key);
        }

        let cfg = SystemConfig::from_env();
        let def = SystemConfig::default();
        assert_eq!(cfg.name, def.name);
        assert_eq!(cfg.horizon, def.horizon);
        assert!(cfg.seed.is_none());

        std::env::set_var("DIALECTICA_NAME", "covid-ews");
        std::env::set_var("DIALECTICA_HORIZON", "150");
        std::env::set_var("DIALECTICA_SEED", "42");
        std::env::set_var("DIALECTICA_VOLATILITY", "0.01");

        let cfg = SystemConfig::from_env();
        assert_eq!(cfg.name, "covid-ews");
        assert_eq!(cfg.horizon, 150);
        assert_eq!(cfg.seed, Some(42));
        assert!((cfg.volatility - 0.01).abs() < 1e-12);

        // Invalid values fall back to defaults.
        std::env::set_var("DIALECTICA_HORIZON", "not_a_number");
        let cfg = SystemConfig::from_env();
        assert_eq!(cfg.horizon, def.horizon);

        for key in [
            "DIALECTICA_NAME",
            "DIALECTICA_INITIAL_STATE",
            "DIALECTICA_HORIZON",
            "DIALECTICA_AUFHEBUNG",
            "DIALECTICA_VOLATILITY",
            "DIALECTICA_SEED",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = SystemConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize");
        let parsed: SystemConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.horizon, cfg.horizon);
        assert!((parsed.aufhebung_threshold - cfg.aufhebung_threshold).abs() < f64::EPSILON);
        assert!((parsed.thresholds.risk_max - 3.5).abs() < f64::EPSILON);
    }
}
