//! # dialectica-engine
//!
//! **Dialectica** is a dialectical state simulation and risk-classification
//! engine.  It tracks a scalar process `A` together with its *dialectical
//! negation* `¬A` — an internally-opposed counter-process derived from `A`
//! and from recent history — and reduces the pair's joint behaviour to a
//! small set of qualitative judgements:
//!
//! | Concept | Computation | Effect |
//! |---|---|---|
//! | **Tension** (`A ∧ ¬A`) | bounded interaction intensity with non-linear extremity boost | drives stage banding and risk |
//! | **XEPTQLRI** | tension × trend × paradox × extremity, normalised by the Aufhebung threshold | composite pre-transitional risk index |
//! | **Paradox score** | extremity + symmetry + low-tension indicator + persistence | detects deceptive calm |
//! | **Stage** (τ₀…τ₉) | priority-ordered rules, first match wins | qualitative regime label |
//!
//! The engine's distinguishing feature is *paradox detection*: regimes where
//! both poles sit at extreme values while the dynamics look calm (low
//! tension) are flagged as **Paradoxical Transcendence** or **False
//! Stability** rather than being mistaken for genuine equilibrium.
//!
//! ## Quick start
//! ```rust
//! use dialectica_engine::{DialecticalSystem, SystemConfig};
//!
//! let config = SystemConfig {
//!     name: "demo".into(),
//!     initial_state: 0.3,
//!     horizon: 200,
//!     seed: Some(42),
//!     ..SystemConfig::default()
//! };
//!
//! let mut system = DialecticalSystem::new(config).unwrap();
//! let results = system.run(200).unwrap();
//!
//! println!("final stage: {}", results.last().unwrap().stage_name);
//! println!("risk events: {}", system.risk_events().len());
//! ```
//!
//! ## Determinism
//! Every stochastic draw flows through a single seeded [`rand::rngs::StdRng`]
//! owned by the run — there is no process-global randomness.  Two systems
//! constructed with identical configuration (including `seed`) reproduce
//! bit-identical step sequences.
//!
//! ## Concurrency
//! A run is strictly sequential (each step reads the history the previous
//! step wrote).  Independent runs share no mutable state and may execute on
//! separate threads; a cooperative cancellation flag is checked between
//! steps via [`DialecticalSystem::run_with_cancel`].

pub mod config;
pub mod error;
pub mod events;
pub mod evolve;
pub mod history;
pub mod paradox;
pub mod phase;
pub mod risk;
pub mod run;
pub mod stage;
pub mod tension;

pub use config::{SystemConfig, Thresholds};
pub use error::EngineError;
pub use events::{ParadoxEvent, ParadoxKind, RiskEvent, Severity};
pub use history::{HistoryStore, StepRecord, AUDIT_LOG_CAP};
pub use phase::{Phase, PhaseParams};
pub use run::{DialecticalSystem, StepResult};
pub use stage::Stage;
