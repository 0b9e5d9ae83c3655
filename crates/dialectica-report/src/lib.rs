//! # dialectica-report
//!
//! Aggregate reporting over a [`dialectica_engine::DialecticalSystem`] run:
//! summary statistics, stage/phase distributions, the *true system state*
//! diagnosis that looks past apparent stability, rule-derived
//! recommendations, and the export schema (JSON report + per-step CSV
//! rows) consumed by dashboards and persistence layers.
//!
//! The report is a read-only snapshot: build it at any point after a run
//! has stepped at least once, or at the end for the full picture.  A
//! zero-step run yields an explicit no-data report rather than an error,
//! and the diagnosis declares [`TrueSystemState::InsufficientData`] until
//! 100 steps of history exist — it never guesses from a thin window.
//!
//! ```rust
//! use dialectica_engine::{DialecticalSystem, SystemConfig};
//! use dialectica_report::Report;
//!
//! let mut system = DialecticalSystem::new(SystemConfig {
//!     horizon: 150,
//!     seed: Some(42),
//!     ..SystemConfig::default()
//! }).unwrap();
//! system.run_to_horizon().unwrap();
//!
//! let report = Report::from_system(&system);
//! println!("true system state: {}", report.true_system_state.label());
//! ```

pub mod diagnosis;
pub mod export;
pub mod recommend;
pub mod report;

pub use diagnosis::{stability_deception, true_system_state, TrueSystemState, DIAGNOSIS_WINDOW};
pub use export::{csv_document, csv_row, CSV_HEADER};
pub use report::{
    CurrentState, Distribution, Metrics, ParadoxAnalysis, PhaseCount, Report, RiskLevels,
    StageCount, SystemInfo,
};
