//! Run orchestration — one simulation step, or a batch of them.
//!
//! ## Step protocol
//!
//! ```text
//! Step 1  Resolve the driving state: external input (clamped) or
//!         autonomous evolution under the previous step's tension
//! Step 2  Dialectical negation  ¬A ← f(A, history, rng)
//! Step 3  Tension               A ∧ ¬A
//! Step 4  Paradox score
//! Step 5  XEPTQLRI risk index
//! Step 6  Stage classification  (priority rules, first match wins)
//! Step 7  Append the record to history   (rejects non-finite values)
//! Step 8  Event detection       (risk + three paradox signatures)
//! ```
//!
//! Every stochastic draw flows through the run-owned seeded RNG, in a
//! fixed order, so identical configurations replay bit-identically.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use crate::config::SystemConfig;
use crate::error::EngineError;
use crate::events::{self, ParadoxEvent, RiskEvent};
use crate::evolve::{advance_state, dialectical_negation};
use crate::history::{HistoryStore, StepRecord};
use crate::paradox::paradox_score;
use crate::phase::Phase;
use crate::risk::risk_index;
use crate::stage::{classify, Stage};
use crate::tension::tension;

/// Everything a caller needs from one completed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepResult {
    pub step: u32,
    pub state: f64,
    pub negation: f64,
    pub tension: f64,
    pub risk_index: f64,
    pub paradox_score: f64,
    pub stage: Stage,
    pub stage_name: &'static str,
    pub phase: Phase,
    pub phase_name: &'static str,
}

/// One dialectical run: a state/negation pair, its history, its event
/// logs, and its private RNG.
///
/// Runs are independent — several may execute on separate threads with
/// no shared state.  Within a run, steps are strictly sequential.
#[derive(Debug)]
pub struct DialecticalSystem {
    config: SystemConfig,
    rng: StdRng,
    state: f64,
    negation: f64,
    last_tension: f64,
    steps_taken: u32,
    history: HistoryStore,
    risk_events: Vec<RiskEvent>,
    paradox_events: Vec<ParadoxEvent>,
}

impl DialecticalSystem {
    /// Construct a run.  Fails fast on invalid configuration — see
    /// [`SystemConfig::validate`].
    ///
    /// The initial negation is computed here, so the very first
    /// [`step`](Self::step) already sees a consistent pole pair.
    pub fn new(config: SystemConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let th = &config.thresholds;
        let state = config.initial_state.clamp(th.state_min, th.state_max);
        let history = HistoryStore::new();
        let negation = dialectical_negation(state, &history, th, &mut rng);
        let last_tension = tension(state, negation);

        Ok(Self {
            config,
            rng,
            state,
            negation,
            last_tension,
            steps_taken: 0,
            history,
            risk_events: Vec::new(),
            paradox_events: Vec::new(),
        })
    }

    /// Advance the run by one step.
    ///
    /// `external_input`, when present, overrides the autonomous evolution
    /// of `A` (it is clamped into the state bounds first) — this is how
    /// domain adapters feed externally measured values through the
    /// engine.  Returns [`EngineError::HorizonExhausted`] once the
    /// configured horizon is complete.
    pub fn step(&mut self, external_input: Option<f64>) -> Result<StepResult, EngineError> {
        if self.is_complete() {
            return Err(EngineError::HorizonExhausted(self.config.horizon));
        }

        let step = self.steps_taken;
        let th = &self.config.thresholds;

        // Step 1: driving state.
        let new_state = match external_input {
            Some(input) => {
                if !input.is_finite() {
                    return Err(EngineError::NonFinite { step, quantity: "external input" });
                }
                input.clamp(th.state_min, th.state_max)
            }
            None => advance_state(
                self.state,
                self.last_tension,
                step,
                self.config.horizon,
                th,
                &mut self.rng,
            ),
        };

        // Steps 2–6: the derived tuple.
        let new_negation = dialectical_negation(new_state, &self.history, th, &mut self.rng);
        let step_tension = tension(new_state, new_negation);
        let step_paradox = paradox_score(new_state, new_negation, step_tension, &self.history);
        let step_risk = risk_index(
            step_tension,
            new_state,
            new_negation,
            &self.history,
            &self.config,
            &mut self.rng,
        );
        let stage = classify(
            step_tension,
            new_state,
            new_negation,
            step_paradox,
            &self.history,
            &self.config,
        );
        let phase = Phase::for_step(step, self.config.horizon);

        // Step 7: record.
        let record = StepRecord {
            step,
            state: new_state,
            negation: new_negation,
            tension: step_tension,
            risk_index: step_risk,
            paradox_score: step_paradox,
            stage,
            phase,
        };
        self.history.push(record)?;

        // Step 8: events.
        if let Some(event) = events::detect_risk_event(&record, &self.config) {
            self.risk_events.push(event);
        }
        self.paradox_events
            .extend(events::detect_paradox_events(&record, &self.config));

        self.state = new_state;
        self.negation = new_negation;
        self.last_tension = step_tension;
        self.steps_taken += 1;

        if self.is_complete() {
            info!(
                system = %self.config.name,
                steps = self.steps_taken,
                risk_events = self.risk_events.len(),
                paradox_events = self.paradox_events.len(),
                "run complete"
            );
        }

        Ok(StepResult {
            step,
            state: new_state,
            negation: new_negation,
            tension: step_tension,
            risk_index: step_risk,
            paradox_score: step_paradox,
            stage,
            stage_name: stage.name(),
            phase,
            phase_name: phase.name(),
        })
    }

    /// Run up to `n` autonomous steps, stopping early at the horizon.
    pub fn run(&mut self, n: u32) -> Result<Vec<StepResult>, EngineError> {
        let take = n.min(self.remaining()) as usize;
        let mut results = Vec::with_capacity(take);
        for _ in 0..take {
            results.push(self.step(None)?);
        }
        Ok(results)
    }

    /// Run all remaining steps of the configured horizon.
    pub fn run_to_horizon(&mut self) -> Result<Vec<StepResult>, EngineError> {
        let remaining = self.remaining();
        self.run(remaining)
    }

    /// Like [`run`](Self::run), but checks `cancel` between steps and
    /// returns what completed so far when it flips.  Steps are cheap
    /// constant-time operations; nothing ever blocks mid-step.
    pub fn run_with_cancel(
        &mut self,
        n: u32,
        cancel: &AtomicBool,
    ) -> Result<Vec<StepResult>, EngineError> {
        let take = n.min(self.remaining()) as usize;
        let mut results = Vec::with_capacity(take);
        for _ in 0..take {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            results.push(self.step(None)?);
        }
        Ok(results)
    }

    /// Discard all history and events and return to the initial state,
    /// re-seeding the RNG.  A reset run replays identically to a fresh
    /// construction with the same config.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        *self = Self::new(self.config.clone())?;
        Ok(())
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn risk_events(&self) -> &[RiskEvent] {
        &self.risk_events
    }

    pub fn paradox_events(&self) -> &[ParadoxEvent] {
        &self.paradox_events
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn remaining(&self) -> u32 {
        self.config.horizon - self.steps_taken
    }

    pub fn is_complete(&self) -> bool {
        self.steps_taken >= self.config.horizon
    }

    /// Current primary pole value.
    pub fn state(&self) -> f64 {
        self.state
    }

    /// Current dialectical negation.
    pub fn negation(&self) -> f64 {
        self.negation
    }

    /// Stage assigned at the most recent step, if any step has run.
    pub fn current_stage(&self) -> Option<Stage> {
        self.history.last().map(|r| r.stage)
    }
}
