//! Error type for the dialectical engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid construction parameters.  Raised eagerly by
    /// [`crate::SystemConfig::validate`] — bad thresholds are never
    /// silently clamped.
    #[error("configuration error: {0}")]
    Config(String),

    /// A non-finite scalar was about to enter the history log.  All stored
    /// quantities are clamped before this point, so hitting it indicates a
    /// defect; downstream statistics assume finite values throughout.
    #[error("non-finite {quantity} produced at step {step}")]
    NonFinite { step: u32, quantity: &'static str },

    /// `step()` was called on a run whose configured horizon is already
    /// complete.
    #[error("run horizon of {0} steps already exhausted")]
    HorizonExhausted(u32),
}
