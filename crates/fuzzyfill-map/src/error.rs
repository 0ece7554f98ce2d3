//! Error types for fill runs.

use fuzzyfill_model::ModelError;
use thiserror::Error;

/// Configuration errors. All of them are raised before the first row is
/// processed; a run that starts always completes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Scorer name outside the fixed set.
    #[error("unknown scorer '{name}' (expected one of: {expected})")]
    UnknownScorer { name: String, expected: String },

    /// Threshold outside 0..=100.
    #[error("threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(u8),

    /// Required column missing from the target or reference table.
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, MatchError>;
