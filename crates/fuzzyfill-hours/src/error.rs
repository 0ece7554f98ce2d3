//! Error types for hours assignment.

use std::path::PathBuf;

use fuzzyfill_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HoursError {
    /// Hours must be finite and non-negative.
    #[error("invalid hours {hours} for {rule}")]
    InvalidHours { rule: String, hours: f64 },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, HoursError>;
