//! Fuzzy record linkage for filling missing values.
//!
//! Rows of a target table are matched by a free-text key against a
//! reference table; the best-scoring reference row above a threshold
//! supplies the missing value.
//!
//! ```ignore
//! use fuzzyfill_map::{FillColumns, FillEngine, MatchOptions, Scorer};
//!
//! let columns = FillColumns::new("Company", "name", "Region");
//! let options = MatchOptions::new(85, Scorer::TokenSet, true);
//! let report = FillEngine::new(columns, options)?.run(&targets, &reference)?;
//! println!("{} rows matched", report.summary.matched_rows);
//! ```

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod fuzz;
pub mod pool;
pub mod result;
pub mod scorer;

pub use engine::{
    Candidate, DEFAULT_THRESHOLD, FillColumns, FillEngine, MatchOptions, TargetRecord,
    best_match, fill_missing, match_row,
};
pub use error::{MatchError, Result};
pub use pool::{ConsumedKeys, ReferencePool};
pub use result::{
    FillReport, FillSummary, MATCHED_KEY_COLUMN, MatchOutcome, MatchResult, SCORE_COLUMN,
    SCORER_COLUMN, assemble,
};
pub use scorer::Scorer;
