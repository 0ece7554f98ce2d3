use std::path::PathBuf;

use fuzzyfill_hours::{HoursSummary, TypeRule};
use fuzzyfill_map::{FillSummary, MatchResult};

#[derive(Debug)]
pub struct FillOutcome {
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub summary: FillSummary,
    pub results: Vec<MatchResult>,
}

#[derive(Debug)]
pub struct HoursOutcome {
    pub output: PathBuf,
    pub summary: HoursSummary,
    /// Hours per observed type, as applied.
    pub type_rules: Vec<TypeRule>,
    pub keyword_rules: usize,
}

#[derive(Debug)]
pub struct TypesOutcome {
    pub input: PathBuf,
    pub type_column: String,
    pub counts: Vec<(String, usize)>,
}
