//! Per-row match results and output table assembly.

use fuzzyfill_model::{CellValue, ColumnName, Table};
use serde::{Deserialize, Serialize};

use crate::engine::{FillColumns, MatchOptions};
use crate::error::Result;
use crate::scorer::Scorer;

/// Output column holding the winning score.
pub const SCORE_COLUMN: &str = "match_score";
/// Output column holding the winning reference key.
pub const MATCHED_KEY_COLUMN: &str = "matched_key";
/// Output column holding the scorer name.
pub const SCORER_COLUMN: &str = "match_scorer";

/// Why a row ended up filled or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The row already had a value; it was passed through unscored.
    Prefilled,
    /// Every reference key was consumed (or the pool was empty).
    NoCandidates,
    /// The best candidate scored under the threshold.
    BelowThreshold { best_key: String, best_score: u8 },
    /// The row was filled from the reference pool.
    Filled,
}

impl MatchOutcome {
    /// Short label for logs and summaries; never includes row data.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prefilled => "prefilled",
            Self::NoCandidates => "no_candidates",
            Self::BelowThreshold { .. } => "below_threshold",
            Self::Filled => "filled",
        }
    }
}

/// Result for one target row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Ordinal of the target row.
    pub index: usize,
    /// Payload copied from the reference pool, `None` when nothing was filled.
    pub filled_value: Option<CellValue>,
    /// Winning score, 0 when the row was not filled.
    pub score: u8,
    /// Winning reference key, empty when the row was not filled.
    pub matched_key: String,
    pub scorer: Scorer,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub(crate) fn unfilled(index: usize, scorer: Scorer, outcome: MatchOutcome) -> Self {
        Self {
            index,
            filled_value: None,
            score: 0,
            matched_key: String::new(),
            scorer,
            outcome,
        }
    }

    pub(crate) fn filled(
        index: usize,
        scorer: Scorer,
        key: &str,
        score: u8,
        value: CellValue,
    ) -> Self {
        Self {
            index,
            filled_value: Some(value),
            score,
            matched_key: key.to_string(),
            scorer,
            outcome: MatchOutcome::Filled,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Filled)
    }
}

/// Counts describing one fill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSummary {
    pub total_rows: usize,
    /// Rows with a score above zero; the headline number of a run.
    pub matched_rows: usize,
    pub filled_rows: usize,
    pub prefilled_rows: usize,
    pub unmatched_rows: usize,
    pub reference_keys: usize,
    pub scorer: Scorer,
    pub threshold: u8,
    pub prevent_duplicates: bool,
}

impl FillSummary {
    pub fn from_results(results: &[MatchResult], reference_keys: usize, options: &MatchOptions) -> Self {
        let filled_rows = results.iter().filter(|r| r.is_filled()).count();
        let prefilled_rows = results
            .iter()
            .filter(|r| r.outcome == MatchOutcome::Prefilled)
            .count();
        Self {
            total_rows: results.len(),
            matched_rows: results.iter().filter(|r| r.score > 0).count(),
            filled_rows,
            prefilled_rows,
            unmatched_rows: results.len() - filled_rows - prefilled_rows,
            reference_keys,
            scorer: options.scorer,
            threshold: options.threshold,
            prevent_duplicates: options.prevent_duplicates,
        }
    }
}

/// Everything a fill run hands back to its caller.
#[derive(Debug, Clone)]
pub struct FillReport {
    pub table: Table,
    pub results: Vec<MatchResult>,
    pub summary: FillSummary,
}

/// Builds the output table: every target row in original order, the fill
/// column updated for filled rows, plus score, matched key and scorer
/// annotations.
///
/// Annotation columns that already exist in the target are overwritten.
pub fn assemble(targets: &Table, columns: &FillColumns, results: &[MatchResult]) -> Result<Table> {
    let fill_column = ColumnName::new(columns.target_fill.as_str())?;
    let score_column = ColumnName::new(SCORE_COLUMN)?;
    let key_column = ColumnName::new(MATCHED_KEY_COLUMN)?;
    let scorer_column = ColumnName::new(SCORER_COLUMN)?;

    let mut table = targets.clone();
    for column in [&fill_column, &score_column, &key_column, &scorer_column] {
        table.ensure_column(column);
    }

    for (row, result) in table.rows.iter_mut().zip(results) {
        debug_assert_eq!(row.index, result.index);
        match &result.filled_value {
            Some(value) => row.set(fill_column.clone(), value.clone()),
            None => {
                let current = row.get(fill_column.as_str()).clone();
                row.set(fill_column.clone(), current);
            }
        }
        row.set(score_column.clone(), CellValue::Integer(i64::from(result.score)));
        row.set(key_column.clone(), CellValue::text(result.matched_key.as_str()));
        row.set(scorer_column.clone(), CellValue::text(result.scorer.name()));
    }
    Ok(table)
}
