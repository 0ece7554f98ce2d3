//! Greedy fill engine.
//!
//! Target rows are processed in their original order. Each row that lacks a
//! value takes the best-scoring available reference key when that score
//! reaches the threshold. With duplicate prevention on, the winning key is
//! consumed and no later row can use it, so earlier rows win contested keys
//! even when a later row would have scored higher. The consumed set is
//! threaded through [`match_row`] explicitly.

use fuzzyfill_model::{ColumnName, Table, normalize_key};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::error::{MatchError, Result};
use crate::pool::{ConsumedKeys, ReferencePool};
use crate::result::{FillReport, FillSummary, MatchOutcome, MatchResult, assemble};
use crate::scorer::Scorer;

/// Default minimum score for accepting a match.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Options controlling a fill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Minimum score (0 to 100) a candidate needs to fill a row.
    pub threshold: u8,
    /// Similarity strategy used for every comparison of the run.
    pub scorer: Scorer,
    /// Whether each reference key may fill at most one row.
    pub prevent_duplicates: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scorer: Scorer::default(),
            prevent_duplicates: false,
        }
    }
}

impl MatchOptions {
    pub fn new(threshold: u8, scorer: Scorer, prevent_duplicates: bool) -> Self {
        Self {
            threshold,
            scorer,
            prevent_duplicates,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_prevent_duplicates(mut self, enable: bool) -> Self {
        self.prevent_duplicates = enable;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold > 100 {
            return Err(MatchError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Column names a fill run reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillColumns {
    /// Match key column in the target table.
    pub target_key: String,
    /// Column of the target table that gets filled; created when absent.
    pub target_fill: String,
    /// Match key column in the reference table.
    pub reference_key: String,
    /// Payload column in the reference table.
    pub reference_value: String,
}

impl FillColumns {
    /// Fills a target column named like the reference payload column.
    pub fn new(
        target_key: impl Into<String>,
        reference_key: impl Into<String>,
        reference_value: impl Into<String>,
    ) -> Self {
        let reference_value = reference_value.into();
        Self {
            target_key: target_key.into(),
            target_fill: reference_value.clone(),
            reference_key: reference_key.into(),
            reference_value,
        }
    }

    #[must_use]
    pub fn with_target_fill(mut self, column: impl Into<String>) -> Self {
        self.target_fill = column.into();
        self
    }

    /// Returns the names as column names: trimmed, and rejected when blank.
    fn normalized(self) -> Result<Self> {
        let normalize = |name: String| -> Result<String> {
            Ok(ColumnName::new(name)?.as_str().to_string())
        };
        Ok(Self {
            target_key: normalize(self.target_key)?,
            target_fill: normalize(self.target_fill)?,
            reference_key: normalize(self.reference_key)?,
            reference_value: normalize(self.reference_value)?,
        })
    }
}

/// A target row reduced to what matching needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRecord {
    pub index: usize,
    /// Normalized match key.
    pub key: String,
    /// Whether the fill column already holds a value.
    pub has_value: bool,
}

impl TargetRecord {
    pub fn new(index: usize, key: &str, has_value: bool) -> Self {
        Self {
            index,
            key: key.trim().to_lowercase(),
            has_value,
        }
    }

    /// Extracts records from the target table; fails if the key column is
    /// missing.
    pub fn from_table(targets: &Table, columns: &FillColumns) -> Result<Vec<Self>> {
        let key_column = targets.require_column(&columns.target_key, "target")?;
        let fill_column = ColumnName::new(columns.target_fill.as_str())?;
        Ok(targets
            .rows
            .iter()
            .map(|row| Self {
                index: row.index,
                key: normalize_key(row.get(key_column.as_str())),
                has_value: !row.get(fill_column.as_str()).is_missing(),
            })
            .collect())
    }
}

/// A scored reference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub key: &'a str,
    pub score: u8,
}

/// Highest-scoring candidate; the earliest one wins ties.
pub fn best_match<'a>(key: &str, candidates: &[&'a str], scorer: Scorer) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;
    for &candidate in candidates {
        let score = scorer.score(key, candidate);
        if best.is_none_or(|current| score > current.score) {
            best = Some(Candidate {
                key: candidate,
                score,
            });
            if score == 100 {
                break;
            }
        }
    }
    best
}

/// Processes a single row against the pool.
///
/// Takes the consumed set as it stands before this row and returns it as it
/// stands after; only a successful fill with duplicate prevention on adds
/// to it.
pub fn match_row(
    record: &TargetRecord,
    pool: &ReferencePool,
    consumed: ConsumedKeys,
    options: &MatchOptions,
) -> (MatchResult, ConsumedKeys) {
    let scorer = options.scorer;
    if record.has_value {
        return (
            MatchResult::unfilled(record.index, scorer, MatchOutcome::Prefilled),
            consumed,
        );
    }

    let available = pool.available_keys(&consumed, options.prevent_duplicates);
    let Some(best) = best_match(&record.key, &available, scorer) else {
        return (
            MatchResult::unfilled(record.index, scorer, MatchOutcome::NoCandidates),
            consumed,
        );
    };

    if best.score < options.threshold {
        let outcome = MatchOutcome::BelowThreshold {
            best_key: best.key.to_string(),
            best_score: best.score,
        };
        return (MatchResult::unfilled(record.index, scorer, outcome), consumed);
    }

    let value = pool.value(best.key).cloned().unwrap_or_default();
    let result = MatchResult::filled(record.index, scorer, best.key, best.score, value);
    let consumed = if options.prevent_duplicates {
        consumed.consume(best.key)
    } else {
        consumed
    };
    (result, consumed)
}

/// Runs [`match_row`] over every record in order, starting from an empty
/// consumed set.
pub fn fill_missing(
    records: &[TargetRecord],
    pool: &ReferencePool,
    options: &MatchOptions,
) -> Result<Vec<MatchResult>> {
    options.validate()?;
    let mut consumed = ConsumedKeys::new();
    let mut results = Vec::with_capacity(records.len());
    for record in records {
        let (result, next) = match_row(record, pool, consumed, options);
        consumed = next;
        debug!(
            row = result.index,
            score = result.score,
            outcome = result.outcome.label(),
            "row processed"
        );
        results.push(result);
    }
    Ok(results)
}

/// Configured fill run over a target and a reference table.
#[derive(Debug, Clone)]
pub struct FillEngine {
    columns: FillColumns,
    options: MatchOptions,
}

impl FillEngine {
    /// Validates options and column names up front.
    pub fn new(columns: FillColumns, options: MatchOptions) -> Result<Self> {
        options.validate()?;
        let columns = columns.normalized()?;
        Ok(Self { columns, options })
    }

    pub fn columns(&self) -> &FillColumns {
        &self.columns
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Fills missing target values from the reference table.
    ///
    /// Missing key or payload columns are reported before any row is
    /// processed.
    pub fn run(&self, targets: &Table, reference: &Table) -> Result<FillReport> {
        let span = info_span!(
            "fill",
            scorer = %self.options.scorer,
            threshold = self.options.threshold,
            prevent_duplicates = self.options.prevent_duplicates
        );
        let _guard = span.enter();

        let pool = ReferencePool::build(
            reference,
            &self.columns.reference_key,
            &self.columns.reference_value,
        )?;
        let records = TargetRecord::from_table(targets, &self.columns)?;
        debug!(
            target_rows = records.len(),
            reference_keys = pool.len(),
            "reference pool built"
        );

        let results = fill_missing(&records, &pool, &self.options)?;
        let table = assemble(targets, &self.columns, &results)?;
        let summary = FillSummary::from_results(&results, pool.len(), &self.options);
        info!(
            total_rows = summary.total_rows,
            matched_rows = summary.matched_rows,
            prefilled_rows = summary.prefilled_rows,
            unmatched_rows = summary.unmatched_rows,
            "fill run complete"
        );
        Ok(FillReport {
            table,
            results,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, key: &str) -> TargetRecord {
        TargetRecord::new(index, key, false)
    }

    #[test]
    fn best_match_first_hit_wins_ties() {
        let candidates = ["acme corp", "corp acme"];
        let best = best_match("acme corp", &candidates, Scorer::TokenSort).unwrap();
        assert_eq!(best.key, "acme corp");

        let candidates = ["corp acme", "acme corp"];
        let best = best_match("acme corp", &candidates, Scorer::TokenSort).unwrap();
        assert_eq!(best.key, "corp acme");
        assert_eq!(best.score, 100);
    }

    #[test]
    fn best_match_empty_candidates() {
        assert_eq!(best_match("acme", &[], Scorer::Ratio), None);
    }

    #[test]
    fn match_row_threads_consumed_set() {
        let pool = ReferencePool::from_entries(vec![("acme", "X")]);
        let options = MatchOptions::new(80, Scorer::Ratio, true);

        let (first, consumed) = match_row(&record(0, "acme"), &pool, ConsumedKeys::new(), &options);
        assert!(first.is_filled());
        assert!(consumed.contains("acme"));

        let (second, consumed) = match_row(&record(1, "acme"), &pool, consumed, &options);
        assert_eq!(second.outcome, MatchOutcome::NoCandidates);
        assert_eq!(consumed.len(), 1);
    }

    #[test]
    fn match_row_without_prevention_leaves_set_untouched() {
        let pool = ReferencePool::from_entries(vec![("acme", "X")]);
        let options = MatchOptions::new(80, Scorer::Ratio, false);
        let (result, consumed) = match_row(&record(0, "acme"), &pool, ConsumedKeys::new(), &options);
        assert!(result.is_filled());
        assert!(consumed.is_empty());
    }

    #[test]
    fn below_threshold_records_best_candidate() {
        let pool = ReferencePool::from_entries(vec![("globex", "G")]);
        let options = MatchOptions::new(80, Scorer::Ratio, false);
        let (result, _) = match_row(&record(0, "acme"), &pool, ConsumedKeys::new(), &options);
        assert_eq!(result.score, 0);
        assert!(result.matched_key.is_empty());
        assert!(matches!(
            result.outcome,
            MatchOutcome::BelowThreshold { ref best_key, .. } if best_key == "globex"
        ));
    }

    #[test]
    fn invalid_threshold_rejected_before_run() {
        let pool = ReferencePool::default();
        let options = MatchOptions::default().with_threshold(101);
        assert_eq!(
            fill_missing(&[record(0, "a")], &pool, &options),
            Err(MatchError::InvalidThreshold(101))
        );
    }

    #[test]
    fn engine_keeps_normalized_column_names() {
        let columns = FillColumns::new(" key", "key ", "value").with_target_fill("\u{feff}Region ");
        let engine = FillEngine::new(columns, MatchOptions::default()).unwrap();
        assert_eq!(engine.columns().target_key, "key");
        assert_eq!(engine.columns().reference_key, "key");
        assert_eq!(engine.columns().target_fill, "Region");
    }

    #[test]
    fn blank_column_name_rejected() {
        let columns = FillColumns::new("name", "name", "value").with_target_fill("  ");
        assert!(FillEngine::new(columns, MatchOptions::default()).is_err());
    }
}
