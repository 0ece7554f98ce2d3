//! Hours assignment engine.

use std::collections::{BTreeSet, HashMap};

use fuzzyfill_model::{CellValue, ColumnName, Table};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::rules::{HoursRules, KeywordRule, TypeRule, check_hours};

/// Column names read and written by the hours engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursColumns {
    pub type_column: String,
    pub name_column: String,
    pub hours_column: String,
}

impl Default for HoursColumns {
    fn default() -> Self {
        Self {
            type_column: "Type".to_string(),
            name_column: "Name".to_string(),
            hours_column: "Hours".to_string(),
        }
    }
}

impl HoursColumns {
    #[must_use]
    pub fn with_type_column(mut self, column: impl Into<String>) -> Self {
        self.type_column = column.into();
        self
    }

    #[must_use]
    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }

    #[must_use]
    pub fn with_hours_column(mut self, column: impl Into<String>) -> Self {
        self.hours_column = column.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    pub input_rows: usize,
    /// Rows dropped for a blank type or name.
    pub dropped_rows: usize,
    pub output_rows: usize,
    /// Rows whose type had a rule.
    pub type_matches: usize,
    /// Rows hit by at least one keyword rule.
    pub keyword_matches: usize,
}

#[derive(Debug, Clone)]
pub struct HoursReport {
    pub table: Table,
    pub summary: HoursSummary,
    /// Type rules as applied, in application order.
    pub type_rules: Vec<TypeRule>,
    /// Keyword rules as applied, in application order.
    pub keyword_rules: Vec<KeywordRule>,
}

/// Drops rows with a blank type or name, renumbers the rest from 0 and
/// makes sure the hours column exists.
///
/// A new hours column starts at 0 for every row; an existing one keeps its
/// values.
pub fn prepare(table: &Table, columns: &HoursColumns) -> Result<Table> {
    let type_column = table.require_column(&columns.type_column, "input")?;
    let name_column = table.require_column(&columns.name_column, "input")?;
    let hours_column = ColumnName::new(columns.hours_column.as_str())?;

    let mut prepared = table.clone();
    prepared.rows.retain(|row| {
        !row.get(type_column.as_str()).is_blank() && !row.get(name_column.as_str()).is_blank()
    });
    prepared.renumber();

    if !prepared.has_column(hours_column.as_str()) {
        prepared.ensure_column(&hours_column);
        for row in &mut prepared.rows {
            row.set(hours_column.clone(), CellValue::Float(0.0));
        }
    }
    Ok(prepared)
}

/// Distinct type values with their row counts, in first-seen order.
pub fn type_counts(table: &Table, columns: &HoursColumns) -> Vec<(String, usize)> {
    let mut order = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in table.column_values(&columns.type_column) {
        if value.is_blank() {
            continue;
        }
        let type_value = value.to_text();
        let count = counts.entry(type_value.clone()).or_insert_with(|| {
            order.push(type_value);
            0
        });
        *count += 1;
    }
    order
        .into_iter()
        .map(|type_value| {
            let count = counts.get(&type_value).copied().unwrap_or_default();
            (type_value, count)
        })
        .collect()
}

/// Distinct type values in first-seen order.
pub fn observed_types(table: &Table, columns: &HoursColumns) -> Vec<String> {
    type_counts(table, columns)
        .into_iter()
        .map(|(type_value, _)| type_value)
        .collect()
}

/// Applies type rules, then keyword rules in order, to a prepared table.
///
/// Returns the number of rows matched by type rules and by any keyword rule.
pub fn apply_rules(
    table: &mut Table,
    columns: &HoursColumns,
    type_rules: &[TypeRule],
    keyword_rules: &[KeywordRule],
) -> Result<(usize, usize)> {
    let hours_column = ColumnName::new(columns.hours_column.as_str())?;

    let mut type_rows = BTreeSet::new();
    for rule in type_rules {
        let mut matched = 0usize;
        for row in &mut table.rows {
            if row.get(&columns.type_column).to_text() == rule.type_value {
                row.set(hours_column.clone(), CellValue::Float(rule.hours));
                type_rows.insert(row.index);
                matched += 1;
            }
        }
        debug!(type_value = %rule.type_value, hours = rule.hours, matched, "type rule applied");
    }

    let mut keyword_rows = BTreeSet::new();
    for rule in keyword_rules {
        let needle = rule.keyword.to_lowercase();
        let mut matched = 0usize;
        for row in &mut table.rows {
            let name = row.get(&columns.name_column).to_text().to_lowercase();
            if name.contains(&needle) {
                row.set(hours_column.clone(), CellValue::Float(rule.hours));
                keyword_rows.insert(row.index);
                matched += 1;
            }
        }
        debug!(keyword = %rule.keyword, hours = rule.hours, matched, "keyword rule applied");
    }

    Ok((type_rows.len(), keyword_rows.len()))
}

/// Runs the whole assignment with explicit rule lists.
///
/// Rule hours are validated before any row is touched.
pub fn assign(
    table: &Table,
    columns: &HoursColumns,
    type_rules: &[TypeRule],
    keyword_rules: &[KeywordRule],
) -> Result<HoursReport> {
    for rule in type_rules {
        check_hours(|| format!("type '{}'", rule.type_value), rule.hours)?;
    }
    for rule in keyword_rules {
        check_hours(|| format!("keyword '{}'", rule.keyword), rule.hours)?;
    }

    let span = info_span!(
        "hours",
        type_rules = type_rules.len(),
        keyword_rules = keyword_rules.len()
    );
    let _guard = span.enter();

    let mut prepared = prepare(table, columns)?;
    let (type_matches, keyword_matches) =
        apply_rules(&mut prepared, columns, type_rules, keyword_rules)?;

    let summary = HoursSummary {
        input_rows: table.len(),
        dropped_rows: table.len() - prepared.len(),
        output_rows: prepared.len(),
        type_matches,
        keyword_matches,
    };
    info!(
        input_rows = summary.input_rows,
        dropped_rows = summary.dropped_rows,
        type_matches = summary.type_matches,
        keyword_matches = summary.keyword_matches,
        "hours assigned"
    );
    Ok(HoursReport {
        table: prepared,
        summary,
        type_rules: type_rules.to_vec(),
        keyword_rules: keyword_rules.to_vec(),
    })
}

/// Runs the assignment from configured rules: every observed type gets a
/// rule (0 hours unless configured) and inactive keyword rules are skipped.
pub fn assign_configured(
    table: &Table,
    columns: &HoursColumns,
    rules: &HoursRules,
) -> Result<HoursReport> {
    rules.validate()?;
    let observed = observed_types(&prepare(table, columns)?, columns);
    let type_rules = rules.type_rules(&observed);
    let keyword_rules = rules.keyword_rules();
    assign(table, columns, &type_rules, &keyword_rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str)]) -> Table {
        Table::from_rows(
            &["Type", "Name"],
            data.iter()
                .map(|(t, n)| vec![CellValue::text(*t), CellValue::text(*n)]),
        )
        .unwrap()
    }

    #[test]
    fn type_counts_in_first_seen_order() {
        let table = rows(&[("B", "x"), ("A", "y"), ("B", "z"), ("", "w")]);
        assert_eq!(
            type_counts(&table, &HoursColumns::default()),
            vec![("B".to_string(), 2), ("A".to_string(), 1)]
        );
    }

    #[test]
    fn prepare_adds_zero_hours() {
        let prepared = prepare(&rows(&[("A", "x")]), &HoursColumns::default()).unwrap();
        assert_eq!(prepared.rows[0].get("Hours"), &CellValue::Float(0.0));
    }

    #[test]
    fn type_match_is_case_sensitive() {
        let report = assign(
            &rows(&[("A", "x"), ("a", "y")]),
            &HoursColumns::default(),
            &[TypeRule::new("A", 10.0)],
            &[],
        )
        .unwrap();
        assert_eq!(report.table.rows[0].get("Hours"), &CellValue::Float(10.0));
        assert_eq!(report.table.rows[1].get("Hours"), &CellValue::Float(0.0));
        assert_eq!(report.summary.type_matches, 1);
    }
}
