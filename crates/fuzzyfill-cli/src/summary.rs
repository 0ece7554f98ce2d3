use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fuzzyfill_map::{MatchOutcome, Scorer};

use crate::types::{FillOutcome, HoursOutcome, TypesOutcome};

pub fn print_fill_summary(outcome: &FillOutcome) {
    let summary = &outcome.summary;
    println!("Output: {}", outcome.output.display());
    if let Some(path) = &outcome.report {
        println!("Report: {}", path.display());
    }
    println!(
        "Scorer: {}, threshold {}, duplicate prevention {}",
        summary.scorer,
        summary.threshold,
        if summary.prevent_duplicates { "on" } else { "off" }
    );

    let below_threshold = outcome
        .results
        .iter()
        .filter(|result| matches!(result.outcome, MatchOutcome::BelowThreshold { .. }))
        .count();
    let no_candidates = outcome
        .results
        .iter()
        .filter(|result| result.outcome == MatchOutcome::NoCandidates)
        .count();

    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Target rows"), Cell::new(summary.total_rows)]);
    table.add_row(vec![
        Cell::new("Already filled"),
        dim_or_plain(summary.prefilled_rows),
    ]);
    table.add_row(vec![
        Cell::new("Matched"),
        count_cell(summary.matched_rows, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Below threshold"),
        count_cell(below_threshold, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("No candidates left"),
        count_cell(no_candidates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Reference keys"),
        Cell::new(summary.reference_keys),
    ]);
    println!("{table}");
}

pub fn print_hours_summary(outcome: &HoursOutcome) {
    let summary = &outcome.summary;
    println!("Output: {}", outcome.output.display());
    println!(
        "Rows: {} read, {} dropped, {} written",
        summary.input_rows, summary.dropped_rows, summary.output_rows
    );
    println!(
        "Keyword rules: {} active, {} rows matched",
        outcome.keyword_rules, summary.keyword_matches
    );
    if outcome.type_rules.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Type"), header_cell("Hours")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for rule in &outcome.type_rules {
        let hours = if rule.hours > 0.0 {
            Cell::new(rule.hours)
        } else {
            dim_cell(rule.hours)
        };
        table.add_row(vec![Cell::new(&rule.type_value), hours]);
    }
    println!("{table}");
}

pub fn print_types(outcome: &TypesOutcome) {
    println!(
        "{} values in {}",
        outcome.type_column,
        outcome.input.display()
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell(&outcome.type_column), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (type_value, count) in &outcome.counts {
        table.add_row(vec![Cell::new(type_value), Cell::new(count)]);
    }
    println!("{table}");
}

pub fn print_scorers() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scorer"),
        header_cell("Name"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for scorer in Scorer::ALL {
        let label = scorer_argument(scorer);
        let cell = if scorer == Scorer::default() {
            Cell::new(format!("{label} (default)")).add_attribute(Attribute::Bold)
        } else {
            Cell::new(label)
        };
        table.add_row(vec![
            cell.fg(Color::Blue),
            Cell::new(scorer.name()),
            Cell::new(scorer.description()),
        ]);
    }
    println!("{table}");
}

/// Name accepted by `--scorer`.
fn scorer_argument(scorer: Scorer) -> String {
    scorer.name().to_lowercase().replace(' ', "-")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_or_plain(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scorer_arguments_parse_back() {
        for scorer in Scorer::ALL {
            assert_eq!(scorer_argument(scorer).parse::<Scorer>().unwrap(), scorer);
        }
    }
}
