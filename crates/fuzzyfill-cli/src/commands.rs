//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fuzzyfill_hours::{
    HoursColumns, HoursRules, assign_configured, load_rules, prepare, type_counts,
};
use fuzzyfill_ingest::{IngestOptions, read_csv_table, read_csv_table_with_options, write_csv_table};
use fuzzyfill_map::{FillColumns, FillEngine, FillSummary, MatchOptions, MatchResult};
use serde::Serialize;
use tracing::{info, trace};

use crate::cli::{FillArgs, HoursArgs, TypesArgs};
use crate::logging::redact_value;
use crate::types::{FillOutcome, HoursOutcome, TypesOutcome};

/// File name the hours command writes next to its input by default.
pub const HOURS_OUTPUT_NAME: &str = "data_with_hours.csv";

#[derive(Serialize)]
struct FillReportFile<'a> {
    summary: &'a FillSummary,
    rows: &'a [MatchResult],
}

pub fn run_fill(args: &FillArgs) -> Result<FillOutcome> {
    let mut columns = FillColumns::new(&args.target_key, &args.reference_key, &args.value);
    if let Some(fill_column) = &args.fill_column {
        columns = columns.with_target_fill(fill_column);
    }
    let options = MatchOptions::new(args.threshold, args.scorer, args.prevent_duplicates);
    let engine = FillEngine::new(columns, options).context("invalid fill configuration")?;

    let ingest = IngestOptions::default().with_infer_types(!args.no_infer_types);
    let targets = read_csv_table_with_options(&args.target, ingest)
        .with_context(|| format!("read target table {}", args.target.display()))?;
    let reference = read_csv_table_with_options(&args.reference, ingest)
        .with_context(|| format!("read reference table {}", args.reference.display()))?;

    let report = engine.run(&targets, &reference).context("fill run failed")?;
    for result in report.results.iter().filter(|result| result.is_filled()) {
        trace!(
            row = result.index,
            matched_key = redact_value(&result.matched_key),
            score = result.score,
            "row filled"
        );
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_fill_output(&args.target));
    write_csv_table(&output, &report.table)
        .with_context(|| format!("write {}", output.display()))?;

    if let Some(path) = &args.report {
        let file = FillReportFile {
            summary: &report.summary,
            rows: &report.results,
        };
        let json = serde_json::to_string_pretty(&file).context("serialize fill report")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    }
    info!(output = %output.display(), "filled table written");

    Ok(FillOutcome {
        output,
        report: args.report.clone(),
        summary: report.summary,
        results: report.results,
    })
}

pub fn run_hours(args: &HoursArgs) -> Result<HoursOutcome> {
    let mut rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => HoursRules::default(),
    };
    rules.extend(command_line_rules(args));
    rules.validate().context("invalid hours rules")?;

    let columns = hours_columns(&args.type_column, &args.name_column)
        .with_hours_column(args.hours_column.as_str());
    let table = read_csv_table(&args.input)
        .with_context(|| format!("read work list {}", args.input.display()))?;

    let report = assign_configured(&table, &columns, &rules)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_hours_output(&args.input));
    write_csv_table(&output, &report.table)
        .with_context(|| format!("write {}", output.display()))?;
    info!(output = %output.display(), "hours table written");

    Ok(HoursOutcome {
        output,
        summary: report.summary,
        keyword_rules: report.keyword_rules.len(),
        type_rules: report.type_rules,
    })
}

pub fn run_types(args: &TypesArgs) -> Result<TypesOutcome> {
    let columns = hours_columns(&args.type_column, &args.name_column);
    let table = read_csv_table(&args.input)
        .with_context(|| format!("read work list {}", args.input.display()))?;
    let prepared = prepare(&table, &columns)?;
    Ok(TypesOutcome {
        input: args.input.clone(),
        type_column: args.type_column.clone(),
        counts: type_counts(&prepared, &columns),
    })
}

/// Rules given as `--type-hours` and `--keyword` flags, in flag order.
fn command_line_rules(args: &HoursArgs) -> HoursRules {
    let mut rules = HoursRules::default();
    for (type_value, hours) in &args.type_hours {
        rules = rules.with_type(type_value.as_str(), *hours);
    }
    for (keyword, hours) in &args.keywords {
        rules = rules.with_keyword(keyword.as_str(), *hours);
    }
    rules
}

fn hours_columns(type_column: &str, name_column: &str) -> HoursColumns {
    HoursColumns::default()
        .with_type_column(type_column)
        .with_name_column(name_column)
}

/// `<stem>_filled.csv` in the target's directory.
pub fn default_fill_output(target: &Path) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "target".to_string());
    target.with_file_name(format!("{stem}_filled.csv"))
}

pub fn default_hours_output(input: &Path) -> PathBuf {
    input.with_file_name(HOURS_OUTPUT_NAME)
}
