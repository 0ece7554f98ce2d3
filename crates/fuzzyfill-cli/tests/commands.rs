//! End-to-end runs of the subcommands against files in a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use fuzzyfill_cli::cli::{FillArgs, HoursArgs, TypesArgs};
use fuzzyfill_cli::commands::{run_fill, run_hours, run_types};
use fuzzyfill_hours::TypeRule;
use fuzzyfill_ingest::read_csv_table;
use fuzzyfill_map::{DEFAULT_THRESHOLD, Scorer};
use fuzzyfill_model::{CellValue, Table};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn column_text(table: &Table, column: &str) -> Vec<String> {
    table.column_values(column).map(CellValue::to_text).collect()
}

fn fill_args(target: PathBuf, reference: PathBuf) -> FillArgs {
    FillArgs {
        target,
        reference,
        target_key: "name".to_string(),
        reference_key: "company".to_string(),
        value: "region".to_string(),
        fill_column: None,
        threshold: DEFAULT_THRESHOLD,
        scorer: Scorer::default(),
        prevent_duplicates: false,
        no_infer_types: false,
        output: None,
        report: None,
    }
}

fn hours_args(input: PathBuf) -> HoursArgs {
    HoursArgs {
        input,
        rules: None,
        type_hours: Vec::new(),
        keywords: Vec::new(),
        type_column: "Type".to_string(),
        name_column: "Name".to_string(),
        hours_column: "Hours".to_string(),
        output: None,
    }
}

#[test]
fn fill_writes_default_output_and_report() {
    let dir = TempDir::new().unwrap();
    let target = write_file(
        dir.path(),
        "companies.csv",
        "name,region\nAcme Corp,\nGlobex,EU\nInitech,\n",
    );
    let reference = write_file(
        dir.path(),
        "regions.csv",
        "company,region\n ACME CORP ,US\ninitech,APAC\n",
    );
    let report_path = dir.path().join("report.json");

    let mut args = fill_args(target, reference);
    args.report = Some(report_path.clone());
    let outcome = run_fill(&args).unwrap();

    assert_eq!(outcome.output, dir.path().join("companies_filled.csv"));
    assert_eq!(outcome.summary.matched_rows, 2);
    assert_eq!(outcome.summary.prefilled_rows, 1);

    let written = read_csv_table(&outcome.output).unwrap();
    assert_eq!(column_text(&written, "region"), vec!["US", "EU", "APAC"]);
    assert_eq!(column_text(&written, "match_score"), vec!["100", "0", "100"]);
    assert_eq!(
        column_text(&written, "matched_key"),
        vec!["acme corp", "", "initech"]
    );

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["summary"]["matched_rows"], 2);
    assert_eq!(report["summary"]["scorer"], "Weighted Ratio");
    assert_eq!(report["rows"].as_array().map(Vec::len), Some(3));
}

#[test]
fn fill_reports_missing_key_column() {
    let dir = TempDir::new().unwrap();
    let target = write_file(dir.path(), "t.csv", "name,region\nAcme,\n");
    let reference = write_file(dir.path(), "r.csv", "company,region\nacme,US\n");

    let mut args = fill_args(target, reference);
    args.target_key = "customer".to_string();
    let err = run_fill(&args).unwrap_err();
    assert!(format!("{err:#}").contains("customer"));
    assert!(!dir.path().join("t_filled.csv").exists());
}

#[test]
fn hours_combines_file_and_command_line_rules() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "work.csv",
        "Type,Name\nA,urgent fix\nB,plan review\n,orphan\nA,docs\n",
    );
    let rules = write_file(
        dir.path(),
        "rules.toml",
        "[types]\nA = 10\n\n[[keywords]]\nkeyword = \"review\"\nhours = 2\n",
    );

    let mut args = hours_args(input);
    args.rules = Some(rules);
    args.keywords = vec![("URGENT".to_string(), 99.0)];
    let outcome = run_hours(&args).unwrap();

    assert_eq!(outcome.output, dir.path().join("data_with_hours.csv"));
    assert_eq!(outcome.summary.dropped_rows, 1);
    assert_eq!(outcome.keyword_rules, 2);
    assert_eq!(
        outcome.type_rules,
        vec![TypeRule::new("A", 10.0), TypeRule::new("B", 0.0)]
    );

    let written = read_csv_table(&outcome.output).unwrap();
    assert_eq!(column_text(&written, "Name"), vec!["urgent fix", "plan review", "docs"]);
    assert_eq!(column_text(&written, "Hours"), vec!["99", "2", "10"]);
}

#[test]
fn hours_rejects_negative_command_line_hours() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "work.csv", "Type,Name\nA,x\n");

    let mut args = hours_args(input);
    args.type_hours = vec![("A".to_string(), -1.0)];
    assert!(run_hours(&args).is_err());
    assert!(!dir.path().join("data_with_hours.csv").exists());
}

#[test]
fn types_lists_counts_in_first_seen_order() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "work.csv",
        "Type,Name\nB,one\nA,two\nB,three\nC,\n",
    );
    let outcome = run_types(&TypesArgs {
        input,
        type_column: "Type".to_string(),
        name_column: "Name".to_string(),
    })
    .unwrap();
    assert_eq!(
        outcome.counts,
        vec![("B".to_string(), 2), ("A".to_string(), 1)]
    );
}
