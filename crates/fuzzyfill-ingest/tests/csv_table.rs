use std::io::Write;
use std::path::Path;

use fuzzyfill_ingest::{
    IngestError, IngestOptions, read_csv_table, read_csv_table_with_options, write_csv_table,
};
use fuzzyfill_model::CellValue;
use tempfile::{NamedTempFile, TempDir};

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_headers_values_and_missing() {
    let file = create_temp_csv("Name,Region,Count\nAcme Corp,EMEA,3\nGlobex,,4\n");
    let table = read_csv_table(file.path()).unwrap();

    let columns: Vec<&str> = table.columns.iter().map(|c| c.as_str()).collect();
    assert_eq!(columns, vec!["Name", "Region", "Count"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].get("Name"), &CellValue::text("Acme Corp"));
    assert_eq!(table.rows[0].get("Count"), &CellValue::Integer(3));
    assert!(table.rows[1].get("Region").is_missing());
}

#[test]
fn text_only_mode_keeps_leading_zeros() {
    let file = create_temp_csv("Code,Name\n007,Bond\n");
    let options = IngestOptions::default().with_infer_types(false);
    let table = read_csv_table_with_options(file.path(), options).unwrap();
    assert_eq!(table.rows[0].get("Code"), &CellValue::text("007"));
}

#[test]
fn missing_file_is_reported() {
    let err = read_csv_table(Path::new("/definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn written_table_reads_back() {
    let file = create_temp_csv("Type,Name\nA,\"urgent, call\"\nB,plan\n");
    let table = read_csv_table(file.path()).unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.csv");
    write_csv_table(&out, &table).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    assert_eq!(contents, "Type,Name\nA,\"urgent, call\"\nB,plan\n");
}
