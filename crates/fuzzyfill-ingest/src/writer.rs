//! CSV export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use fuzzyfill_model::{ColumnName, Table};

use crate::error::{IngestError, Result};

/// Writes the header row and one record per row; cells use their text form.
pub fn write_csv<W: Write>(writer: W, table: &Table) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.columns.iter().map(ColumnName::as_str))?;
    for row in &table.rows {
        writer.write_record(table.columns.iter().map(|col| row.get(col.as_str()).to_text()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `table` to `path`, replacing any existing file.
pub fn write_csv_table(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_csv(file, table).map_err(|e| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Renders `table` as a CSV string.
pub fn table_to_csv_string(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, table).map_err(|e| IngestError::CsvWrite {
        path: "<memory>".into(),
        message: e.to_string(),
    })?;
    String::from_utf8(buffer).map_err(|e| IngestError::CsvWrite {
        path: "<memory>".into(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use fuzzyfill_model::CellValue;

    use super::*;

    #[test]
    fn quotes_fields_with_commas() {
        let table = Table::from_rows(
            &["Name", "Hours"],
            vec![vec![CellValue::text("Acme, Inc."), CellValue::Float(2.5)]],
        )
        .unwrap();
        assert_eq!(
            table_to_csv_string(&table).unwrap(),
            "Name,Hours\n\"Acme, Inc.\",2.5\n"
        );
    }

    #[test]
    fn missing_cells_are_empty() {
        let table = Table::from_rows(&["A", "B"], vec![vec![CellValue::Integer(1)]]).unwrap();
        assert_eq!(table_to_csv_string(&table).unwrap(), "A,B\n1,\n");
    }
}
