//! CSV file reading.

use std::path::Path;

use fuzzyfill_model::Table;
use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::frame::table_from_frame;

/// Rows sampled for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Options for reading CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Infer numeric and boolean columns; when false every column is text.
    pub infer_types: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { infer_types: true }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_infer_types(mut self, enable: bool) -> Self {
        self.infer_types = enable;
        self
    }
}

/// Reads a CSV file with a header row into a [`Table`].
pub fn read_csv_table(path: &Path) -> Result<Table> {
    read_csv_table_with_options(path, IngestOptions::default())
}

/// Reads a CSV file with a header row into a [`Table`].
///
/// Empty fields become `Missing`.
pub fn read_csv_table_with_options(path: &Path, options: IngestOptions) -> Result<Table> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let infer_schema_length = if options.infer_types {
        Some(INFER_SCHEMA_ROWS)
    } else {
        Some(0)
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let table = table_from_frame(&df)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        "csv loaded"
    );
    Ok(table)
}
