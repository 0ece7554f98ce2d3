//! Polars DataFrame to [`Table`] conversion.

use std::collections::BTreeMap;

use fuzzyfill_model::{CellValue, ColumnName, Row, Table};
use polars::prelude::*;

use crate::error::Result;

/// Converts a Polars AnyValue to a [`CellValue`].
/// Nulls become `Missing`; integers and floats keep their numeric form.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Boolean(b) => CellValue::Boolean(b),
        AnyValue::Int8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int64(v) => CellValue::Integer(v),
        AnyValue::UInt8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Float(v as f64),
        },
        AnyValue::Float32(v) => CellValue::Float(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Float(v),
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::Text(s.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Builds a [`Table`] with the frame's columns, rows numbered from 0.
pub fn table_from_frame(df: &DataFrame) -> Result<Table> {
    let columns = df
        .get_columns()
        .iter()
        .map(|col| ColumnName::new(col.name().as_str()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new(columns);
    for row_idx in 0..df.height() {
        let mut cells = BTreeMap::new();
        for (name, col) in table.columns.iter().zip(df.get_columns()) {
            cells.insert(name.clone(), any_to_cell(col.get(row_idx)?));
        }
        table.push_row(Row::new(row_idx, cells));
    }
    Ok(table)
}
