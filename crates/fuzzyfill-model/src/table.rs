#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use crate::{ColumnName, ModelError};

static MISSING: CellValue = CellValue::Missing;

/// A single scalar cell.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    #[default]
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for `Missing` and for NaN floats.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// True when the cell is missing or its text form is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.is_missing() || self.to_text().trim().is_empty()
    }

    /// String coercion used for match keys and exports.
    ///
    /// Missing values render as an empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(v) => v.to_string(),
            Self::Float(v) if v.is_nan() => String::new(),
            Self::Float(v) => v.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Missing => String::new(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Normalizes a match key: string coercion, trimmed, lower-cased.
pub fn normalize_key(value: &CellValue) -> String {
    value.to_text().trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    /// Stable ordinal of the row within its table.
    pub index: usize,
    pub cells: BTreeMap<ColumnName, CellValue>,
}

impl Row {
    pub fn new(index: usize, cells: BTreeMap<ColumnName, CellValue>) -> Self {
        Self { index, cells }
    }

    /// Returns the cell for `column`, or `Missing` when the row has none.
    ///
    /// `column` is normalized like a [`ColumnName`] before the lookup.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells
            .get(ColumnName::normalize(column))
            .unwrap_or(&MISSING)
    }

    pub fn set(&mut self, column: ColumnName, value: CellValue) {
        self.cells.insert(column, value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<ColumnName>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<ColumnName>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from column names and positional rows of cells.
    ///
    /// Rows shorter than the header are padded with `Missing`; extra cells are
    /// dropped.
    pub fn from_rows<I, R>(columns: &[&str], rows: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = CellValue>,
    {
        let columns = columns
            .iter()
            .map(|c| ColumnName::new(*c))
            .collect::<Result<Vec<_>, _>>()?;
        let mut table = Self::new(columns);
        for values in rows {
            let mut values = values.into_iter();
            let cells = table
                .columns
                .iter()
                .map(|col| (col.clone(), values.next().unwrap_or_default()))
                .collect();
            table.push_row(Row::new(table.rows.len(), cells));
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a column by name, normalized like a [`ColumnName`].
    pub fn column(&self, name: &str) -> Option<&ColumnName> {
        let name = ColumnName::normalize(name);
        self.columns.iter().find(|c| c.as_str() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Looks up a column that a run cannot proceed without.
    ///
    /// `table` names the table in the error ("target", "reference", ...).
    pub fn require_column(&self, name: &str, table: &str) -> Result<ColumnName, ModelError> {
        self.column(name).cloned().ok_or_else(|| ModelError::MissingColumn {
            column: ColumnName::normalize(name).to_string(),
            table: table.to_string(),
        })
    }

    /// Appends `name` to the column list if it is not already present.
    pub fn ensure_column(&mut self, name: &ColumnName) {
        if !self.columns.iter().any(|c| c == name) {
            self.columns.push(name.clone());
        }
    }

    /// Resets row ordinals to `0..len`.
    pub fn renumber(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.index = index;
        }
    }

    /// Values of `column` in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank() {
        assert!(CellValue::Missing.is_missing());
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert!(!CellValue::text("").is_missing());
        assert!(CellValue::text("  ").is_blank());
        assert!(!CellValue::Integer(0).is_blank());
    }

    #[test]
    fn text_coercion() {
        assert_eq!(CellValue::Integer(42).to_text(), "42");
        assert_eq!(CellValue::Float(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Float(10.0).to_text(), "10");
        assert_eq!(CellValue::Boolean(true).to_text(), "true");
        assert_eq!(CellValue::Missing.to_text(), "");
    }

    #[test]
    fn normalize_key_lowercases_and_trims() {
        assert_eq!(normalize_key(&CellValue::text("  Acme Corp ")), "acme corp");
        assert_eq!(normalize_key(&CellValue::Integer(7)), "7");
        assert_eq!(normalize_key(&CellValue::Missing), "");
    }

    #[test]
    fn padded_names_resolve_to_the_same_column() {
        let table = Table::from_rows(&["Region"], vec![vec![CellValue::text("keep")]]).unwrap();
        assert_eq!(table.rows[0].get(" Region "), &CellValue::text("keep"));
        assert_eq!(table.require_column("\u{feff}Region", "target").unwrap(), "Region");
        assert!(table.has_column("Region "));
    }

    #[test]
    fn absent_cell_reads_as_missing() {
        let table = Table::from_rows(&["A"], vec![vec![CellValue::text("x")]]).unwrap();
        assert_eq!(table.rows[0].get("B"), &CellValue::Missing);
        assert_eq!(table.rows[0].get("A"), &CellValue::text("x"));
    }
}
