//! Tabular data model for the fuzzyfill engines.
//!
//! Both engines operate on a [`Table`]: an ordered list of columns and an
//! ordered list of [`Row`]s, each row holding a [`CellValue`] per column.
//! Parsing files into tables is the job of `fuzzyfill-ingest`; nothing in
//! this crate touches the filesystem.

#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod table;

pub use error::{ModelError, Result};
pub use ids::ColumnName;
pub use table::{CellValue, Row, Table, normalize_key};
