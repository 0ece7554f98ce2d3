//! CSV ingestion and export for fuzzyfill tables.
//!
//! Files are parsed with Polars and converted into [`fuzzyfill_model::Table`]
//! values; results are written back with the `csv` crate.

pub mod error;
pub mod frame;
pub mod reader;
pub mod writer;

pub use error::{IngestError, Result};
pub use frame::{any_to_cell, table_from_frame};
pub use reader::{IngestOptions, read_csv_table, read_csv_table_with_options};
pub use writer::{table_to_csv_string, write_csv, write_csv_table};
