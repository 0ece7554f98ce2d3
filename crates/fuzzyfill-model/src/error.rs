use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid column name: '{0}'")]
    InvalidColumnName(String),

    #[error("column '{column}' not found in {table} table")]
    MissingColumn { column: String, table: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
