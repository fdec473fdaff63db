use thiserror::Error;

/// Raised when a raw input table does not satisfy its schema contract.
///
/// A schema failure is fatal to that table's vendor path only; the runner
/// keeps processing the other paths.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn { table: String, column: String },

    #[error("table `{table}` column `{column}` is not a string column")]
    ColumnType { table: String, column: String },
}

impl SchemaError {
    pub fn missing(table: &str, column: &str) -> SchemaError {
        SchemaError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}
