mod cell;
mod csv_directory;

pub use cell::{CellValue, Row};
pub use csv_directory::CsvDirectoryGateway;

use std::fmt::Debug;

/// Failures raised while reading from or appending to a tabular source.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no source identifier configured for table '{table}'")]
    Configuration { table: String },
    #[error("table '{table}' not found in source '{source_id}'")]
    NotFound { source_id: String, table: String },
    #[error("table store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed delimited table: {0}")]
    Csv(#[from] csv::Error),
}

/// Read-rows / write-rows collaborator fronting the external tabular store.
///
/// Each call is blocking and atomic from the caller's point of view. No retries are
/// attempted and a failed append may leave a partial write behind.
pub trait TableGateway: Debug {
    /// Every populated row of the table, header row included.
    fn fetch_table(&self, source_id: &str, table: &str) -> Result<Vec<Row>, GatewayError>;

    /// Appends `rows` after the last populated row; an empty slice is a no-op.
    fn append_rows(&self, source_id: &str, table: &str, rows: &[Row]) -> Result<(), GatewayError>;
}

pub(crate) fn require_source(source_id: &str, table: &str) -> Result<(), GatewayError> {
    if source_id.trim().is_empty() {
        return Err(GatewayError::Configuration {
            table: table.to_string(),
        });
    }
    Ok(())
}
