use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::FixedOffset;

use super::{require_source, CellValue, GatewayError, Row, TableGateway};

/// Table store backed by a directory of delimited files: the source identifier is
/// the directory and each table lives in `<table>.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirectoryGateway {
    offset: FixedOffset,
}

impl CsvDirectoryGateway {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    fn table_path(&self, source_id: &str, table: &str) -> Result<PathBuf, GatewayError> {
        require_source(source_id, table)?;
        let path = Path::new(source_id).join(format!("{table}.csv"));
        if !path.is_file() {
            return Err(GatewayError::NotFound {
                source_id: source_id.to_string(),
                table: table.to_string(),
            });
        }
        Ok(path)
    }
}

impl TableGateway for CsvDirectoryGateway {
    fn fetch_table(&self, source_id: &str, table: &str) -> Result<Vec<Row>, GatewayError> {
        let path = self.table_path(source_id, table)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|raw| CellValue::infer(raw, self.offset))
                    .collect(),
            );
        }
        Ok(rows)
    }

    fn append_rows(&self, source_id: &str, table: &str, rows: &[Row]) -> Result<(), GatewayError> {
        if rows.is_empty() {
            return Ok(());
        }
        let path = self.table_path(source_id, table)?;

        let mut file = OpenOptions::new().read(true).write(true).open(path)?;
        let end = populated_len(&mut file)?;
        file.set_len(end)?;
        file.seek(SeekFrom::End(0))?;
        if end > 0 {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Byte length up to the end of the last populated row, ignoring trailing line breaks.
fn populated_len(file: &mut File) -> std::io::Result<u64> {
    let mut contents = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut contents)?;
    let end = contents
        .iter()
        .rposition(|byte| !matches!(byte, b'\n' | b'\r'))
        .map_or(0, |last| last + 1);
    Ok(end as u64)
}
