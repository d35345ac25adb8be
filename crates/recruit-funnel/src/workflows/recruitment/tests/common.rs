use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::AppConfig;
use crate::workflows::recruitment::gateway::{
    require_source, CellValue, GatewayError, Row, TableGateway,
};

pub(super) const STORE_SOURCE: &str = "roster-book";
pub(super) const STORE_INFO_SOURCE: &str = "registry-book";
pub(super) const AR_SOURCE: &str = "applications-book";
pub(super) const OUTPUT_SOURCE: &str = "output-book";

pub(super) fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, 0)
        .expect("valid time")
}

pub(super) fn config() -> AppConfig {
    let pairs: HashMap<&str, &str> = HashMap::from([
        ("STORE", STORE_SOURCE),
        ("STORE_INFO", STORE_INFO_SOURCE),
        ("AR", AR_SOURCE),
        ("OUTPUT", OUTPUT_SOURCE),
    ]);
    AppConfig::from_lookup(|key| pairs.get(key).map(|value| value.to_string()))
        .expect("test config loads")
}

fn sparse_row(width: usize, cells: Vec<(usize, CellValue)>) -> Row {
    let mut row = vec![CellValue::Empty; width];
    for (index, value) in cells {
        row[index] = value;
    }
    row
}

pub(super) fn roster_row(name: &str, opened: Option<NaiveDateTime>) -> Row {
    let date = opened.map(CellValue::Date).unwrap_or_default();
    sparse_row(6, vec![(0, CellValue::from("S-001")), (2, name.into()), (4, date)])
}

pub(super) fn status_row(name: &str, status: &str) -> Row {
    sparse_row(8, vec![(2, name.into()), (7, status.into())])
}

/// Builder for one application log row.
#[derive(Debug, Clone)]
pub(super) struct CandidateRow {
    pub(super) applied_at: CellValue,
    pub(super) store: CellValue,
    pub(super) document_result: CellValue,
    pub(super) interview_result: CellValue,
    pub(super) offer_flag: CellValue,
    pub(super) joined_at: CellValue,
}

impl CandidateRow {
    pub(super) fn new(store: &str, applied_at: NaiveDateTime) -> Self {
        Self {
            applied_at: applied_at.into(),
            store: store.into(),
            document_result: CellValue::Empty,
            interview_result: CellValue::Empty,
            offer_flag: CellValue::Bool(false),
            joined_at: CellValue::Empty,
        }
    }

    pub(super) fn build(self) -> Row {
        sparse_row(
            80,
            vec![
                (0, self.applied_at),
                (12, self.store),
                (26, self.document_result),
                (63, self.interview_result),
                (74, self.offer_flag),
                (75, self.joined_at),
            ],
        )
    }
}

pub(super) fn header(width: usize) -> Row {
    (0..width)
        .map(|index| CellValue::Text(format!("column {index}")))
        .collect()
}

/// In-memory table store; clones share state so tests can inspect writes.
#[derive(Debug, Default, Clone)]
pub(super) struct MemoryGateway {
    tables: Arc<Mutex<HashMap<(String, String), Vec<Row>>>>,
    appends: Arc<Mutex<usize>>,
}

impl MemoryGateway {
    pub(super) fn with_table(self, source_id: &str, table: &str, rows: Vec<Row>) -> Self {
        self.tables
            .lock()
            .expect("table mutex poisoned")
            .insert((source_id.to_string(), table.to_string()), rows);
        self
    }

    pub(super) fn rows(&self, source_id: &str, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .expect("table mutex poisoned")
            .get(&(source_id.to_string(), table.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub(super) fn append_calls(&self) -> usize {
        *self.appends.lock().expect("append mutex poisoned")
    }
}

impl TableGateway for MemoryGateway {
    fn fetch_table(&self, source_id: &str, table: &str) -> Result<Vec<Row>, GatewayError> {
        require_source(source_id, table)?;
        self.tables
            .lock()
            .expect("table mutex poisoned")
            .get(&(source_id.to_string(), table.to_string()))
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                source_id: source_id.to_string(),
                table: table.to_string(),
            })
    }

    fn append_rows(&self, source_id: &str, table: &str, rows: &[Row]) -> Result<(), GatewayError> {
        if rows.is_empty() {
            return Ok(());
        }
        require_source(source_id, table)?;
        let mut tables = self.tables.lock().expect("table mutex poisoned");
        let target = tables
            .get_mut(&(source_id.to_string(), table.to_string()))
            .ok_or_else(|| GatewayError::NotFound {
                source_id: source_id.to_string(),
                table: table.to_string(),
            })?;
        target.extend(rows.iter().cloned());
        *self.appends.lock().expect("append mutex poisoned") += 1;
        Ok(())
    }
}

/// Gateway seeded with the tables the job reads plus an output table holding a header.
pub(super) fn seeded_gateway(roster: Vec<Row>, registry: Vec<Row>, applications: Vec<Row>) -> MemoryGateway {
    let mut roster_table = vec![header(6)];
    roster_table.extend(roster);
    let mut registry_table = vec![header(8)];
    registry_table.extend(registry);
    let mut application_table = vec![header(80)];
    application_table.extend(applications);

    MemoryGateway::default()
        .with_table(STORE_SOURCE, "stores", roster_table)
        .with_table(STORE_INFO_SOURCE, "store_info", registry_table)
        .with_table(AR_SOURCE, "applications", application_table)
        .with_table(OUTPUT_SOURCE, "output", vec![header(9)])
}
