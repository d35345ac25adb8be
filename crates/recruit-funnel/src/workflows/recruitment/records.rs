//! Typed views over the raw source tables.
//!
//! Column positions are fixed by the upstream sheets; each source has one mapping
//! table below and nothing past this module indexes raw rows.

use chrono::NaiveDateTime;

use super::domain::StageResult;
use super::gateway::{CellValue, Row};

/// Field name to 0-indexed column position.
pub type ColumnMap = &'static [(&'static str, usize)];

pub const STORE_ROSTER_COLUMNS: ColumnMap = &[("name", 2), ("open_date", 4)];

pub const STORE_STATUS_COLUMNS: ColumnMap = &[("name", 2), ("status", 7)];

pub const CANDIDATE_COLUMNS: ColumnMap = &[
    ("applied_at", 0),
    ("desired_location", 12),
    ("document_result", 26),
    ("interview_result", 63),
    ("offer_flag", 74),
    ("joined_at", 75),
];

/// Number of leading rows holding column titles.
const HEADER_ROWS: usize = 1;

static EMPTY: CellValue = CellValue::Empty;

struct RowView<'a> {
    row: &'a Row,
    columns: ColumnMap,
}

impl<'a> RowView<'a> {
    fn new(row: &'a Row, columns: ColumnMap) -> Self {
        Self { row, columns }
    }

    fn cell(&self, field: &str) -> &'a CellValue {
        let row: &'a Row = self.row;
        self.columns
            .iter()
            .find(|(name, _)| *name == field)
            .and_then(|(_, index)| row.get(*index))
            .unwrap_or(&EMPTY)
    }
}

fn data_rows(rows: &[Row]) -> impl Iterator<Item = &Row> {
    rows.iter().skip(HEADER_ROWS)
}

/// One line of the store roster.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRosterEntry {
    pub name: Option<String>,
    pub open_date: Option<NaiveDateTime>,
}

impl StoreRosterEntry {
    pub fn from_rows(rows: &[Row]) -> Vec<Self> {
        data_rows(rows)
            .map(|row| {
                let view = RowView::new(row, STORE_ROSTER_COLUMNS);
                Self {
                    name: view.cell("name").display_text(),
                    open_date: view.cell("open_date").as_date(),
                }
            })
            .collect()
    }
}

/// One line of the store status registry.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStatusEntry {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl StoreStatusEntry {
    pub fn from_rows(rows: &[Row]) -> Vec<Self> {
        data_rows(rows)
            .map(|row| {
                let view = RowView::new(row, STORE_STATUS_COLUMNS);
                Self {
                    name: view.cell("name").display_text(),
                    status: view.cell("status").as_text().map(str::to_string),
                }
            })
            .collect()
    }
}

/// The fields of one application log row that feed classification.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub applied_at: Option<NaiveDateTime>,
    pub desired_location: Option<String>,
    pub document_result: StageResult,
    pub interview_result: StageResult,
    pub offer_flagged: bool,
    pub joined_at: Option<NaiveDateTime>,
}

impl CandidateRecord {
    pub fn from_rows(rows: &[Row]) -> Vec<Self> {
        data_rows(rows)
            .map(|row| Self::from_view(&RowView::new(row, CANDIDATE_COLUMNS)))
            .collect()
    }

    fn from_view(view: &RowView<'_>) -> Self {
        Self {
            applied_at: view.cell("applied_at").as_date(),
            desired_location: view.cell("desired_location").display_text(),
            document_result: stage_result(view.cell("document_result")),
            interview_result: stage_result(view.cell("interview_result")),
            offer_flagged: matches!(view.cell("offer_flag"), CellValue::Bool(true)),
            joined_at: view.cell("joined_at").as_date(),
        }
    }
}

fn stage_result(cell: &CellValue) -> StageResult {
    match cell {
        CellValue::Empty => StageResult::Empty,
        CellValue::Text(value) => StageResult::from_marker(value),
        other => StageResult::Other(other.render()),
    }
}
