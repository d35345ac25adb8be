//! Recruitment funnel metrics per opened, actively recruiting store.

pub mod aggregator;
pub mod domain;
pub mod eligibility;
pub mod export;
pub mod formatter;
pub mod gateway;
pub mod records;

#[cfg(test)]
mod tests;

pub use aggregator::{classify, AggregationStats, MetricsAggregator};
pub use domain::{
    EligibleStore, EligibleStores, FunnelStage, Metrics, OutputRow, StageResult,
    DECLINE_MARKER, OPEN_STATUS, PASS_MARKER, REJECT_MARKER,
};
pub use eligibility::{OpenDateIndex, StoreEligibilityResolver};
pub use export::{window_start, ExportOutcome, FunnelExportError, FunnelExportJob};
pub use formatter::{compare_store_names, format_rows};
pub use gateway::{CellValue, CsvDirectoryGateway, GatewayError, Row, TableGateway};
pub use records::{CandidateRecord, StoreRosterEntry, StoreStatusEntry};
