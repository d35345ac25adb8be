use chrono::{Months, NaiveDateTime, Utc};
use tracing::{debug, info};

use super::aggregator::{AggregationStats, MetricsAggregator};
use super::eligibility::StoreEligibilityResolver;
use super::formatter::format_rows;
use super::gateway::{GatewayError, Row, TableGateway};
use super::records::CandidateRecord;
use crate::config::{AppConfig, ReportWindowConfig, SourceConfig, TableNames};

/// What a single run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported { rows: usize },
    NothingToExport,
}

/// Error raised by the export job; every variant aborts the run before output is written.
#[derive(Debug, thiserror::Error)]
pub enum FunnelExportError {
    #[error("failed to read table '{table}': {source}")]
    Fetch {
        table: String,
        #[source]
        source: GatewayError,
    },
    #[error("failed to append to table '{table}': {source}")]
    Append {
        table: String,
        #[source]
        source: GatewayError,
    },
}

/// Start of the recency window: `months` calendar months before `now`, clamped to
/// the end of shorter months.
pub fn window_start(now: NaiveDateTime, months: u32) -> NaiveDateTime {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Gateway fetch, eligibility, aggregation, formatting and write-back in one pass.
#[derive(Debug)]
pub struct FunnelExportJob {
    gateway: Box<dyn TableGateway>,
    sources: SourceConfig,
    tables: TableNames,
    window: ReportWindowConfig,
    resolver: StoreEligibilityResolver,
}

impl FunnelExportJob {
    pub fn new(config: &AppConfig, gateway: Box<dyn TableGateway>) -> Self {
        Self {
            gateway,
            sources: config.sources.clone(),
            tables: config.tables.clone(),
            window: config.window,
            resolver: StoreEligibilityResolver::new(),
        }
    }

    /// Runs against the current civil time in the configured offset.
    pub fn run(&self) -> Result<ExportOutcome, FunnelExportError> {
        let now = Utc::now()
            .with_timezone(&self.window.utc_offset)
            .naive_local();
        self.run_at(now)
    }

    /// Runs as if the clock read `now`; it is both the window end and the row timestamp.
    pub fn run_at(&self, now: NaiveDateTime) -> Result<ExportOutcome, FunnelExportError> {
        let since = window_start(now, self.window.lookback_months);
        info!(%since, "aggregating recruitment funnel");

        let store_rows = self.fetch(&self.sources.store, &self.tables.store)?;
        let store_info_rows = self.fetch(&self.sources.store_info, &self.tables.store_info)?;
        let application_rows = self.fetch(&self.sources.applications, &self.tables.applications)?;

        let mut stores = self.resolver.resolve(&store_rows, &store_info_rows);
        debug!(eligible = stores.len(), "resolved eligible stores");
        if stores.is_empty() {
            info!("nothing to export: no eligible stores");
            return Ok(ExportOutcome::NothingToExport);
        }

        let candidates = CandidateRecord::from_rows(&application_rows);
        let stats: AggregationStats =
            MetricsAggregator::new(since).aggregate(&candidates, &mut stores);
        debug!(?stats, "aggregated application log");
        if stats.counted == 0 {
            info!("nothing to export: no qualifying applications");
            return Ok(ExportOutcome::NothingToExport);
        }

        let rows: Vec<Row> = format_rows(&stores, now)
            .iter()
            .map(|row| row.to_cells())
            .collect();
        self.gateway
            .append_rows(&self.sources.output, &self.tables.output, &rows)
            .map_err(|source| FunnelExportError::Append {
                table: self.tables.output.clone(),
                source,
            })?;

        info!(rows = rows.len(), "exported {} rows", rows.len());
        Ok(ExportOutcome::Exported { rows: rows.len() })
    }

    fn fetch(&self, source_id: &str, table: &str) -> Result<Vec<Row>, FunnelExportError> {
        self.gateway
            .fetch_table(source_id, table)
            .map_err(|source| FunnelExportError::Fetch {
                table: table.to_string(),
                source,
            })
    }
}
