use std::collections::HashMap;

use chrono::NaiveDateTime;

/// Store name keyed collection of eligible stores; key order carries no meaning.
pub type EligibleStores = HashMap<String, EligibleStore>;

/// A store that is both opened and actively recruiting, plus its running counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleStore {
    pub name: String,
    pub open_date: NaiveDateTime,
    pub metrics: Metrics,
}

impl EligibleStore {
    pub fn new(name: impl Into<String>, open_date: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            open_date,
            metrics: Metrics::default(),
        }
    }
}

/// Funnel counters for one store.
///
/// `applied` counts every qualifying candidate; each candidate lands in at most one
/// of the remaining buckets, so their sum never exceeds `applied`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub applied: u32,
    pub in_process: u32,
    pub rejected: u32,
    pub declined: u32,
    pub offer: u32,
    pub joined: u32,
}

impl Metrics {
    pub fn record(&mut self, stage: FunnelStage) {
        self.applied += 1;
        match stage {
            FunnelStage::Joined => self.joined += 1,
            FunnelStage::Offer => self.offer += 1,
            FunnelStage::Declined => self.declined += 1,
            FunnelStage::Rejected => self.rejected += 1,
            FunnelStage::InProcess => self.in_process += 1,
            FunnelStage::Unclassified => {}
        }
    }

    /// Candidates counted as applied but in none of the five stage buckets.
    pub fn unclassified(&self) -> u32 {
        let bucketed = [
            self.in_process,
            self.rejected,
            self.declined,
            self.offer,
            self.joined,
        ]
        .into_iter()
        .fold(0u32, u32::saturating_add);
        self.applied.saturating_sub(bucketed)
    }
}

/// The single stage a qualifying candidate is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunnelStage {
    Joined,
    Offer,
    Declined,
    Rejected,
    InProcess,
    /// Applied, but a screening result holds a value outside the known markers.
    Unclassified,
}

pub const PASS_MARKER: &str = "合格";
pub const REJECT_MARKER: &str = "不採用";
pub const DECLINE_MARKER: &str = "辞退";
pub const OPEN_STATUS: &str = "OPEN";

/// Outcome recorded for the document screening or interview stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageResult {
    Empty,
    Pass,
    Reject,
    Decline,
    Other(String),
}

impl StageResult {
    pub fn from_marker(value: &str) -> Self {
        match value {
            "" => StageResult::Empty,
            PASS_MARKER => StageResult::Pass,
            REJECT_MARKER => StageResult::Reject,
            DECLINE_MARKER => StageResult::Decline,
            other => StageResult::Other(other.to_string()),
        }
    }

    /// Blank or passed, i.e. nothing has stopped the candidate at this stage yet.
    pub fn is_open(&self) -> bool {
        matches!(self, StageResult::Empty | StageResult::Pass)
    }
}

/// One exported line: per-store funnel counts stamped with the export time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub generated_at: NaiveDateTime,
    pub store_name: String,
    pub open_date: NaiveDateTime,
    pub metrics: Metrics,
}
