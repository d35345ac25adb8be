use chrono::NaiveDateTime;

use super::domain::{EligibleStores, FunnelStage, StageResult};
use super::records::CandidateRecord;

/// Places a qualifying candidate in exactly one stage.
///
/// Checks run in priority order and stop at the first match, so a joined candidate
/// is never also counted as offered, declined or rejected.
pub fn classify(record: &CandidateRecord) -> FunnelStage {
    let results = [&record.document_result, &record.interview_result];

    if record.joined_at.is_some() {
        FunnelStage::Joined
    } else if record.offer_flagged {
        FunnelStage::Offer
    } else if results.iter().any(|result| **result == StageResult::Decline) {
        FunnelStage::Declined
    } else if results.iter().any(|result| **result == StageResult::Reject) {
        FunnelStage::Rejected
    } else if results.iter().all(|result| result.is_open()) {
        FunnelStage::InProcess
    } else {
        FunnelStage::Unclassified
    }
}

/// Per-run tallies of what happened to each scanned application row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AggregationStats {
    pub scanned: usize,
    pub outside_window: usize,
    pub unknown_store: usize,
    pub counted: usize,
    pub unclassified: usize,
}

/// Accumulates funnel counters for eligible stores over the recency window.
#[derive(Debug, Clone, Copy)]
pub struct MetricsAggregator {
    since: NaiveDateTime,
}

impl MetricsAggregator {
    /// `since` is the inclusive start of the window.
    pub fn new(since: NaiveDateTime) -> Self {
        Self { since }
    }

    pub fn aggregate(
        &self,
        candidates: &[CandidateRecord],
        stores: &mut EligibleStores,
    ) -> AggregationStats {
        let mut stats = AggregationStats::default();

        for record in candidates {
            stats.scanned += 1;

            match record.applied_at {
                Some(applied_at) if applied_at >= self.since => {}
                _ => {
                    stats.outside_window += 1;
                    continue;
                }
            }

            let Some(store) = record
                .desired_location
                .as_deref()
                .and_then(|name| stores.get_mut(name))
            else {
                stats.unknown_store += 1;
                continue;
            };

            let stage = classify(record);
            store.metrics.record(stage);
            stats.counted += 1;
            if stage == FunnelStage::Unclassified {
                stats.unclassified += 1;
            }
        }

        stats
    }
}
