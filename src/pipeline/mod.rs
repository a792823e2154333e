//! Turns a flat list of result records into paginated feature groups:
//! filter, normalize, dedup, sort, group, aggregate, sort groups, slice.

mod dedup;
mod filter;
mod group;
mod normalize;
mod paginate;
mod state;

use serde::Serialize;
use tracing::debug;

use crate::model::{ResultRecord, Severity};

pub use dedup::{dedup_latest, DedupKey};
pub use filter::filter_records;
pub use group::{aggregate_severity, group_runs, sort_by_group_key, sort_groups, FeatureGroup};
pub use normalize::normalize;
pub use paginate::{last_page, page_count, page_slice, DEFAULT_PAGE_SIZE};
pub use state::PipelineState;

/// One page of groups plus the unsliced group count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedPage {
    pub groups: Vec<FeatureGroup>,
    pub total_groups: usize,
    pub page: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultGrouper {
    page_size: usize,
    threshold: Severity,
}

impl Default for ResultGrouper {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            threshold: Severity::PASSING_THRESHOLD,
        }
    }
}

impl ResultGrouper {
    pub fn new(page_size: usize, threshold: Severity) -> Self {
        Self {
            page_size: page_size.max(1),
            threshold,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// All groups for the given filter, before pagination.
    pub fn group(&self, records: &[ResultRecord], show_all: bool) -> Vec<FeatureGroup> {
        let filtered = filter_records(records, show_all, self.threshold);
        let normalized: Vec<_> = filtered.into_iter().map(normalize).collect();
        let kept = normalized.len();

        let mut deduped = dedup_latest(normalized);
        debug!(
            "Pipeline: {} records, {} after filter, {} after dedup",
            records.len(),
            kept,
            deduped.len()
        );

        sort_by_group_key(&mut deduped);
        let mut groups = group_runs(deduped);
        aggregate_severity(&mut groups);
        sort_groups(&mut groups);

        debug!("Pipeline: {} feature groups", groups.len());
        groups
    }

    /// Run the whole pipeline for `state` and cut out its page.
    pub fn run(&self, records: &[ResultRecord], state: &PipelineState) -> GroupedPage {
        let groups = self.group(records, state.show_all);
        let total_groups = groups.len();

        GroupedPage {
            groups: page_slice(&groups, state.page, self.page_size).to_vec(),
            total_groups,
            page: state.page,
            page_count: page_count(total_groups, self.page_size),
        }
    }
}
