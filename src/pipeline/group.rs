use serde::Serialize;

use crate::model::{NormalizedRecord, Severity};

/// Records sharing a feature key, annotated with their highest severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureGroup {
    pub key: String,
    pub records: Vec<NormalizedRecord>,
    pub aggregate_severity: Severity,
}

impl FeatureGroup {
    fn open(key: &str) -> Self {
        Self {
            key: key.to_string(),
            records: Vec::new(),
            aggregate_severity: Severity::default(),
        }
    }

    /// The record whose descriptive fields head the group.
    pub fn lead(&self) -> Option<&NormalizedRecord> {
        self.records.first()
    }

    pub fn feature_text(&self) -> Option<&str> {
        self.lead().and_then(|r| r.feature_text.as_deref())
    }

    pub fn feature_url(&self) -> Option<&str> {
        self.lead().and_then(|r| r.feature_url.as_deref())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Stable sort on the same key derivation used for grouping.
pub fn sort_by_group_key(records: &mut [NormalizedRecord]) {
    records.sort_by(|a, b| a.group_key().cmp(b.group_key()));
}

/// Consecutive-run grouping. Input must already be sorted by group key,
/// otherwise a key can appear in more than one group.
pub fn group_runs(records: Vec<NormalizedRecord>) -> Vec<FeatureGroup> {
    let mut groups: Vec<FeatureGroup> = Vec::new();

    for record in records {
        let starts_new = groups
            .last()
            .is_none_or(|open| open.key != record.group_key());
        if starts_new {
            groups.push(FeatureGroup::open(record.group_key()));
        }
        if let Some(open) = groups.last_mut() {
            open.records.push(record);
        }
    }

    groups
}

/// Set each group's aggregate to the max severity of its members.
pub fn aggregate_severity(groups: &mut [FeatureGroup]) {
    for group in groups.iter_mut() {
        group.aggregate_severity = group
            .records
            .iter()
            .map(|r| r.severity)
            .max()
            .unwrap_or_default();
    }
}

pub fn sort_groups(groups: &mut [FeatureGroup]) {
    groups.sort_by(|a, b| a.key.cmp(&b.key));
}
