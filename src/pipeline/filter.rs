use crate::model::{ResultRecord, Severity};

/// Keep records above the threshold, or everything when `show_all` is set.
/// Input order is preserved.
pub fn filter_records(records: &[ResultRecord], show_all: bool, threshold: Severity) -> Vec<&ResultRecord> {
    records
        .iter()
        .filter(|r| show_all || r.severity.exceeds(threshold))
        .collect()
}
