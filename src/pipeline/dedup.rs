use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::model::NormalizedRecord;

/// Identity of a record for deduplication. A structured pair, so
/// `("1", "2")` and `("12", "")` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub instance_id: String,
    pub feature: Option<String>,
}

impl DedupKey {
    pub fn of(record: &NormalizedRecord) -> Self {
        Self {
            instance_id: record.instance_id.clone(),
            feature: record.feature.clone(),
        }
    }
}

/// Keep one record per key. The last occurrence wins and takes the slot
/// of the first occurrence, so survivors stay in first-seen order.
pub fn dedup_latest(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let mut slots: HashMap<DedupKey, usize> = HashMap::with_capacity(records.len());
    let mut survivors: Vec<NormalizedRecord> = Vec::with_capacity(records.len());

    for record in records {
        match slots.entry(DedupKey::of(&record)) {
            Entry::Occupied(slot) => survivors[*slot.get()] = record,
            Entry::Vacant(slot) => {
                slot.insert(survivors.len());
                survivors.push(record);
            }
        }
    }

    survivors
}
