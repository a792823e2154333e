use crate::model::{NormalizedRecord, ResultRecord, PLACEHOLDER};

/// Default missing ids and expected/observed values to the placeholder.
/// Empty strings count as missing. Descriptive fields pass through.
pub fn normalize(record: &ResultRecord) -> NormalizedRecord {
    NormalizedRecord {
        instance_id: or_placeholder(record.instance_id.as_deref()),
        feature: record.feature.clone(),
        feature_version: record.feature_version.clone(),
        feature_url: record.feature_url.clone(),
        feature_text: record.feature_text.clone(),
        severity: record.severity,
        expected: or_placeholder(record.expected.as_deref()),
        observed: or_placeholder(record.observed.as_deref()),
        message: record.message_text().map(str::to_string),
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
