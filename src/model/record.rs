use serde::{Deserialize, Deserializer, Serialize};

use super::Severity;

/// Group key used for records without a feature.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Placeholder shown for missing values.
pub const PLACEHOLDER: &str = "-";

/// A single validation outcome as delivered by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRecord {
    #[serde(deserialize_with = "deserialize_instance_id")]
    pub instance_id: Option<String>,
    pub feature: Option<String>,
    pub feature_version: Option<String>,
    pub feature_url: Option<String>,
    pub feature_text: Option<String>,
    #[serde(deserialize_with = "deserialize_severity")]
    pub severity: Severity,
    /// Severity display name; the backend report sends this instead of `severity`.
    pub step: Option<String>,
    pub expected: Option<String>,
    pub observed: Option<String>,
    pub message: Option<String>,
    pub msg: Option<String>,
}

impl ResultRecord {
    /// Group key: the feature, or `Uncategorized` when it is missing or empty.
    pub fn group_key(&self) -> &str {
        group_key(self.feature.as_deref())
    }

    /// First non-empty of `message` and `msg`.
    pub fn message_text(&self) -> Option<&str> {
        non_empty(self.message.as_deref()).or_else(|| non_empty(self.msg.as_deref()))
    }
}

/// A record after defaulting, as consumed by dedup, grouping and renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub instance_id: String,
    pub feature: Option<String>,
    pub feature_version: Option<String>,
    pub feature_url: Option<String>,
    pub feature_text: Option<String>,
    pub severity: Severity,
    pub expected: String,
    pub observed: String,
    pub message: Option<String>,
}

impl NormalizedRecord {
    pub fn group_key(&self) -> &str {
        group_key(self.feature.as_deref())
    }

    pub fn message_or_placeholder(&self) -> &str {
        non_empty(self.message.as_deref()).unwrap_or(PLACEHOLDER)
    }
}

pub fn group_key(feature: Option<&str>) -> &str {
    non_empty(feature).unwrap_or(UNCATEGORIZED)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Backend ids are integers, hand-written documents often use strings.
/// Integer 0 is treated like an absent id.
fn deserialize_instance_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<IdValue>::deserialize(deserializer)? {
        Some(IdValue::Text(s)) => Some(s),
        Some(IdValue::Number(0)) | None => None,
        Some(IdValue::Number(n)) => Some(n.to_string()),
    })
}

/// Accepts a level, a display name, or null. Anything unreadable is N/A.
fn deserialize_severity<'de, D>(deserializer: D) -> std::result::Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SeverityValue {
        Level(i64),
        Label(String),
    }

    Ok(match Option::<SeverityValue>::deserialize(deserializer)? {
        Some(SeverityValue::Level(level)) => Severity(level),
        Some(SeverityValue::Label(label)) => Severity::from_label(&label).unwrap_or_default(),
        None => Severity::default(),
    })
}
