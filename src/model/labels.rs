use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub label: String,
    pub color: String,
}

impl LabelEntry {
    pub fn new(label: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// Severity and status display tables, passed explicitly to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    severity: BTreeMap<Severity, LabelEntry>,
    status: BTreeMap<String, LabelEntry>,
}

impl Default for Labels {
    fn default() -> Self {
        let severity = [
            (Severity::NOT_APPLICABLE, LabelEntry::new("N/A", "darkgray")),
            (Severity::EXECUTED, LabelEntry::new("Executed", "blue")),
            (Severity::PASSED, LabelEntry::new("Passed", "green")),
            (Severity::WARNING, LabelEntry::new("Warning", "yellow")),
            (Severity::ERROR, LabelEntry::new("Error", "red")),
        ]
        .into_iter()
        .collect();

        let status = [
            ("v", LabelEntry::new("Valid", "green")),
            ("i", LabelEntry::new("Invalid", "red")),
            ("w", LabelEntry::new("Warning", "yellow")),
            ("n", LabelEntry::new("Not Applicable", "darkgray")),
            ("p", LabelEntry::new("In Progress", "white")),
            ("-", LabelEntry::new("Not Checked", "darkgray")),
        ]
        .into_iter()
        .map(|(code, entry)| (code.to_string(), entry))
        .collect();

        Self { severity, status }
    }
}

impl Labels {
    pub fn set_severity(&mut self, level: Severity, entry: LabelEntry) {
        self.severity.insert(level, entry);
    }

    pub fn set_status(&mut self, code: &str, entry: LabelEntry) {
        self.status.insert(code.to_string(), entry);
    }

    pub fn severity_label(&self, severity: Severity) -> Cow<'_, str> {
        match self.severity.get(&severity) {
            Some(entry) => Cow::Borrowed(entry.label.as_str()),
            None => Cow::Owned(severity.to_string()),
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Option<&str> {
        self.severity.get(&severity).map(|e| e.color.as_str())
    }

    pub fn status_label<'a>(&'a self, status: &'a str) -> &'a str {
        self.status
            .get(status)
            .map(|e| e.label.as_str())
            .unwrap_or(status)
    }

    pub fn status_color(&self, status: &str) -> Option<&str> {
        self.status.get(status).map(|e| e.color.as_str())
    }
}
