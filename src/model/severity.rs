use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer severity rank of a validation outcome. Higher is more severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(pub i64);

impl Severity {
    pub const NOT_APPLICABLE: Severity = Severity(0);
    pub const EXECUTED: Severity = Severity(1);
    pub const PASSED: Severity = Severity(2);
    pub const WARNING: Severity = Severity(3);
    pub const ERROR: Severity = Severity(4);

    /// Highest level still counted as passing in the default view.
    pub const PASSING_THRESHOLD: Severity = Severity::PASSED;

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn exceeds(self, threshold: Severity) -> bool {
        self > threshold
    }

    /// Level for a display name such as `"Error"`, as the backend sends in `step`.
    pub fn from_label(label: &str) -> Option<Severity> {
        match label.trim().to_ascii_lowercase().as_str() {
            "n/a" | "not applicable" => Some(Severity::NOT_APPLICABLE),
            "executed" => Some(Severity::EXECUTED),
            "passed" => Some(Severity::PASSED),
            "warning" => Some(Severity::WARNING),
            "error" => Some(Severity::ERROR),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Severity {
    fn from(value: i64) -> Self {
        Severity(value)
    }
}
