use serde::{Deserialize, Serialize};

use super::{InstanceTable, ResultRecord};

/// Status code used when a document does not carry one.
pub const DEFAULT_STATUS: &str = "p";

/// Everything the result view is driven by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub content: Vec<ResultRecord>,
    #[serde(default)]
    pub instances: InstanceTable,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

impl ResultDocument {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
