use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, ResultsError};
use crate::model::{InstanceTable, ResultDocument, ResultRecord, Severity, DEFAULT_STATUS};

/// Where to pick summary and status from when reading a backend report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub status_field: String,
    pub summary: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            status_field: "status_ia".to_string(),
            summary: "Normative Rules".to_string(),
        }
    }
}

/// Shape of the validation service's report response.
#[derive(Debug, Deserialize)]
struct BackendReport {
    #[serde(default)]
    instances: InstanceTable,
    #[serde(default)]
    model: HashMap<String, Value>,
    tasks: BackendTasks,
}

#[derive(Debug, Deserialize)]
struct BackendTasks {
    #[serde(default)]
    gherkin_rules_validation_task: Option<TaskResults>,
}

#[derive(Debug, Deserialize)]
struct TaskResults {
    #[serde(default)]
    results: Vec<ResultRecord>,
}

/// Parse either a plain result document (`content` at the top level) or a
/// backend report (`tasks.gherkin_rules_validation_task.results`).
pub fn parse_report(content: &str, options: &ReportOptions) -> Result<ResultDocument> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ResultsError::ReportParse(format!("JSON parse error: {}", e)))?;

    let mut document = if value.get("content").is_some() {
        debug!("Reading result document");
        serde_json::from_value::<ResultDocument>(value)
            .map_err(|e| ResultsError::ReportParse(e.to_string()))?
    } else if value.get("tasks").is_some() {
        debug!("Reading backend report");
        let report = serde_json::from_value::<BackendReport>(value)
            .map_err(|e| ResultsError::ReportParse(e.to_string()))?;
        from_backend(report, options)
    } else {
        return Err(ResultsError::ReportParse(
            "expected a `content` list or a `tasks` object".to_string(),
        ));
    };

    if document.summary.is_empty() {
        document.summary = options.summary.clone();
    }
    derive_messages(&mut document.content);

    Ok(document)
}

pub fn load_report(path: &Path, options: &ReportOptions) -> Result<ResultDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| ResultsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let document = parse_report(&content, options)?;
    info!(
        "Loaded {} results and {} instances from {}",
        document.content.len(),
        document.instances.len(),
        path.display()
    );
    Ok(document)
}

fn from_backend(report: BackendReport, options: &ReportOptions) -> ResultDocument {
    let status = match report.model.get(&options.status_field) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => DEFAULT_STATUS.to_string(),
    };
    let mut content = report
        .tasks
        .gherkin_rules_validation_task
        .map(|task| task.results)
        .unwrap_or_default();
    severity_from_step(&mut content);

    ResultDocument {
        summary: options.summary.clone(),
        status,
        content,
        instances: report.instances,
    }
}

/// Backend results carry the severity only as its display name in `step`.
fn severity_from_step(records: &mut [ResultRecord]) {
    for record in records.iter_mut() {
        if record.severity != Severity::default() {
            continue;
        }
        if let Some(severity) = record.step.as_deref().and_then(Severity::from_label) {
            record.severity = severity;
        }
    }
}

/// Fill in a message for records that carry neither `message` nor `msg`.
pub fn derive_messages(records: &mut [ResultRecord]) {
    for record in records.iter_mut() {
        if record.message_text().is_none() {
            record.message = derived_message(record);
        }
    }
}

fn derived_message(record: &ResultRecord) -> Option<String> {
    match record.severity {
        Severity::PASSED => Some("Rule passed".to_string()),
        Severity::EXECUTED => Some("Rule executed".to_string()),
        Severity::NOT_APPLICABLE => Some("Rule not applicable".to_string()),
        _ => {
            let expected = record.expected.as_deref().filter(|s| !s.is_empty());
            let observed = record.observed.as_deref().filter(|s| !s.is_empty());
            if expected.is_none() && observed.is_none() {
                return None;
            }
            Some(format!(
                "Expected: {} - Observed: {}",
                expected.unwrap_or("None"),
                observed.unwrap_or("None")
            ))
        }
    }
}
