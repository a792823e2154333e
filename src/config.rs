use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, ResultsError};
use crate::model::{LabelEntry, Labels, Severity};
use crate::parser::ReportOptions;
use crate::pipeline::{ResultGrouper, DEFAULT_PAGE_SIZE};

pub const CONFIG_FILE_NAME: &str = ".gherkin-results.toml";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_threshold")]
    pub severity_threshold: i64,
    #[serde(default)]
    pub show_all: bool,
    #[serde(default)]
    pub watch: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            severity_threshold: default_threshold(),
            show_all: false,
            watch: false,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_threshold() -> i64 {
    Severity::PASSING_THRESHOLD.value()
}

#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_status_field")]
    pub status_field: String,
    #[serde(default = "default_summary")]
    pub summary: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            status_field: default_status_field(),
            summary: default_summary(),
        }
    }
}

fn default_status_field() -> String {
    ReportOptions::default().status_field
}

fn default_summary() -> String {
    ReportOptions::default().summary
}

#[derive(Debug, Deserialize, Default)]
pub struct LabelsConfig {
    #[serde(default)]
    pub severity: Vec<SeverityLabel>,
    #[serde(default)]
    pub status: Vec<StatusLabel>,
}

#[derive(Debug, Deserialize)]
pub struct SeverityLabel {
    pub level: i64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusLabel {
    pub code: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ThemeConfig {
    #[serde(default)]
    pub name: Option<String>,
}

impl Config {
    /// Load `.gherkin-results.toml` from `dir`, falling back to defaults.
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            debug!("No config at {}", config_path.display());
            return Config::default();
        }
        match Self::load_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Load an explicitly named config file. Errors are returned, not skipped.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ResultsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = toml::from_str(&content)
            .map_err(|e| ResultsError::ConfigParse(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn grouper(&self) -> ResultGrouper {
        ResultGrouper::new(self.view.page_size, Severity(self.view.severity_threshold))
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            status_field: self.report.status_field.clone(),
            summary: self.report.summary.clone(),
        }
    }

    /// Default label tables with the configured overrides applied.
    pub fn labels(&self) -> Labels {
        let mut labels = Labels::default();
        for entry in &self.labels.severity {
            labels.set_severity(
                Severity(entry.level),
                LabelEntry::new(&entry.label, &entry.color),
            );
        }
        for entry in &self.labels.status {
            labels.set_status(&entry.code, LabelEntry::new(&entry.label, &entry.color));
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Default tests
    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.view.page_size, 10);
        assert_eq!(config.view.severity_threshold, 2);
        assert!(!config.view.show_all);
        assert!(!config.view.watch);
        assert_eq!(config.report.status_field, "status_ia");
        assert!(config.theme.name.is_none());
    }

    #[test]
    fn test_default_grouper() {
        let grouper = Config::default().grouper();

        assert_eq!(grouper.page_size(), 10);
        assert_eq!(grouper.threshold(), Severity::PASSING_THRESHOLD);
    }

    // load tests
    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();

        let config = Config::load(dir.path());

        assert_eq!(config.view.page_size, 10);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[view]\npage_size = 25\nshow_all = true\n",
        )
        .unwrap();

        let config = Config::load(dir.path());

        assert_eq!(config.view.page_size, 25);
        assert!(config.view.show_all);
        assert_eq!(config.view.severity_threshold, 2);
        assert_eq!(config.report.summary, "Normative Rules");
    }

    #[test]
    fn test_load_invalid_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[view\npage_size = ").unwrap();

        let config = Config::load(dir.path());

        assert_eq!(config.view.page_size, 10);
    }

    #[test]
    fn test_load_file_invalid_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[view]\npage_size = \"many\"\n").unwrap();

        assert!(matches!(Config::load_file(&path), Err(ResultsError::ConfigParse(_))));
    }

    #[test]
    fn test_load_file_missing_is_error() {
        let result = Config::load_file(Path::new("/nonexistent/custom.toml"));
        assert!(matches!(result, Err(ResultsError::FileRead { .. })));
    }

    // Report options tests
    #[test]
    fn test_report_options_from_config() {
        let config: Config =
            toml::from_str("[report]\nstatus_field = \"status_ind\"\nsummary = \"Industry\"\n").unwrap();

        let options = config.report_options();

        assert_eq!(options.status_field, "status_ind");
        assert_eq!(options.summary, "Industry");
    }

    // Labels tests
    #[test]
    fn test_label_overrides() {
        let toml = r#"
            [[labels.severity]]
            level = 4
            label = "Failed"
            color = "magenta"

            [[labels.status]]
            code = "v"
            label = "Conforming"
            color = "cyan"
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        let labels = config.labels();

        assert_eq!(labels.severity_label(Severity::ERROR), "Failed");
        assert_eq!(labels.severity_color(Severity::ERROR), Some("magenta"));
        assert_eq!(labels.severity_label(Severity::WARNING), "Warning");
        assert_eq!(labels.status_label("v"), "Conforming");
    }

    #[test]
    fn test_custom_threshold_grouper() {
        let config: Config = toml::from_str("[view]\nseverity_threshold = 3\n").unwrap();

        assert_eq!(config.grouper().threshold(), Severity::WARNING);
    }
}
