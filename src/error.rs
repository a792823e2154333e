use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("No report file found")]
    NoReportFound,

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse report: {0}")]
    ReportParse(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Failed to watch file: {0}")]
    Watch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<notify::Error> for ResultsError {
    fn from(e: notify::Error) -> Self {
        ResultsError::Watch(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResultsError>;
