use std::path::{Path, PathBuf};

use crate::error::{Result, ResultsError};

/// Preferred file name when a directory is given.
const DEFAULT_REPORT_NAME: &str = "report.json";

/// Find the report file to open.
///
/// If `start` is a `.json` file it is returned directly. If it is a
/// directory, `report.json` is preferred, then the first `.json` file by
/// name. The directory is not searched recursively.
pub fn find_report(start: &Path) -> Result<PathBuf> {
    if start.is_file() {
        if start.extension().is_some_and(|ext| ext == "json") {
            return Ok(start.to_path_buf());
        }
        return Err(ResultsError::NoReportFound);
    }

    if start.is_dir() {
        let preferred = start.join(DEFAULT_REPORT_NAME);
        if preferred.is_file() {
            return Ok(preferred);
        }

        let mut candidates: Vec<PathBuf> = std::fs::read_dir(start)
            .map_err(|e| ResultsError::FileRead {
                path: start.to_path_buf(),
                source: e,
            })?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        candidates.sort();

        if let Some(first) = candidates.into_iter().next() {
            return Ok(first);
        }
    }

    Err(ResultsError::NoReportFound)
}
