use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::error::{Result, ResultsError};
use crate::model::ResultDocument;
use crate::parser::{load_report, ReportOptions};

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Signals writes to one report file. The parent directory is watched so
/// editors that replace the file on save are still noticed.
pub struct ReportWatcher {
    _watcher: Option<RecommendedWatcher>,
    rx: Receiver<()>,
}

impl ReportWatcher {
    pub fn new(report_path: &Path) -> Result<Self> {
        let target = report_path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| ResultsError::Watch(format!("not a file: {}", report_path.display())))?;
        let dir = match report_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |result: std::result::Result<Event, notify::Error>| {
                if let Ok(event) = result {
                    if is_relevant(&event, &target) {
                        let _ = tx.send(());
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!("Watching {}", dir.display());

        Ok(Self {
            _watcher: Some(watcher),
            rx,
        })
    }

    /// Drain pending notifications; true if the file changed since the last call.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

fn is_relevant(event: &Event, target: &OsString) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(target.as_os_str()))
}

/// Re-reads the report once its writes have settled. A change is only
/// cleared by a successful load, so a file caught mid-write is retried on
/// the next poll.
pub struct Reloader {
    watcher: ReportWatcher,
    path: PathBuf,
    options: ReportOptions,
    last_change: Option<Instant>,
    failing: bool,
}

impl Reloader {
    pub fn new(path: &Path, options: ReportOptions) -> Result<Self> {
        let watcher = ReportWatcher::new(path)?;
        info!("Watch mode enabled for {}", path.display());
        Ok(Self::with_watcher(watcher, path, options))
    }

    fn with_watcher(watcher: ReportWatcher, path: &Path, options: ReportOptions) -> Self {
        Self {
            watcher,
            path: path.to_path_buf(),
            options,
            last_change: None,
            failing: false,
        }
    }

    pub fn poll(&mut self) -> Option<ResultDocument> {
        self.poll_at(Instant::now())
    }

    /// A freshly loaded document once the file has been quiet for the
    /// debounce period and parses. Until then the current document stays.
    fn poll_at(&mut self, now: Instant) -> Option<ResultDocument> {
        if self.watcher.changed() {
            self.last_change = Some(now);
        }
        let since = self.last_change?;
        if now.saturating_duration_since(since) < DEBOUNCE {
            return None;
        }

        match load_report(&self.path, &self.options) {
            Ok(document) => {
                self.last_change = None;
                self.failing = false;
                Some(document)
            }
            Err(e) => {
                if !self.failing {
                    warn!("Reload pending, report not readable yet: {}", e);
                    self.failing = true;
                }
                None
            }
        }
    }
}
