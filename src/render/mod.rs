//! Display side of the result view. Renderers draw a `ResultView` and
//! report user intent back as `ViewEvent`s; they hold no pipeline state.

mod json;
mod text;

use std::time::Duration;

use crate::error::Result;
use crate::model::{InstanceTable, Labels};
use crate::pipeline::{FeatureGroup, GroupedPage};

pub use json::JsonRenderer;
pub use text::TextRenderer;

/// Label of the show-all toggle.
pub const SHOW_ALL_LABEL: &str = "include Passed, Disabled and N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// User asked for another page (0-based).
    PageChanged(usize),
    /// User flipped the show-all toggle to this value.
    ShowAllChanged(bool),
    /// Presentation-only change, redraw with the same view.
    Refresh,
    Quit,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct ResultView<'a> {
    pub summary: &'a str,
    pub status: &'a str,
    pub page: GroupedPage,
    pub show_all: bool,
    /// Pagination controls are only shown when there is any content at all.
    pub pagination_visible: bool,
    pub instances: &'a InstanceTable,
    pub labels: &'a Labels,
}

impl<'a> ResultView<'a> {
    pub fn groups(&self) -> &[FeatureGroup] {
        &self.page.groups
    }

    pub fn status_label(&self) -> &'a str {
        self.labels.status_label(self.status)
    }

    /// "Page 2 of 3 (23 features)"
    pub fn pagination_text(&self) -> String {
        let features = if self.page.total_groups == 1 { "feature" } else { "features" };
        format!(
            "Page {} of {} ({} {})",
            self.page.page + 1,
            self.page.page_count.max(1),
            self.page.total_groups,
            features
        )
    }

    pub fn has_next_page(&self) -> bool {
        self.page.page + 1 < self.page.page_count
    }

    pub fn has_prev_page(&self) -> bool {
        self.page.page > 0
    }
}

pub trait Renderer {
    fn render(&mut self, view: &ResultView<'_>) -> Result<()>;

    /// Wait up to `timeout` for user input. `None` means nothing happened.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<ViewEvent>>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::model::{InstanceRef, ResultRecord, Severity};
    use crate::pipeline::{PipelineState, ResultGrouper};

    pub fn instances() -> InstanceTable {
        [(
            "1".to_string(),
            InstanceRef {
                guid: "#101".to_string(),
                ifc_type: "IfcWall".to_string(),
            },
        )]
        .into_iter()
        .collect()
    }

    pub fn records() -> Vec<ResultRecord> {
        vec![
            ResultRecord {
                instance_id: Some("1".to_string()),
                feature: Some("GEM001".to_string()),
                feature_text: Some("Shells must be closed".to_string()),
                feature_url: Some("https://example.org/GEM001".to_string()),
                severity: Severity::ERROR,
                expected: Some("closed".to_string()),
                observed: Some("open".to_string()),
                message: Some("Shell is open".to_string()),
                ..Default::default()
            },
            ResultRecord {
                instance_id: Some("9".to_string()),
                feature: Some("ALB002".to_string()),
                severity: Severity::WARNING,
                ..Default::default()
            },
        ]
    }

    pub fn page(records: &[ResultRecord], state: &PipelineState) -> GroupedPage {
        ResultGrouper::default().run(records, state)
    }

    pub fn view<'a>(
        page: GroupedPage,
        instances: &'a InstanceTable,
        labels: &'a Labels,
        pagination_visible: bool,
    ) -> ResultView<'a> {
        ResultView {
            summary: "Normative Rules",
            status: "i",
            page,
            show_all: false,
            pagination_visible,
            instances,
            labels,
        }
    }
}
