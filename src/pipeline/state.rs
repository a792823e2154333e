use super::paginate::last_page;

/// Page and filter state for one viewing session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineState {
    pub page: usize,
    pub show_all: bool,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the filter. Any change resets to the first page, since the
    /// new result set may be shorter than the current page offset.
    pub fn set_show_all(&mut self, show_all: bool) -> bool {
        if self.show_all == show_all {
            return false;
        }
        self.show_all = show_all;
        self.page = 0;
        true
    }

    /// Move to `page`, clamped to the pages available for `group_count`.
    pub fn set_page(&mut self, page: usize, group_count: usize, page_size: usize) -> bool {
        let clamped = page.min(last_page(group_count, page_size));
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    /// Pull the page back in range after the content changed.
    pub fn clamp(&mut self, group_count: usize, page_size: usize) {
        self.page = self.page.min(last_page(group_count, page_size));
    }
}
