use std::collections::HashSet;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListState, Paragraph},
    Frame,
};

use crate::pipeline::FeatureGroup;
use crate::render::{ResultView, ViewEvent, SHOW_ALL_LABEL};
use crate::ui::theme::Theme;
use crate::ui::tree::{build_tree_items, FeatureTree, TreeItem};

const KEY_HINTS: [&str; 6] = [
    "q:quit",
    "\u{2191}\u{2193}:move",
    "Space:expand",
    "c:all",
    "\u{2190}\u{2192}:page",
    "a:show-all",
];

/// Presentation-only state of the interactive view. Paging and filtering
/// live in `PipelineState`; this only tracks what is expanded and selected
/// on the page currently shown.
pub struct TreeState {
    pub list_state: ListState,
    pub expanded: HashSet<String>,
    pub items: Vec<TreeItem>,
    pub groups: Vec<FeatureGroup>,
    pub page: usize,
    pub page_count: usize,
    pub show_all: bool,
    pub theme: Theme,
}

impl TreeState {
    pub fn new(theme: Theme) -> Self {
        Self {
            list_state: ListState::default(),
            expanded: HashSet::new(),
            items: Vec::new(),
            groups: Vec::new(),
            page: 0,
            page_count: 0,
            show_all: false,
            theme,
        }
    }

    /// Take over the groups of a freshly computed view. Moving to another
    /// page puts the cursor back on the first group.
    pub fn sync(&mut self, view: &ResultView<'_>) {
        let page_moved = view.page.page != self.page || view.show_all != self.show_all;
        self.groups = view.groups().to_vec();
        self.page = view.page.page;
        self.page_count = view.page.page_count;
        self.show_all = view.show_all;
        self.rebuild_items();

        if page_moved {
            self.list_state.select(None);
        }
        self.clamp_selection();
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<ViewEvent> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(ViewEvent::Quit),
            KeyCode::Down => {
                self.move_selection(1);
                Some(ViewEvent::Refresh)
            }
            KeyCode::Up => {
                self.move_selection(-1);
                Some(ViewEvent::Refresh)
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle_selected();
                Some(ViewEvent::Refresh)
            }
            KeyCode::Char('c') => {
                self.toggle_expand_collapse_all();
                Some(ViewEvent::Refresh)
            }
            KeyCode::Right | KeyCode::PageDown => {
                (self.page + 1 < self.page_count).then(|| ViewEvent::PageChanged(self.page + 1))
            }
            KeyCode::Left | KeyCode::PageUp => {
                (self.page > 0).then(|| ViewEvent::PageChanged(self.page - 1))
            }
            KeyCode::Char('a') => Some(ViewEvent::ShowAllChanged(!self.show_all)),
            _ => None,
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as i32;
        let new = (current + delta).rem_euclid(len as i32) as usize;
        self.list_state.select(Some(new));
    }

    /// Expand or collapse the group under the cursor. The cursor moves to
    /// the group header so it never points into a collapsed body.
    pub fn toggle_selected(&mut self) {
        let Some(g) = self.selected_group() else {
            return;
        };
        let Some(key) = self.groups.get(g).map(|group| group.key.clone()) else {
            return;
        };
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
        self.rebuild_items();
        self.select_group(g);
    }

    /// Expand every group on the page, or collapse them all if they already are.
    pub fn toggle_expand_collapse_all(&mut self) {
        let selected = self.selected_group();
        let all_expanded = self
            .groups
            .iter()
            .all(|group| self.expanded.contains(&group.key));

        for group in &self.groups {
            if all_expanded {
                self.expanded.remove(&group.key);
            } else {
                self.expanded.insert(group.key.clone());
            }
        }
        self.rebuild_items();
        if let Some(g) = selected {
            self.select_group(g);
        }
    }

    fn selected_group(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|i| self.items.get(i))
            .map(TreeItem::group_index)
    }

    fn select_group(&mut self, g: usize) {
        let position = self.items.iter().position(|item| *item == TreeItem::Group(g));
        self.list_state.select(position);
    }

    fn rebuild_items(&mut self) {
        self.items = build_tree_items(&self.groups, &self.expanded);
    }

    fn clamp_selection(&mut self) {
        if self.items.is_empty() {
            self.list_state.select(None);
            return;
        }
        let last = self.items.len() - 1;
        let selected = self.list_state.selected().map_or(0, |i| i.min(last));
        self.list_state.select(Some(selected));
    }
}

pub fn draw(frame: &mut Frame, state: &mut TreeState, view: &ResultView<'_>) {
    frame.render_widget(
        Block::default().style(Style::default().bg(state.theme.bg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Header: summary and the show-all toggle
    let checkbox = if view.show_all { "[x]" } else { "[ ]" };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(checkbox, Style::default().fg(state.theme.highlight)),
        Span::raw(" "),
        Span::raw(SHOW_ALL_LABEL),
    ]))
    .style(Style::default().fg(state.theme.fg))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                view.summary.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(state.theme.border)),
    );
    frame.render_widget(header, chunks[0]);

    // Body: feature tree, or the overall status when nothing is left to show
    if state.items.is_empty() {
        let color = state
            .theme
            .label_color(view.labels.status_color(view.status));
        let status = Paragraph::new(Span::styled(
            view.status_label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Features")
                .border_style(Style::default().fg(state.theme.border)),
        );
        frame.render_widget(status, chunks[1]);
    } else {
        let tree = FeatureTree::new(
            &state.items,
            &state.groups,
            &state.expanded,
            view.instances,
            view.labels,
            &state.theme,
        );
        frame.render_stateful_widget(tree, chunks[1], &mut state.list_state);
    }

    // Status bar
    let hints = KEY_HINTS.join("  ");
    let status = if view.pagination_visible {
        format!("{} | {}", view.pagination_text(), hints)
    } else {
        hints
    };
    let status_bar = Paragraph::new(status)
        .style(Style::default().fg(state.theme.fg).add_modifier(Modifier::DIM));
    frame.render_widget(status_bar, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Labels, ResultRecord, Severity};
    use crate::pipeline::{GroupedPage, PipelineState, ResultGrouper};
    use crate::render::fixtures;
    use ratatui::{backend::TestBackend, Terminal};

    fn many_records(features: usize) -> Vec<ResultRecord> {
        (0..features)
            .map(|i| ResultRecord {
                instance_id: Some(i.to_string()),
                feature: Some(format!("F{:02}", i)),
                severity: Severity::ERROR,
                ..Default::default()
            })
            .collect()
    }

    fn synced(page: GroupedPage, show_all: bool) -> TreeState {
        let instances = fixtures::instances();
        let labels = Labels::default();
        let mut view = fixtures::view(page, &instances, &labels, true);
        view.show_all = show_all;
        let mut state = TreeState::new(Theme::default());
        state.sync(&view);
        state
    }

    fn screen(state: &mut TreeState, view: &ResultView<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|f| draw(f, state, view)).unwrap();
        let buf = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    // TreeState::new tests
    #[test]
    fn test_tree_state_new() {
        let state = TreeState::new(Theme::default());

        assert!(state.items.is_empty());
        assert!(state.expanded.is_empty());
        assert!(state.list_state.selected().is_none());
        assert_eq!(state.page, 0);
        assert!(!state.show_all);
    }

    // sync tests
    #[test]
    fn test_sync_selects_first_group() {
        let page = fixtures::page(&fixtures::records(), &PipelineState::new());

        let state = synced(page, false);

        assert_eq!(state.items, vec![TreeItem::Group(0), TreeItem::Group(1)]);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_sync_empty_page_clears_selection() {
        let state = synced(GroupedPage::default(), false);

        assert!(state.items.is_empty());
        assert!(state.list_state.selected().is_none());
    }

    #[test]
    fn test_sync_new_page_resets_cursor() {
        let records = many_records(12);
        let grouper = ResultGrouper::default();
        let instances = fixtures::instances();
        let labels = Labels::default();
        let mut state = TreeState::new(Theme::default());

        let first = fixtures::view(grouper.run(&records, &PipelineState::new()), &instances, &labels, true);
        state.sync(&first);
        state.move_selection(5);
        assert_eq!(state.list_state.selected(), Some(5));

        let second = fixtures::view(
            grouper.run(&records, &PipelineState { page: 1, show_all: false }),
            &instances,
            &labels,
            true,
        );
        state.sync(&second);

        assert_eq!(state.page, 1);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    // Navigation tests
    #[test]
    fn test_move_selection_wraps() {
        let page = fixtures::page(&fixtures::records(), &PipelineState::new());
        let mut state = synced(page, false);

        state.move_selection(-1);
        assert_eq!(state.list_state.selected(), Some(1));

        state.move_selection(1);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_move_selection_empty_is_noop() {
        let mut state = synced(GroupedPage::default(), false);

        state.move_selection(1);

        assert!(state.list_state.selected().is_none());
    }

    // Expand/collapse tests
    #[test]
    fn test_toggle_selected_expands_and_collapses() {
        let page = fixtures::page(&fixtures::records(), &PipelineState::new());
        let mut state = synced(page, false);

        state.toggle_selected();
        assert!(state.expanded.contains("ALB002"));
        assert!(state.items.len() > 2);
        assert_eq!(state.list_state.selected(), Some(0));

        state.move_selection(1);
        state.toggle_selected();
        assert!(state.expanded.is_empty());
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_toggle_expand_collapse_all() {
        let page = fixtures::page(&fixtures::records(), &PipelineState::new());
        let mut state = synced(page, false);

        state.toggle_expand_collapse_all();
        assert_eq!(state.expanded.len(), 2);

        state.toggle_expand_collapse_all();
        assert!(state.expanded.is_empty());
    }

    #[test]
    fn test_toggle_all_keeps_cursor_on_group() {
        let page = fixtures::page(&fixtures::records(), &PipelineState::new());
        let mut state = synced(page, false);
        state.move_selection(1);

        state.toggle_expand_collapse_all();

        let selected = state.list_state.selected().unwrap();
        assert_eq!(state.items[selected], TreeItem::Group(1));
    }

    // handle_key tests
    #[test]
    fn test_handle_key_quit() {
        let mut state = TreeState::new(Theme::default());

        assert_eq!(state.handle_key(KeyCode::Char('q')), Some(ViewEvent::Quit));
        assert_eq!(state.handle_key(KeyCode::Esc), Some(ViewEvent::Quit));
    }

    #[test]
    fn test_handle_key_toggle_show_all() {
        let mut state = synced(GroupedPage::default(), true);

        assert_eq!(
            state.handle_key(KeyCode::Char('a')),
            Some(ViewEvent::ShowAllChanged(false))
        );
    }

    #[test]
    fn test_handle_key_paging() {
        let records = many_records(25);
        let page = ResultGrouper::default().run(&records, &PipelineState { page: 1, show_all: false });
        let mut state = synced(page, false);

        assert_eq!(state.handle_key(KeyCode::Right), Some(ViewEvent::PageChanged(2)));
        assert_eq!(state.handle_key(KeyCode::PageUp), Some(ViewEvent::PageChanged(0)));
    }

    #[test]
    fn test_handle_key_paging_at_bounds() {
        let page = fixtures::page(&fixtures::records(), &PipelineState::new());
        let mut state = synced(page, false);

        assert_eq!(state.handle_key(KeyCode::Left), None);
        assert_eq!(state.handle_key(KeyCode::PageDown), None);
    }

    #[test]
    fn test_handle_key_unbound() {
        let mut state = TreeState::new(Theme::default());

        assert_eq!(state.handle_key(KeyCode::Char('z')), None);
    }

    // draw tests
    #[test]
    fn test_draw_tree_with_pagination() {
        let instances = fixtures::instances();
        let labels = Labels::default();
        let view = fixtures::view(
            fixtures::page(&fixtures::records(), &PipelineState::new()),
            &instances,
            &labels,
            true,
        );
        let mut state = TreeState::new(Theme::default());
        state.sync(&view);

        let text = screen(&mut state, &view);

        assert!(text.contains("Normative Rules"));
        assert!(text.contains("[ ] include Passed, Disabled and N/A"));
        assert!(text.contains("[Warning] ALB002 (1)"));
        assert!(text.contains("[Error] GEM001 (1)"));
        assert!(text.contains("Page 1 of 1 (2 features)"));
    }

    #[test]
    fn test_draw_empty_content_shows_status() {
        let instances = fixtures::instances();
        let labels = Labels::default();
        let view = fixtures::view(GroupedPage::default(), &instances, &labels, false);
        let mut state = TreeState::new(Theme::default());
        state.sync(&view);

        let text = screen(&mut state, &view);

        assert!(text.contains("Invalid"));
        assert!(!text.contains("Page 1"));
        assert!(text.contains("q:quit"));
    }
}
