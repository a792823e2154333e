use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

use crate::model::{InstanceTable, Labels};
use crate::pipeline::FeatureGroup;
use crate::ui::theme::Theme;

const COLUMN_WIDTHS: [usize; 5] = [10, 18, 9, 14, 14];

/// Lines shown under an expanded group before its rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detail {
    Text,
    Link,
    Columns,
}

/// One line of the flattened feature tree. Indices point into the page's groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeItem {
    Group(usize),
    Detail(usize, Detail),
    Row(usize, usize),
}

impl TreeItem {
    pub fn group_index(&self) -> usize {
        match *self {
            TreeItem::Group(g) | TreeItem::Detail(g, _) | TreeItem::Row(g, _) => g,
        }
    }
}

/// Flatten groups into navigable lines. Groups not in `expanded` show only
/// their header.
pub fn build_tree_items(groups: &[FeatureGroup], expanded: &HashSet<String>) -> Vec<TreeItem> {
    let mut items = Vec::with_capacity(groups.len());

    for (g, group) in groups.iter().enumerate() {
        items.push(TreeItem::Group(g));
        if !expanded.contains(&group.key) {
            continue;
        }
        items.push(TreeItem::Detail(g, Detail::Text));
        if group.feature_url().is_some() {
            items.push(TreeItem::Detail(g, Detail::Link));
        }
        items.push(TreeItem::Detail(g, Detail::Columns));
        items.extend((0..group.len()).map(|r| TreeItem::Row(g, r)));
    }

    items
}

pub struct FeatureTree<'a> {
    items: &'a [TreeItem],
    groups: &'a [FeatureGroup],
    expanded: &'a HashSet<String>,
    instances: &'a InstanceTable,
    labels: &'a Labels,
    theme: &'a Theme,
}

impl<'a> FeatureTree<'a> {
    pub fn new(
        items: &'a [TreeItem],
        groups: &'a [FeatureGroup],
        expanded: &'a HashSet<String>,
        instances: &'a InstanceTable,
        labels: &'a Labels,
        theme: &'a Theme,
    ) -> Self {
        Self {
            items,
            groups,
            expanded,
            instances,
            labels,
            theme,
        }
    }

    fn group_line(&self, group: &'a FeatureGroup) -> Line<'a> {
        let severity = group.aggregate_severity;
        let color = self.theme.label_color(self.labels.severity_color(severity));
        let collapse_str = if self.expanded.contains(&group.key) { "- " } else { "+ " };

        Line::from(vec![
            Span::styled(collapse_str, Style::default().fg(self.theme.border)),
            Span::styled(
                format!("[{}] ", self.labels.severity_label(severity)),
                Style::default().fg(color),
            ),
            Span::styled(
                group.key.as_str(),
                Style::default()
                    .fg(self.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", group.len()),
                Style::default().fg(self.theme.border),
            ),
        ])
    }

    fn detail_line(&self, group: &'a FeatureGroup, detail: Detail) -> Line<'a> {
        match detail {
            Detail::Text => Line::from(Span::styled(
                format!("    \u{24d8} {}", group.feature_text().unwrap_or("-")),
                Style::default().fg(self.theme.fg),
            )),
            Detail::Link => Line::from(Span::styled(
                format!("    {}", group.feature_url().unwrap_or_default()),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::UNDERLINED),
            )),
            Detail::Columns => Line::from(Span::styled(
                format!(
                    "    {} {}",
                    padded(&[
                        ("Id", COLUMN_WIDTHS[0]),
                        ("Entity", COLUMN_WIDTHS[1]),
                        ("Severity", COLUMN_WIDTHS[2]),
                        ("Expected", COLUMN_WIDTHS[3]),
                        ("Observed", COLUMN_WIDTHS[4]),
                    ]),
                    "Message"
                ),
                Style::default()
                    .fg(self.theme.border)
                    .add_modifier(Modifier::BOLD),
            )),
        }
    }

    fn row_line(&self, group: &'a FeatureGroup, index: usize) -> Line<'a> {
        let Some(record) = group.records.get(index) else {
            return Line::from("");
        };
        let (guid, ifc_type) = self.instances.resolve(&record.instance_id);
        let severity = self.labels.severity_label(record.severity);
        let color = self.theme.label_color(self.labels.severity_color(record.severity));

        let id_cols = padded(&[(guid, COLUMN_WIDTHS[0]), (ifc_type, COLUMN_WIDTHS[1])]);
        let value_cols = padded(&[
            (record.expected.as_str(), COLUMN_WIDTHS[3]),
            (record.observed.as_str(), COLUMN_WIDTHS[4]),
        ]);
        Line::from(vec![
            Span::styled(format!("    {} ", id_cols), Style::default().fg(self.theme.fg)),
            Span::styled(fit(&severity, COLUMN_WIDTHS[2]), Style::default().fg(color)),
            Span::styled(
                format!(" {} {}", value_cols, record.message_or_placeholder()),
                Style::default().fg(self.theme.fg),
            ),
        ])
    }
}

/// Cells padded to their widths and joined by a space.
fn padded(cells: &[(&str, usize)]) -> String {
    cells
        .iter()
        .map(|(cell, width)| fit(cell, *width))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate or pad `s` to exactly `width` characters.
fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('\u{2026}');
        cut
    } else {
        format!("{:<width$}", s, width = width)
    }
}

impl StatefulWidget for FeatureTree<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let items: Vec<ListItem> = self
            .items
            .iter()
            .filter_map(|item| {
                let group = self.groups.get(item.group_index())?;
                let line = match *item {
                    TreeItem::Group(_) => self.group_line(group),
                    TreeItem::Detail(_, detail) => self.detail_line(group, detail),
                    TreeItem::Row(_, r) => self.row_line(group, r),
                };
                Some(ListItem::new(line))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Features")
                    .border_style(Style::default().fg(self.theme.highlight)),
            )
            .style(Style::default().fg(self.theme.fg))
            .highlight_style(
                Style::default()
                    .fg(self.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        StatefulWidget::render(list, area, buf, state);
    }
}
