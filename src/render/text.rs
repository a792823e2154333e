use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::pipeline::FeatureGroup;

use super::{Renderer, ResultView, ViewEvent, SHOW_ALL_LABEL};

const COLUMNS: [&str; 6] = ["Id", "Entity", "Severity", "Expected", "Observed", "Message"];
const WIDTHS: [usize; 5] = [10, 20, 10, 16, 16];

/// Writes one page of results as plain text, then quits.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_group(&mut self, group: &FeatureGroup, view: &ResultView<'_>) -> Result<()> {
        writeln!(
            self.out,
            "[{}] {} ({})",
            view.labels.severity_label(group.aggregate_severity),
            group.key,
            group.len()
        )?;
        writeln!(self.out, "    \u{24d8} {}", group.feature_text().unwrap_or("-"))?;
        if let Some(url) = group.feature_url() {
            writeln!(self.out, "    {}", url)?;
        }
        writeln!(self.out, "    {}", table_line(&COLUMNS.map(String::from)))?;

        for record in &group.records {
            let (guid, ifc_type) = view.instances.resolve(&record.instance_id);
            let cells = [
                guid.to_string(),
                ifc_type.to_string(),
                view.labels.severity_label(record.severity).into_owned(),
                record.expected.clone(),
                record.observed.clone(),
                record.message_or_placeholder().to_string(),
            ];
            writeln!(self.out, "    {}", table_line(&cells))?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

fn table_line(cells: &[String; 6]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(WIDTHS) {
        line.push_str(&format!("{:<width$} ", cell, width = width));
    }
    line.push_str(&cells[5]);
    line
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &ResultView<'_>) -> Result<()> {
        let checkbox = if view.show_all { "[x]" } else { "[ ]" };
        writeln!(self.out, "{}", view.summary)?;
        writeln!(self.out, "{} {}", checkbox, SHOW_ALL_LABEL)?;
        writeln!(self.out)?;

        if view.groups().is_empty() {
            writeln!(self.out, "{}", view.status_label())?;
        } else {
            for group in view.groups() {
                self.write_group(group, view)?;
            }
        }

        if view.pagination_visible {
            writeln!(self.out, "{}", view.pagination_text())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn next_event(&mut self, _timeout: Duration) -> Result<Option<ViewEvent>> {
        Ok(Some(ViewEvent::Quit))
    }
}
