use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::model::PLACEHOLDER;
use crate::pipeline::GroupedPage;

use super::{Renderer, ResultView, ViewEvent};

#[derive(Serialize)]
struct JsonView<'a> {
    summary: &'a str,
    status: &'a str,
    status_label: &'a str,
    show_all: bool,
    #[serde(flatten)]
    page: &'a GroupedPage,
    instances: BTreeMap<&'a str, ResolvedInstance<'a>>,
}

#[derive(Serialize)]
struct ResolvedInstance<'a> {
    guid: &'a str,
    #[serde(rename = "type")]
    ifc_type: &'a str,
}

/// Guid and type for every instance referenced on the page. Unknown ids
/// resolve to the `?` placeholder; records without an instance are skipped.
fn resolve_instances<'a>(view: &'a ResultView<'_>) -> BTreeMap<&'a str, ResolvedInstance<'a>> {
    view.groups()
        .iter()
        .flat_map(|g| &g.records)
        .map(|r| r.instance_id.as_str())
        .filter(|id| !id.is_empty() && *id != PLACEHOLDER)
        .map(|id| {
            let (guid, ifc_type) = view.instances.resolve(id);
            (id, ResolvedInstance { guid, ifc_type })
        })
        .collect()
}

/// Writes the current page as pretty-printed JSON, then quits.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &ResultView<'_>) -> Result<()> {
        let json = JsonView {
            summary: view.summary,
            status: view.status,
            status_label: view.status_label(),
            show_all: view.show_all,
            page: &view.page,
            instances: resolve_instances(view),
        };
        serde_json::to_writer_pretty(&mut self.out, &json).map_err(std::io::Error::from)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn next_event(&mut self, _timeout: Duration) -> Result<Option<ViewEvent>> {
        Ok(Some(ViewEvent::Quit))
    }
}
