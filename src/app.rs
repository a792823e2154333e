use std::time::Duration;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Labels, ResultDocument};
use crate::pipeline::{PipelineState, ResultGrouper};
use crate::render::{Renderer, ResultView, ViewEvent};

const TICK: Duration = Duration::from_millis(250);

/// The loaded document plus everything needed to project it onto a page.
pub struct Session {
    pub document: ResultDocument,
    grouper: ResultGrouper,
    labels: Labels,
    pub state: PipelineState,
}

impl Session {
    pub fn new(
        document: ResultDocument,
        grouper: ResultGrouper,
        labels: Labels,
        state: PipelineState,
    ) -> Self {
        let mut session = Self {
            document,
            grouper,
            labels,
            state,
        };
        session.clamp_page();
        session
    }

    pub fn view(&self) -> ResultView<'_> {
        ResultView {
            summary: &self.document.summary,
            status: &self.document.status,
            page: self.grouper.run(&self.document.content, &self.state),
            show_all: self.state.show_all,
            pagination_visible: !self.document.is_empty(),
            instances: &self.document.instances,
            labels: &self.labels,
        }
    }

    /// Apply a user event. Returns true when the view must be redrawn.
    pub fn apply(&mut self, event: ViewEvent) -> bool {
        match event {
            ViewEvent::PageChanged(page) => {
                let total = self.group_count();
                self.state.set_page(page, total, self.grouper.page_size())
            }
            ViewEvent::ShowAllChanged(show_all) => self.state.set_show_all(show_all),
            ViewEvent::Refresh => true,
            ViewEvent::Quit => false,
        }
    }

    /// Swap in a reloaded document, keeping the page if it still exists.
    pub fn replace_document(&mut self, document: ResultDocument) {
        self.document = document;
        self.clamp_page();
    }

    fn group_count(&self) -> usize {
        self.grouper
            .group(&self.document.content, self.state.show_all)
            .len()
    }

    fn clamp_page(&mut self) {
        let total = self.group_count();
        self.state.clamp(total, self.grouper.page_size());
    }
}

/// Drive `renderer` until it reports `Quit`. `reload` is polled once per
/// tick and yields a new document when the source changed.
pub fn run<R: Renderer>(
    renderer: &mut R,
    session: &mut Session,
    mut reload: impl FnMut() -> Option<ResultDocument>,
) -> Result<()> {
    let mut dirty = true;

    loop {
        if let Some(document) = reload() {
            info!("Report reloaded ({} results)", document.content.len());
            session.replace_document(document);
            dirty = true;
        }

        // Only redraw when state has changed
        if dirty {
            renderer.render(&session.view())?;
            dirty = false;
        }

        match renderer.next_event(TICK)? {
            Some(ViewEvent::Quit) => break,
            Some(event) => {
                debug!(?event, "View event");
                dirty |= session.apply(event);
            }
            None => {}
        }
    }

    Ok(())
}
