mod layout;
mod theme;
mod tree;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::error::Result;
use crate::render::{Renderer, ResultView, ViewEvent};

use layout::{draw, TreeState};
pub use theme::Theme;

/// Interactive renderer on the alternate screen. The terminal is restored
/// when the renderer is dropped.
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: TreeState,
}

impl TuiRenderer {
    pub fn new(theme: Theme) -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = restore_on_error(enter_alternate_screen(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;
        debug!("Entered alternate screen");

        Ok(Self {
            terminal,
            state: TreeState::new(theme),
        })
    }
}

fn enter_alternate_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Runs `restore` before handing back a failed setup step.
fn restore_on_error<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

impl Renderer for TuiRenderer {
    fn render(&mut self, view: &ResultView<'_>) -> Result<()> {
        self.state.sync(view);
        let state = &mut self.state;
        self.terminal.draw(|f| draw(f, state, view))?;
        Ok(())
    }

    fn next_event(&mut self, timeout: Duration) -> Result<Option<ViewEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let view_event = match event::read()? {
            Event::Resize(_, _) => Some(ViewEvent::Refresh),
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    Some(ViewEvent::Quit)
                } else {
                    self.state.handle_key(key.code)
                }
            }
            _ => None,
        };
        Ok(view_event)
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
