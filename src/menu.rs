//! Paginated, keyboard-driven selection list.
//!
//! Navigation lives in [`state`] as a pure transition over [`MenuState`];
//! [`draw`] projects a state onto a frame; [`session`] owns the real
//! terminal. [`PaginatedMenu::run`] ties the three together over any ratatui
//! backend, which is how the tests drive it.

use std::io;

use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::model::MenuRow;

pub mod draw;
pub mod layout;
pub mod session;
pub mod state;

pub use self::draw::Geometry;
pub use self::session::{CrosstermKeys, KeySource, TerminalSession};
pub use self::state::{MenuKey, MenuState, Transition, partition};

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("terminal too small ({cols}x{rows}); enlarge the window and retry")]
    TerminalTooSmall { cols: u16, rows: u16 },
    #[error("terminal i/o failed")]
    Io(#[from] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a, R> {
    Selected(&'a R),
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Selected(usize),
    Cancelled,
    Abort,
}

pub struct PaginatedMenu<'a, R> {
    items: &'a [R],
    fields: Vec<usize>,
    title: Option<String>,
    quit_key: char,
}

impl<'a, R: MenuRow> PaginatedMenu<'a, R> {
    pub fn new(items: &'a [R], fields: &[usize]) -> Self {
        Self {
            items,
            fields: fields.to_vec(),
            title: None,
            quit_key: 'q',
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn quit_key(mut self, key: char) -> Self {
        self.quit_key = key;
        self
    }

    /// Runs the menu on the real terminal.
    ///
    /// An empty list is cancelled without touching the terminal. Quitting
    /// (Esc or the quit key) restores the terminal and exits the process.
    pub fn select(&self) -> Result<Selection<'a, R>, MenuError> {
        if self.items.is_empty() {
            return Ok(Selection::Cancelled);
        }

        let mut session = TerminalSession::enter()?;
        let outcome = self.run(session.terminal_mut(), &mut CrosstermKeys);
        drop(session);

        match outcome? {
            MenuOutcome::Selected(i) => Ok(Selection::Selected(&self.items[i])),
            MenuOutcome::Cancelled => Ok(Selection::Cancelled),
            MenuOutcome::Abort => {
                tracing::debug!("selection aborted by user");
                std::process::exit(0);
            }
        }
    }

    pub fn run<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        keys: &mut impl KeySource,
    ) -> Result<MenuOutcome, MenuError> {
        if self.items.is_empty() {
            return Ok(MenuOutcome::Cancelled);
        }

        let geometry = Geometry::from_size(terminal.size()?);
        let capacity = geometry.page_capacity();
        geometry.ensure_fits(capacity)?;

        let mut state = MenuState::new(self.items.len(), capacity);
        terminal.clear()?;

        loop {
            let geometry = Geometry::from_size(terminal.size()?).ensure_fits(capacity)?;
            let rows = self.page_rows(&state, geometry.row_width());
            terminal.draw(|f| draw::render(f, &geometry, self.title.as_deref(), &state, &rows))?;

            let key = MenuKey::from_event(keys.next_key()?, self.quit_key);
            match state.transition(key) {
                Transition::Continue(next) => state = next,
                Transition::Commit(i) => return Ok(MenuOutcome::Selected(i)),
                Transition::Abort => return Ok(MenuOutcome::Abort),
            }
        }
    }

    fn page_rows(&self, state: &MenuState, width: usize) -> Vec<String> {
        self.items[state.page_range()]
            .iter()
            .map(|item| {
                let values = self
                    .fields
                    .iter()
                    .map(|f| item.field(*f))
                    .collect::<Vec<_>>();
                layout::layout_row(&values, width)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/menu/run_tests.rs"]
mod tests;
