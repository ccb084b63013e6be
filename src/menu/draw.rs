use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::MenuError;
use super::layout::ID_COLUMN_WIDTH;
use super::state::MenuState;

const X_OFFSET: u16 = 6;
const Y_OFFSET: u16 = 2;
const X_MARGIN: u16 = 12;
const Y_MARGIN: u16 = 4;
const BORDER: u16 = 2;

/// Banner, title, margins and the list border.
pub const CHROME_ROWS: u16 = Y_MARGIN + BORDER;
pub const MIN_ROW_WIDTH: usize = ID_COLUMN_WIDTH + 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub cols: u16,
    pub rows: u16,
}

impl Geometry {
    pub fn from_size(size: Size) -> Self {
        Self {
            cols: size.width,
            rows: size.height,
        }
    }

    pub fn page_capacity(&self) -> usize {
        self.rows.saturating_sub(CHROME_ROWS) as usize
    }

    pub fn row_width(&self) -> usize {
        self.cols.saturating_sub(X_MARGIN + BORDER) as usize
    }

    /// Fails unless at least `capacity` rows (and one at minimum) fit.
    pub fn ensure_fits(self, capacity: usize) -> Result<Self, MenuError> {
        if capacity == 0 || self.page_capacity() < capacity || self.row_width() < MIN_ROW_WIDTH {
            return Err(MenuError::TerminalTooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(self)
    }

    fn list_area(&self) -> Rect {
        Rect::new(
            X_OFFSET,
            Y_OFFSET,
            self.cols.saturating_sub(X_MARGIN),
            self.rows.saturating_sub(Y_MARGIN),
        )
    }
}

pub(super) fn render(
    frame: &mut ratatui::Frame,
    geometry: &Geometry,
    title: Option<&str>,
    state: &MenuState,
    rows: &[String],
) {
    let width = frame.area().width;
    frame.render_widget(
        Paragraph::new(format!("ncps v{}", crate::VERSION)),
        Rect::new(0, 0, width, 1),
    );
    if let Some(title) = title {
        frame.render_widget(
            Paragraph::new(title.to_string()).alignment(Alignment::Center),
            Rect::new(0, 1, width, 1),
        );
    }

    let key = state.last_key().map(|k| k.label()).unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title_top(Line::from(state.highlighted().to_string()))
        .title_top(
            Line::from(format!(
                "{}/{}",
                state.current_page() + 1,
                state.page_count()
            ))
            .centered(),
        )
        .title_top(Line::from(key).right_aligned());

    let area = geometry.list_area();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let reversed = Style::default().add_modifier(Modifier::REVERSED);
    let lines = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if i == state.highlighted() {
                Line::styled(row.clone(), reversed)
            } else {
                Line::raw(row.clone())
            }
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}
