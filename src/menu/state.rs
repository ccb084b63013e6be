use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Highlight jump for page-up / page-down.
pub const JUMP: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Left,
    Right,
    Enter,
    Quit,
    Other(char),
    Unbound,
}

impl MenuKey {
    pub fn from_event(key: KeyEvent, quit_key: char) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up => MenuKey::Up,
            KeyCode::Down => MenuKey::Down,
            KeyCode::PageUp => MenuKey::PageUp,
            KeyCode::PageDown => MenuKey::PageDown,
            KeyCode::Home => MenuKey::Home,
            KeyCode::End => MenuKey::End,
            KeyCode::Left => MenuKey::Left,
            KeyCode::Right => MenuKey::Right,
            KeyCode::Enter => MenuKey::Enter,
            KeyCode::Esc => MenuKey::Quit,
            KeyCode::Char('u') if ctrl => MenuKey::PageUp,
            KeyCode::Char('d') if ctrl => MenuKey::PageDown,
            KeyCode::Char(c) if c == quit_key => MenuKey::Quit,
            KeyCode::Char(c) => MenuKey::Other(c),
            _ => MenuKey::Unbound,
        }
    }

    pub fn label(self) -> String {
        match self {
            MenuKey::Up => "up".into(),
            MenuKey::Down => "down".into(),
            MenuKey::PageUp => "pgup".into(),
            MenuKey::PageDown => "pgdn".into(),
            MenuKey::Home => "home".into(),
            MenuKey::End => "end".into(),
            MenuKey::Left => "left".into(),
            MenuKey::Right => "right".into(),
            MenuKey::Enter => "enter".into(),
            MenuKey::Quit => "quit".into(),
            MenuKey::Other(c) => c.to_string(),
            MenuKey::Unbound => "?".into(),
        }
    }
}

/// Navigation state over `total` rows split into pages of `page_capacity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuState {
    total: usize,
    page_capacity: usize,
    current_page: usize,
    highlighted: usize,
    last_key: Option<MenuKey>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Continue(MenuState),
    /// Index into the original, unpartitioned list.
    Commit(usize),
    Abort,
}

impl MenuState {
    /// `total` must be non-zero; a zero capacity is bumped to one row.
    pub fn new(total: usize, page_capacity: usize) -> Self {
        debug_assert!(total > 0, "menu state over an empty list");
        Self {
            total,
            page_capacity: page_capacity.max(1),
            current_page: 0,
            highlighted: 0,
            last_key: None,
        }
    }

    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_capacity)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn last_key(&self) -> Option<MenuKey> {
        self.last_key
    }

    /// Global index range of the rows on the current page.
    pub fn page_range(&self) -> std::ops::Range<usize> {
        let start = self.current_page * self.page_capacity;
        start..(start + self.page_capacity).min(self.total)
    }

    pub fn page_len(&self) -> usize {
        self.page_range().len()
    }

    pub fn selected_index(&self) -> usize {
        self.current_page * self.page_capacity + self.highlighted
    }

    pub fn transition(self, key: MenuKey) -> Transition {
        let mut next = self;
        next.last_key = Some(key);
        let last = self.page_len() - 1;

        match key {
            MenuKey::Up => {
                next.highlighted = if self.highlighted == 0 {
                    last
                } else {
                    self.highlighted - 1
                };
            }
            MenuKey::Down => {
                next.highlighted = if self.highlighted >= last {
                    0
                } else {
                    self.highlighted + 1
                };
            }
            MenuKey::PageUp => next.highlighted = self.highlighted.saturating_sub(JUMP),
            MenuKey::PageDown => next.highlighted = (self.highlighted + JUMP).min(last),
            MenuKey::Home => next.highlighted = 0,
            MenuKey::End => next.highlighted = last,
            MenuKey::Left => {
                if self.current_page > 0 {
                    next.current_page -= 1;
                    next.highlighted = 0;
                }
            }
            MenuKey::Right => {
                if self.current_page + 1 < self.page_count() {
                    next.current_page += 1;
                    next.highlighted = 0;
                }
            }
            MenuKey::Enter => return Transition::Commit(self.selected_index()),
            MenuKey::Quit => return Transition::Abort,
            MenuKey::Other(_) | MenuKey::Unbound => {}
        }
        Transition::Continue(next)
    }
}

/// Splits `items` into consecutive pages of at most `capacity` rows.
pub fn partition<T>(items: &[T], capacity: usize) -> Vec<&[T]> {
    items.chunks(capacity.max(1)).collect()
}

#[cfg(test)]
#[path = "../tests/menu/state_tests.rs"]
mod tests;
