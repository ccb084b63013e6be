use std::collections::VecDeque;
use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Blocking source of key presses.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(k) = event::read()?
                && k.kind == KeyEventKind::Press
            {
                return Ok(k);
            }
        }
    }
}

/// Scripted keys; running dry is an error rather than a hang.
impl KeySource for VecDeque<KeyEvent> {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))
    }
}

/// Raw mode plus the alternate screen, undone when dropped.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            restore(&mut stdout);
            return Err(err);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                restore(&mut io::stdout());
                Err(err)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore(self.terminal.backend_mut());
    }
}

/// Best effort: a failing step must not stop the next one.
fn restore(out: &mut impl io::Write) {
    if let Err(err) = disable_raw_mode() {
        tracing::debug!(error = %err, "disable raw mode");
    }
    if let Err(err) = write_restore(out) {
        tracing::debug!(error = %err, "leave alternate screen");
    }
}

fn write_restore(out: &mut impl io::Write) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

#[cfg(test)]
#[path = "../tests/menu/session_tests.rs"]
mod tests;
