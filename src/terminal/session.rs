//! Terminal session: Raw mode and alternate screen for the marquee.
//!
//! Entering a session takes over the terminal; dropping it restores the
//! previous state even on early return.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout};
use std::time::Duration;

/// An active full-screen terminal session.
pub struct TerminalSession {
    stdout: Stdout,
    width: u16,
    height: u16,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, hiding the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        Ok(Self {
            stdout,
            width,
            height,
        })
    }

    /// Terminal width at the last size check.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height at the last size check.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The terminal writer, for flushing an output buffer.
    pub const fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    /// Wait up to `timeout` for input and report whether the user asked to
    /// quit (`q`, Escape or Ctrl-C). Resize events update the cached size.
    ///
    /// # Errors
    ///
    /// Returns an error if reading terminal events fails.
    pub fn poll_quit(&mut self, timeout: Duration) -> io::Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(matches!(
                (key.code, key.modifiers),
                (KeyCode::Char('q') | KeyCode::Esc, _)
                    | (KeyCode::Char('c'), KeyModifiers::CONTROL)
            )),
            Event::Resize(width, height) => {
                self.width = width;
                self.height = height;
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
