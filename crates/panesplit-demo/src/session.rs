#![forbid(unsafe_code)]

//! Raw-mode terminal session with mouse capture, restored on drop.

use std::io::{self, Write};

use crossterm::{cursor, event, execute, terminal};

pub struct Session {
    raw: bool,
    alternate: bool,
    mouse: bool,
}

impl Session {
    /// Enter raw mode, the alternate screen, and mouse reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if any terminal mode cannot be enabled. Modes that
    /// were already switched on are undone when the partial session drops.
    pub fn new() -> io::Result<Self> {
        let mut session = Self {
            raw: false,
            alternate: false,
            mouse: false,
        };
        terminal::enable_raw_mode()?;
        session.raw = true;
        tracing::info!("terminal raw mode enabled");

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide,
        )?;
        session.alternate = true;

        execute!(stdout, event::EnableMouseCapture, event::EnableFocusChange)?;
        session.mouse = true;
        tracing::info!("mouse capture enabled");
        Ok(session)
    }

    /// Current terminal size in cells.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = execute!(stdout, event::DisableFocusChange, event::DisableMouseCapture);
            self.mouse = false;
        }
        if self.alternate {
            let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
            self.alternate = false;
        }
        if self.raw {
            let _ = terminal::disable_raw_mode();
            self.raw = false;
        }
        let _ = stdout.flush();
        tracing::info!("terminal restored");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cleanup();
    }
}
