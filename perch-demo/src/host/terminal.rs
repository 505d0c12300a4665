//! Terminal setup and teardown with panic safety.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use super::screen::Screen;

/// Owns the terminal for the lifetime of the demo and restores it on drop.
pub struct TerminalGuard {
    stdout: Stdout,
    screen: Screen,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            screen: Screen::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        self.screen.size()
    }

    /// Start a new frame, resizing the buffers if the terminal changed size.
    pub fn screen(&mut self) -> io::Result<&mut Screen> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.screen.size() {
            self.screen = Screen::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        self.screen.clear();
        Ok(&mut self.screen)
    }

    /// Write the cells that changed since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        self.screen.flush_diff(&mut self.stdout)?;
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        cursor::Show,
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    Ok(())
}
