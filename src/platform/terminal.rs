//! Terminal mode restore
//!
//! Once raw mode is on, a `TerminalGuard` puts the terminal back when it is
//! dropped, including on early `?` returns during setup.

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::PopKeyboardEnhancementFlags,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};

/// Leave raw mode and the alternate screen; pop keyboard flags if pushed
pub fn restore_terminal(enhanced: bool) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    let mut stdout = io::stdout();
    if enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags).context("pop keyboard flags")?;
    }
    execute!(stdout, LeaveAlternateScreen, Show).context("leave alternate screen")?;
    Ok(())
}

pub struct TerminalGuard {
    /// Keyboard enhancement flags were pushed
    enhanced: bool,
    restore: fn(bool) -> Result<()>,
}

impl TerminalGuard {
    pub fn new() -> Self {
        Self::with_restore(restore_terminal)
    }

    pub fn with_restore(restore: fn(bool) -> Result<()>) -> Self {
        Self {
            enhanced: false,
            restore,
        }
    }

    pub fn set_enhanced(&mut self) {
        self.enhanced = true;
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)(self.enhanced) {
            log::warn!("Could not restore terminal: {:#}", e);
        }
    }
}
