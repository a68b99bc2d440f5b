//! Terminal setup and teardown for the alternate-screen TUI.

use std::io::Stdout;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::RuntimeResult;

/// Enter raw mode on the alternate screen and hand back the terminal.
///
/// # Errors
/// Propagates terminal and raw-mode failures.
pub fn setup() -> RuntimeResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Leave the alternate screen and raw mode. Safe to call on a half-set-up
/// terminal; later failures still run the earlier teardown steps.
///
/// # Errors
/// Propagates terminal and raw-mode failures.
pub fn restore() -> RuntimeResult<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
