//! Terminal window title sink.

use crate::render::drawer::WindowTitle;
use crate::view::layout::DEFAULT_TITLE;
use crossterm::terminal::SetTitle;
use std::io;
use tracing::warn;

/// Remembers the last title for the status bar and, when attached,
/// forwards it to the terminal emulator.
#[derive(Debug, Clone)]
pub struct TerminalTitle {
    current: String,
    attached: bool,
}

impl TerminalTitle {
    /// Title that also sets the terminal's own window title.
    pub fn attached() -> Self {
        Self {
            current: DEFAULT_TITLE.to_string(),
            attached: true,
        }
    }

    /// Title that only updates the status bar.
    pub fn detached() -> Self {
        Self {
            current: DEFAULT_TITLE.to_string(),
            attached: false,
        }
    }

    /// Most recent title.
    pub fn current(&self) -> &str {
        &self.current
    }
}

impl WindowTitle for TerminalTitle {
    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.current);
        if self.attached {
            if let Err(err) = crossterm::execute!(io::stdout(), SetTitle(title)) {
                warn!(error = %err, "Failed to set terminal title");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_title() {
        assert_eq!(TerminalTitle::detached().current(), DEFAULT_TITLE);
    }

    #[test]
    fn detached_title_records_updates() {
        let mut title = TerminalTitle::detached();
        title.set_title("Tilemap Viewer - FPS: 60");
        assert_eq!(title.current(), "Tilemap Viewer - FPS: 60");
    }
}
