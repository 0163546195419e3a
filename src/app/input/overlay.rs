use crate::ui::{App, Overlay};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle key events when an overlay is active
pub(super) fn handle_overlay_input(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.overlay == Overlay::Help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.close_overlay(),
            _ => {}
        }
    }
    Ok(())
}
