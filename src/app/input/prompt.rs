use crate::ui::App;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle key events while typing an address or project name
pub(super) fn handle_prompt_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => app.input_pop(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }
    Ok(())
}
