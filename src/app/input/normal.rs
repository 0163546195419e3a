use crate::ui::App;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle key events in normal mode (no overlay, no prompt)
pub(super) fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('x') => {
            if app.drawer.visible() {
                app.close_drawer();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Home => app.cursor_first(),
        KeyCode::End | KeyCode::Char('G') => app.cursor_last(),
        KeyCode::Enter | KeyCode::Char('l') => app.open_selected(),
        KeyCode::Char('[') | KeyCode::Backspace => app.navigate_back(),
        KeyCode::Char(']') => app.navigate_forward(),
        KeyCode::Char('g') => app.start_address_input(),
        KeyCode::Char('p') => app.start_project_input(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    Ok(())
}
