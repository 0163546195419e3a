//! Input handling for envscope
//!
//! Key handlers only express intents on [`App`]; fetching happens in the
//! runtime loop, so nothing here touches the background channel.

use crate::ui::{App, InputMode, Overlay};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

mod normal;
mod overlay;
mod prompt;

use normal::handle_normal_mode;
use overlay::handle_overlay_input;
use prompt::handle_prompt_input;

// ═══════════════════════════════════════════════════════════════════════════
//  MAIN INPUT DISPATCHER
// ═══════════════════════════════════════════════════════════════════════════

/// Main key event handler - dispatches to mode-specific handlers
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.input_mode {
        InputMode::Address | InputMode::Project => return handle_prompt_input(app, key),
        InputMode::Normal => {}
    }

    if app.overlay != Overlay::None {
        return handle_overlay_input(app, key);
    }

    handle_normal_mode(app, key)
}

/// Mouse handler. Only left clicks do anything, and not while a prompt or
/// overlay has focus.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if app.input_mode != InputMode::Normal || app.overlay != Overlay::None {
        return Ok(());
    }
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        app.click(mouse.column, mouse.row);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::environment::Environment;
    use crate::route::History;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::layout::Rect;

    fn app_at(address: &str) -> App {
        let mut app = App::new(Config::default(), History::new(address), "test").unwrap();
        let ticket = app.take_fetch_request().unwrap();
        app.apply_fetch_result(
            &ticket,
            Ok(vec![Environment::named("staging"), Environment::named("prod")]),
        );
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_opens_and_esc_closes() {
        let mut app = app_at("/project/P");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.address(), "/project/P/environment/prod");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.address(), "/project/P");
        assert!(!app.drawer.visible());
    }

    #[test]
    fn test_switching_with_drawer_open() {
        let mut app = app_at("/project/P/environment/staging");
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.drawer.selected(), Some("prod"));
        assert_eq!(app.address(), "/project/P/environment/prod");
    }

    #[test]
    fn test_address_prompt_navigates() {
        let mut app = app_at("/project/P");
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.input_mode, InputMode::Address);

        app.input.clear();
        type_str(&mut app, "/project/P/environment/staging");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.drawer.selected(), Some("staging"));
    }

    #[test]
    fn test_prompt_swallows_normal_keys() {
        let mut app = app_at("/project/P");
        press(&mut app, KeyCode::Char('p'));
        type_str(&mut app, "qx");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.address(), "/project/P");
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let mut app = app_at("/project/P");
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);

        press(&mut app, KeyCode::Enter);
        assert!(!app.drawer.visible());

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app_at("/project/P");
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_mouse_ignored_while_prompting() {
        let mut app = app_at("/project/P/environment/prod");
        app.viewport = Rect::new(0, 0, 100, 30);
        app.start_project_input();

        let areas = crate::ui::Areas::compute(app.viewport);
        let close = crate::ui::drawer::close_button_rect(areas.drawer);
        handle_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: close.x,
                row: close.y,
                modifiers: KeyModifiers::NONE,
            },
        )
        .unwrap();

        assert!(app.drawer.visible());
    }
}
