//! The environment drawer, a panel covering the right of the screen

use super::health::health_badge;
use super::theme::Theme;
use super::App;
use crate::drawer::DrawerContent;
use crate::environment::Environment;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Share of the available width the drawer takes
const DRAWER_WIDTH_PERCENT: u16 = 80;

pub fn drawer_area(area: Rect) -> Rect {
    let width = area.width.saturating_mul(DRAWER_WIDTH_PERCENT) / 100;
    Rect {
        x: area.x + area.width.saturating_sub(width),
        width,
        ..area
    }
}

/// The close control sits on the drawer's top border, right-aligned
pub fn close_button_rect(drawer: Rect) -> Rect {
    let width = Theme::DRAWER_CLOSE.len() as u16;
    Rect {
        x: drawer.x + drawer.width.saturating_sub(width + 1),
        y: drawer.y,
        width: width.min(drawer.width),
        height: 1.min(drawer.height),
    }
}

pub fn close_button_hit(drawer: Rect, column: u16, row: u16) -> bool {
    let button = close_button_rect(drawer);
    row == button.y && column >= button.x && column < button.x + button.width
}

pub fn render_drawer(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Clear, area);

    let title = app.drawer.selected().unwrap_or_default();
    let lines = match app.drawer_content() {
        DrawerContent::Ready(environment) => ready_lines(environment, app),
        DrawerContent::Loading(_) => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("   {} ", app.spinner()), Theme::text_muted()),
                Span::styled("Loading environment...", Theme::text_muted()),
            ]),
        ],
        DrawerContent::NotFound(name) => vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                format!("   No environment named {} in project {}", name, app.project()),
                Theme::text_dim(),
            )]),
        ],
        DrawerContent::Hidden => Vec::new(),
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Theme::title())
        .title_top(Line::from(Span::styled(Theme::DRAWER_CLOSE, Theme::key())).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::GREY_500))
        .style(Style::default().bg(Theme::GREY_700));

    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn ready_lines<'a>(environment: &'a Environment, app: &'a App) -> Vec<Line<'a>> {
    let mut health = vec![Span::raw("   ")];
    health.extend(health_badge(environment.health()));

    let mut lines = vec![Line::from(""), Line::from(health), Line::from("")];

    if let Some(namespace) = environment.metadata.namespace.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("   namespace  ", Theme::text_dim()),
            Span::styled(namespace, Theme::text()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("   address    ", Theme::text_dim()),
        Span::styled(app.address(), Theme::text_muted()),
    ]));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawer_takes_right_eighty_percent() {
        let area = drawer_area(Rect::new(0, 0, 100, 20));
        assert_eq!(area, Rect::new(20, 0, 80, 20));
    }

    #[test]
    fn test_close_button_on_top_border() {
        let drawer = Rect::new(20, 0, 80, 20);
        let button = close_button_rect(drawer);
        assert_eq!(button, Rect::new(96, 0, 3, 1));
        assert!(close_button_hit(drawer, 97, 0));
        assert!(!close_button_hit(drawer, 97, 1));
        assert!(!close_button_hit(drawer, 50, 0));
    }
}
