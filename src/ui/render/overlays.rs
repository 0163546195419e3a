use crate::ui::helpers::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub(super) fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let rows: &[(&str, &str)] = &[
        ("↑/k ↓/j", "move between environments"),
        ("↵ / l", "open the environment in the drawer"),
        ("esc / x", "close the drawer"),
        ("[ / ]", "back / forward through addresses"),
        ("g", "go to an address"),
        ("p", "switch project"),
        ("r", "refresh environments"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, description) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<10}", key), Theme::key()),
            Span::styled(*description, Theme::text()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "   Clicking outside the drawer does not close it.",
        Theme::text_dim(),
    )]));

    let block = Block::default()
        .title(" Help ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::GREY_500))
        .style(Style::default().bg(Theme::GREY_700));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
