use crate::ui::theme::Theme;
use crate::ui::{App, InputMode};
use crate::util::truncate;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut status = vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            if app.history.can_go_back() { "◂" } else { " " },
            Theme::text_dim(),
        ),
        Span::styled(
            if app.history.can_go_forward() { "▸ " } else { "  " },
            Theme::text_dim(),
        ),
        Span::styled(app.address().to_string(), Theme::text()),
        Span::styled(format!(" {} ", Theme::DOT_SEPARATOR), Theme::text_dim()),
    ];

    if app.fetch.in_flight() {
        status.push(Span::styled(
            format!("{} fetching", app.spinner()),
            Theme::text_muted(),
        ));
    } else if let Some(err) = &app.fetch_error {
        status.push(Span::styled(
            truncate(err, area.width.saturating_sub(40) as usize),
            Style::default().fg(Theme::RED),
        ));
    } else if let Some(at) = app.last_fetched_at {
        status.push(Span::styled(
            format!("updated {}", at.format("%H:%M:%S")),
            Theme::text_muted(),
        ));
    }

    let prompt = match app.input_mode {
        InputMode::Address => Some("address"),
        InputMode::Project => Some("project"),
        InputMode::Normal => None,
    };

    let second = match prompt {
        Some(label) => Line::from(vec![
            Span::styled(format!("  {} ", label), Theme::key()),
            Span::styled(format!("{}_", app.input), Theme::text()),
            Span::styled("   ↵ go  esc cancel", Theme::text_dim()),
        ]),
        None => {
            let hints: &[(&str, &str)] = if app.drawer.visible() {
                &[("esc", "close"), ("↵", "switch"), ("[ ]", "back/fwd"), ("?", "help")]
            } else {
                &[
                    ("↵", "open"),
                    ("g", "address"),
                    ("p", "project"),
                    ("r", "refresh"),
                    ("[ ]", "back/fwd"),
                    ("?", "help"),
                    ("q", "quit"),
                ]
            };
            let mut spans = vec![Span::styled("  ", Style::default())];
            for (key, label) in hints {
                spans.push(Span::styled(*key, Theme::key()));
                spans.push(Span::styled(format!(" {}  ", label), Theme::text_dim()));
            }
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(vec![Line::from(""), Line::from(status), second])
        .style(Style::default().bg(Theme::GREY_800));
    frame.render_widget(footer, area);
}
