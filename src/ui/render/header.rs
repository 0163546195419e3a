use crate::ui::theme::Theme;
use crate::ui::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(vec![Span::styled(
            format!("  {}", app.project()),
            Theme::title(),
        )]),
        Line::from(vec![Span::styled(
            format!("  {}", Theme::SECTION_ENVIRONMENTS),
            Theme::text_muted(),
        )]),
    ];

    let header = Paragraph::new(lines).style(Style::default().bg(Theme::BG));
    frame.render_widget(header, area);
}
