//! The environment list
//!
//! One row per fetched environment, in fetch order. Rows are one line each and
//! start directly below the panel's top border.

use super::health::health_indicator;
use super::theme::Theme;
use super::App;
use crate::util::truncate;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows that fit inside the bordered panel
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

/// First visible row so the cursor stays on screen
pub fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    cursor.saturating_sub(visible - 1)
}

/// Row index under a terminal cell, if any
pub fn row_at(area: Rect, cursor: usize, row_count: usize, column: u16, row: u16) -> Option<usize> {
    let inner_left = area.x.saturating_add(1);
    let inner_right = area.x.saturating_add(area.width).saturating_sub(1);
    let first = area.y.saturating_add(1);
    let visible = visible_rows(area);

    if column < inner_left || column >= inner_right || row < first {
        return None;
    }
    let line = (row - first) as usize;
    if line >= visible {
        return None;
    }

    let index = scroll_offset(cursor, visible) + line;
    (index < row_count).then_some(index)
}

pub fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let visible = visible_rows(area);
    let width = area.width.saturating_sub(8) as usize;
    let mut lines = Vec::new();

    match &app.environments {
        None => match &app.fetch_error {
            Some(err) => lines.push(Line::from(vec![Span::styled(
                format!(" {}", truncate(err, width)),
                Style::default().fg(Theme::RED),
            )])),
            None => lines.push(Line::from(vec![
                Span::styled(format!(" {} ", app.spinner()), Theme::text_muted()),
                Span::styled("Loading environments...", Theme::text_muted()),
            ])),
        },
        Some(rows) if rows.is_empty() => {
            lines.push(Line::from(vec![Span::styled(
                " No environments in this project",
                Theme::text_dim(),
            )]));
        }
        Some(rows) => {
            let offset = scroll_offset(app.cursor, visible);
            let open = app.drawer.selected();

            for (i, environment) in rows.iter().enumerate().skip(offset).take(visible) {
                let is_cursor = i == app.cursor;
                let mut spans = vec![Span::styled(
                    if is_cursor {
                        format!(" {} ", Theme::ARROW_RIGHT)
                    } else {
                        "   ".to_string()
                    },
                    Theme::text(),
                )];

                match health_indicator(environment.health()) {
                    Some(icon) => {
                        spans.push(icon);
                        spans.push(Span::raw(" "));
                    }
                    None => spans.push(Span::raw("  ")),
                }

                let name_style = if is_cursor || (open.is_some() && environment.name() == open) {
                    Theme::selected()
                } else {
                    Theme::text()
                };
                match environment.name() {
                    Some(name) => spans.push(Span::styled(truncate(name, width), name_style)),
                    None => spans.push(Span::styled("(unnamed)", Theme::text_dim())),
                }

                lines.push(Line::from(spans));
            }
        }
    }

    let count = app
        .environments
        .as_ref()
        .map(|rows| format!(" ({})", rows.len()))
        .unwrap_or_default();

    let block = Block::default()
        .title(format!(" {}{} ", Theme::SECTION_ENVIRONMENTS, count))
        .title_style(Style::default().fg(Theme::GREY_200))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::GREY_600))
        .style(Style::default().bg(Theme::GREY_800));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(7, 5), 3);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    #[test]
    fn test_row_at_maps_cells_to_rows() {
        let area = Rect::new(0, 3, 40, 10);
        assert_eq!(row_at(area, 0, 3, 5, 4), Some(0));
        assert_eq!(row_at(area, 0, 3, 5, 6), Some(2));
        // Past the last row
        assert_eq!(row_at(area, 0, 3, 5, 7), None);
        // On the border
        assert_eq!(row_at(area, 0, 3, 0, 4), None);
        assert_eq!(row_at(area, 0, 3, 5, 3), None);
    }

    #[test]
    fn test_row_at_accounts_for_scroll() {
        let area = Rect::new(0, 0, 40, 5); // 3 visible rows
        assert_eq!(row_at(area, 5, 10, 2, 1), Some(3));
    }
}
