//! Health indicator rendering

use super::theme::Theme;
use crate::environment::Health;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

/// Colored icon for a health value. Absent health renders nothing.
pub fn health_indicator(health: Option<Health>) -> Option<Span<'static>> {
    let health = health?;
    Some(Span::styled(
        Theme::health_icon(health),
        Style::default().fg(Theme::health_color(health)),
    ))
}

/// Icon plus label, for the drawer
pub fn health_badge(health: Option<Health>) -> Vec<Span<'static>> {
    match health {
        Some(health) => vec![
            Span::styled(
                format!("{} ", Theme::health_icon(health)),
                Style::default().fg(Theme::health_color(health)),
            ),
            Span::styled(
                health.label(),
                Style::default()
                    .fg(Theme::health_color(health))
                    .add_modifier(Modifier::BOLD),
            ),
        ],
        None => vec![Span::styled("No health reported", Theme::text_dim())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_health_has_no_indicator() {
        assert!(health_indicator(None).is_none());
        assert_eq!(health_badge(None).len(), 1);
    }

    #[test]
    fn test_badge_includes_label() {
        let spans = health_badge(Some(Health::Healthy));
        assert!(spans.iter().any(|s| s.content == "Healthy"));
    }
}
