mod footer;
mod header;
mod overlays;
mod toast;

use crate::ui::theme::Theme;
use crate::ui::{drawer, list, App, Areas, Overlay};
use ratatui::{style::Style, widgets::Block, Frame};

use footer::render_footer;
use header::render_header;
use overlays::render_help;
use toast::render_toast;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

    let areas = Areas::compute(area);

    render_header(frame, areas.header, app);
    list::render_list(frame, areas.list, app);
    render_footer(frame, areas.footer, app);

    if app.drawer.visible() {
        drawer::render_drawer(frame, areas.drawer, app);
    }

    if app.overlay == Overlay::Help {
        render_help(frame);
    }

    if let Some(toast) = &app.toast {
        render_toast(frame, toast);
    }
}
