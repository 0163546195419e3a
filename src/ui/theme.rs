//! Greyscale theme for envscope
//! A high-contrast monochrome palette, with color reserved for health

use crate::environment::Health;
use ratatui::style::{Color, Modifier, Style};

/// The greyscale color palette
pub struct Theme;

impl Theme {
    // ─────────────────────────────────────────────────────────────────────
    // Core greyscale palette - from brightest to darkest
    // ─────────────────────────────────────────────────────────────────────

    /// Pure white - maximum emphasis
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Near white - headers, selected items
    pub const GREY_50: Color = Color::Rgb(250, 250, 250);

    /// Bright grey - primary text
    pub const GREY_100: Color = Color::Rgb(220, 220, 220);

    /// Light grey - secondary text, active elements
    pub const GREY_200: Color = Color::Rgb(180, 180, 180);

    /// Medium grey - muted text
    pub const GREY_300: Color = Color::Rgb(140, 140, 140);

    /// Dark grey - subtle elements
    pub const GREY_400: Color = Color::Rgb(100, 100, 100);

    /// Darker grey - borders, separators
    pub const GREY_500: Color = Color::Rgb(70, 70, 70);

    /// Very dark grey - panel borders
    pub const GREY_600: Color = Color::Rgb(45, 45, 45);

    /// Dark grey - drawer and overlay backgrounds
    pub const GREY_700: Color = Color::Rgb(35, 35, 35);

    /// Near black - panel background
    pub const GREY_800: Color = Color::Rgb(28, 28, 28);

    /// True black - deepest background
    pub const GREY_900: Color = Color::Rgb(18, 18, 18);

    /// Background color alias
    pub const BG: Color = Self::GREY_900;

    // ─────────────────────────────────────────────────────────────────────
    // Accent colors, used only for health and toasts
    // ─────────────────────────────────────────────────────────────────────

    pub const GREEN: Color = Color::Rgb(100, 200, 100);
    pub const RED: Color = Color::Rgb(200, 100, 100);
    pub const YELLOW: Color = Color::Rgb(220, 190, 90);

    // ─────────────────────────────────────────────────────────────────────
    // Labels
    // ─────────────────────────────────────────────────────────────────────

    pub const SECTION_ENVIRONMENTS: &'static str = "Environments";
    pub const DRAWER_CLOSE: &'static str = "[x]";

    /// Spinner frames - braille pattern
    pub const SPINNER_BRAILLE: [&'static str; 10] =
        ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    pub const ARROW_RIGHT: char = '▸';
    pub const DOT_SEPARATOR: char = '·';

    // ─────────────────────────────────────────────────────────────────────
    // Pre-built styles for common UI elements
    // ─────────────────────────────────────────────────────────────────────

    /// Primary text style
    pub fn text() -> Style {
        Style::default().fg(Self::GREY_100)
    }

    /// Secondary/muted text
    pub fn text_muted() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    /// Dimmed text for less important items
    pub fn text_dim() -> Style {
        Style::default().fg(Self::GREY_400)
    }

    /// Selected/highlighted item
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::GREY_50)
            .add_modifier(Modifier::BOLD)
    }

    /// Keybinding highlight
    pub fn key() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn health_color(health: Health) -> Color {
        match health {
            Health::Healthy => Self::GREEN,
            Health::Unhealthy => Self::RED,
            Health::Progressing => Self::YELLOW,
            Health::Unknown => Self::GREY_300,
        }
    }

    pub fn health_icon(health: Health) -> &'static str {
        match health {
            Health::Healthy => "●",
            Health::Unhealthy => "✗",
            Health::Progressing => "◐",
            Health::Unknown => "?",
        }
    }
}
