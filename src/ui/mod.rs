//! envscope UI - an environment list with a route-synced drawer
//!
//! Layout:
//! ╔══════════════════════════════════════════════════════════════╗
//! ║  shop                                                        ║
//! ║  Environments                                                ║
//! ╠════════════╦═════════════════════════════════════════════════╣
//! ║ ▸ ● dev    ║ prod                                       [x]  ║
//! ║   ◐ stagi… ║                                                 ║
//! ║   ● prod   ║   ● Healthy                                     ║
//! ║   ✗ prod-… ║   /project/shop/environment/prod                ║
//! ╠════════════╩═════════════════════════════════════════════════╣
//! ║  /project/shop/environment/prod · updated 12:04:31           ║
//! ╚══════════════════════════════════════════════════════════════╝

pub mod drawer;
pub mod health;
mod helpers;
pub mod list;
mod render;
pub mod theme;

pub use render::render;

use crate::config::Config;
use crate::drawer::{DrawerController, DrawerContent, CLOSE_ON_OUTSIDE_CLICK};
use crate::environment::{Environment, EnvironmentIndex};
use crate::route::{History, Navigator, RouteAddress, RouteError};
use crate::source::{FetchTicket, FetchTracker};
use crate::sync::Inbound;
use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::time::Instant;
use theme::Theme;
use tracing::{debug, info, warn};

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing an address to navigate to
    Address,
    /// Typing a project name to switch to
    Project,
}

/// Overlay state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
}

/// Toast notification kind - affects duration and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Duration in seconds before toast expires
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Info => 3,
            ToastKind::Success => 3,
            ToastKind::Error => 8,
        }
    }
}

/// Toast notification
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str) -> Self {
        let kind = if message.starts_with('+') {
            ToastKind::Success
        } else if message.contains("failed")
            || message.contains("error")
            || message.contains("Error")
        {
            ToastKind::Error
        } else {
            ToastKind::Info
        };

        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }

    pub fn is_error(&self) -> bool {
        self.kind == ToastKind::Error
    }
}

/// Screen regions, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub list: Rect,
    pub footer: Rect,
    /// Where the drawer is drawn when visible
    pub drawer: Rect,
}

impl Areas {
    pub fn compute(area: Rect) -> Self {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Environment list
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let above_footer = Rect {
            height: area.height.saturating_sub(layout[2].height),
            ..area
        };

        Self {
            header: layout[0],
            list: layout[1],
            footer: layout[2],
            drawer: drawer::drawer_area(above_footer),
        }
    }
}

/// Main application state
pub struct App {
    pub config: Config,
    pub history: History,
    pub drawer: DrawerController,

    // Latest fetch result; None while the first fetch for a project is pending
    pub environments: Option<Vec<Environment>>,
    pub index: EnvironmentIndex,
    pub fetch: FetchTracker,
    pub fetch_error: Option<String>,
    pub last_fetched_at: Option<DateTime<Local>>,
    pub source_label: String,

    // UI state
    pub cursor: usize,
    pub input_mode: InputMode,
    pub input: String,
    pub overlay: Overlay,
    pub toast: Option<Toast>,
    pub loading_frame: usize,
    pub viewport: Rect,
    pub should_quit: bool,

    fetch_requested: bool,
    // Set by a manual refresh so its result is confirmed with a toast
    announce_refresh: bool,
}

impl App {
    /// Mount on the history's current address
    pub fn new(
        mut config: Config,
        history: History,
        source_label: &str,
    ) -> Result<Self, RouteError> {
        let drawer = DrawerController::mount(&history)?;
        info!(address = history.current().unwrap_or(""), "mounted");
        config.remember_project(drawer.sync().project());

        Ok(Self {
            config,
            history,
            drawer,
            environments: None,
            index: EnvironmentIndex::default(),
            fetch: FetchTracker::new(),
            fetch_error: None,
            last_fetched_at: None,
            source_label: source_label.to_string(),
            cursor: 0,
            input_mode: InputMode::Normal,
            input: String::new(),
            overlay: Overlay::None,
            toast: None,
            loading_frame: 0,
            viewport: Rect::default(),
            should_quit: false,
            fetch_requested: true,
            announce_refresh: false,
        })
    }

    pub fn project(&self) -> &str {
        self.drawer.sync().project()
    }

    pub fn address(&self) -> &str {
        self.history.current().unwrap_or_default()
    }

    /// Rows in fetch order
    pub fn rows(&self) -> &[Environment] {
        self.environments.as_deref().unwrap_or_default()
    }

    /// Whether the collection for the current project has arrived (or failed)
    pub fn is_loaded(&self) -> bool {
        self.environments.is_some() || self.fetch_error.is_some()
    }

    pub fn drawer_content(&self) -> DrawerContent<'_> {
        self.drawer.content(&self.index, self.is_loaded())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fetching
    // ─────────────────────────────────────────────────────────────────────

    /// Ask for a re-fetch unless one is already running
    pub fn request_refresh(&mut self) {
        if !self.fetch.in_flight() {
            self.fetch_requested = true;
        }
    }

    /// User-requested refresh; the result is confirmed with a toast
    pub fn refresh(&mut self) {
        self.request_refresh();
        self.announce_refresh = true;
        self.show_toast("Refreshing environments");
    }

    /// Take the pending fetch request, if any, as a ticket for the current project
    pub fn take_fetch_request(&mut self) -> Option<FetchTicket> {
        if !self.fetch_requested {
            return None;
        }
        self.fetch_requested = false;
        let project = self.project().to_string();
        Some(self.fetch.begin(&project))
    }

    /// Apply a fetch result. Returns false when the result was stale and dropped.
    pub fn apply_fetch_result(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Environment>, String>,
    ) -> bool {
        if !self.fetch.accept(ticket) {
            debug!(
                project = %ticket.project,
                generation = ticket.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        match result {
            Ok(environments) => {
                info!(
                    project = %ticket.project,
                    count = environments.len(),
                    "environments fetched"
                );
                if std::mem::take(&mut self.announce_refresh) {
                    self.show_toast(&format!("+ Refreshed {} environments", environments.len()));
                }
                self.index = EnvironmentIndex::build(&environments);
                self.environments = Some(environments);
                self.fetch_error = None;
                self.last_fetched_at = Some(Local::now());
                self.clamp_cursor();
            }
            Err(err) => {
                warn!(project = %ticket.project, error = %err, "fetch failed");
                self.announce_refresh = false;
                // Only toast when the error is new, periodic refreshes repeat it
                if self.fetch_error.as_deref() != Some(err.as_str()) {
                    self.show_toast(&err);
                }
                self.fetch_error = Some(err);
            }
        }
        true
    }

    // ─────────────────────────────────────────────────────────────────────
    // Drawer intents
    // ─────────────────────────────────────────────────────────────────────

    pub fn open_environment(&mut self, name: &str) {
        if let Err(err) = self.drawer.open(&mut self.history, name) {
            self.show_toast(&err.user_message());
        }
    }

    /// Open the row under the cursor. Rows without a name cannot be opened.
    pub fn open_selected(&mut self) {
        let name = self
            .rows()
            .get(self.cursor)
            .and_then(Environment::name)
            .map(str::to_string);
        match name {
            Some(name) => self.open_environment(&name),
            None => debug!(row = self.cursor, "row has no name; nothing to open"),
        }
    }

    pub fn close_drawer(&mut self) {
        self.drawer.close(&mut self.history);
    }

    // ─────────────────────────────────────────────────────────────────────
    // External navigation
    // ─────────────────────────────────────────────────────────────────────

    pub fn navigate_back(&mut self) {
        if self.history.back() {
            self.sync_from_address();
        } else {
            self.show_toast("Already at the oldest address");
        }
    }

    pub fn navigate_forward(&mut self) {
        if self.history.forward() {
            self.sync_from_address();
        } else {
            self.show_toast("Already at the newest address");
        }
    }

    /// Navigate to a typed or pasted address
    pub fn navigate_to(&mut self, raw: &str) {
        match RouteAddress::parse(raw) {
            Ok(address) => {
                let raw = address.to_string();
                if raw != self.address() {
                    self.history.push(raw);
                }
                self.sync_from_address();
            }
            Err(err) => self.show_toast(&err.user_message()),
        }
    }

    /// Point the address at another project, leaving the environment segment to
    /// the drawer's own rules.
    pub fn switch_project(&mut self, project: &str) {
        let project = project.trim();
        let target = self
            .drawer
            .sync()
            .address()
            .with_project(project)
            .map(|address| {
                if self.config.close_drawer_on_project_switch {
                    address.without_environment()
                } else {
                    address
                }
            });

        match target {
            Ok(address) => {
                self.history.push(address.to_string());
                self.sync_from_address();
            }
            Err(err) => self.show_toast(&err.user_message()),
        }
    }

    /// Apply the navigator's address if it changed outside the drawer.
    pub fn sync_from_address(&mut self) {
        match self.drawer.observe(&self.history) {
            Ok(Inbound::Applied {
                project_changed: true,
                ..
            }) => self.on_project_changed(),
            Ok(_) => {}
            Err(err) => self.show_toast(&err.user_message()),
        }
    }

    fn on_project_changed(&mut self) {
        let project = self.project().to_string();
        info!(project = %project, "project changed");
        self.environments = None;
        self.index = EnvironmentIndex::default();
        self.fetch_error = None;
        self.last_fetched_at = None;
        self.cursor = 0;
        self.fetch_requested = true;
        self.announce_refresh = false;
        self.config.remember_project(&project);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────

    /// Handle a left click at a terminal cell
    pub fn click(&mut self, column: u16, row: u16) {
        let areas = Areas::compute(self.viewport);

        if self.drawer.visible() {
            if drawer::close_button_hit(areas.drawer, column, row) {
                self.close_drawer();
            } else if !helpers::contains(areas.drawer, column, row) {
                if CLOSE_ON_OUTSIDE_CLICK {
                    self.close_drawer();
                } else {
                    debug!(column, row, "click outside drawer ignored");
                }
            }
            return;
        }

        if let Some(index) = list::row_at(areas.list, self.cursor, self.rows().len(), column, row) {
            self.cursor = index;
            self.open_selected();
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────────────

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows().len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.rows().len().saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Prompts
    // ─────────────────────────────────────────────────────────────────────

    pub fn start_address_input(&mut self) {
        self.input_mode = InputMode::Address;
        self.input = self.address().to_string();
    }

    pub fn start_project_input(&mut self) {
        self.input_mode = InputMode::Project;
        self.input.clear();
    }

    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn submit_input(&mut self) {
        let mode = self.input_mode;
        let value = std::mem::take(&mut self.input);
        self.input_mode = InputMode::Normal;

        match mode {
            InputMode::Address => self.navigate_to(&value),
            InputMode::Project if !value.trim().is_empty() => self.switch_project(&value),
            InputMode::Project | InputMode::Normal => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Overlays, toasts, animation
    // ─────────────────────────────────────────────────────────────────────

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Help => Overlay::None,
            Overlay::None => Overlay::Help,
        };
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn tick_loading(&mut self) {
        self.loading_frame = (self.loading_frame + 1) % Theme::SPINNER_BRAILLE.len();
    }

    pub fn spinner(&self) -> &'static str {
        Theme::SPINNER_BRAILLE[self.loading_frame % Theme::SPINNER_BRAILLE.len()]
    }
}
