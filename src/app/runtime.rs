//! TUI runtime for envscope
//!
//! # Error Handling
//!
//! Background tasks use `let _ =` for channel sends. See `background.rs`
//! module docs for the rationale.

use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::source::EnvironmentSource;
use crate::ui;
use crate::ui::App;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Run the TUI until the user quits
pub async fn run_tui(mut app: App, source: Arc<dyn EnvironmentSource>) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel::<BackgroundMessage>();
    info!(source = %source.describe(), address = %app.address(), "starting");

    let result = run_loop(&mut terminal, &mut app, rx, tx, source);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main event loop with background message handling
fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<BackgroundMessage>,
    tx: mpsc::Sender<BackgroundMessage>,
    source: Arc<dyn EnvironmentSource>,
) -> Result<()> {
    let refresh_interval = match app.config.refresh_interval_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let mut last_refresh = Instant::now();

    let ctx = RuntimeContext { source, tx: &tx };

    loop {
        app.clear_expired_toast();
        app.tick_loading();

        // Periodic re-fetch; a slow source simply skips ticks while in flight
        if let Some(interval) = refresh_interval {
            if last_refresh.elapsed() >= interval {
                app.request_refresh();
                last_refresh = Instant::now();
            }
        }

        if let Some(ticket) = app.take_fetch_request() {
            last_refresh = Instant::now();
            background::spawn_fetch(&ctx, ticket);
        }

        // Check for background messages (non-blocking)
        background::drain_messages(app, &rx);

        // Render. The viewport is recorded so clicks are hit-tested against
        // the same layout that was drawn.
        terminal.draw(|f| {
            app.viewport = f.area();
            ui::render(f, app);
        })?;

        // Poll for events with fast timeout (snappy animations)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    input::handle_key_event(app, key)?;
                }
                Event::Mouse(mouse) => input::handle_mouse_event(app, mouse)?,
                _ => {}
            }
        }

        if app.should_quit {
            info!(address = %app.address(), "quitting");
            return Ok(());
        }
    }
}
