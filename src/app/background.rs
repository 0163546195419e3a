//! Background task handling for envscope
//!
//! # Error Handling Patterns
//!
//! Channel sends (`tx.send(...)`) use `let _ =`: if the receiver is dropped the
//! app is shutting down and nobody is waiting for the result.

use crate::app::messages::BackgroundMessage;
use crate::app::RuntimeContext;
use crate::source::FetchTicket;
use crate::ui::App;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;
use tracing::{debug, error};

pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            BackgroundMessage::EnvironmentsFetched { ticket, result } => {
                app.apply_fetch_result(&ticket, result);
            }
            BackgroundMessage::Error(e) => {
                error!(error = %e, "background task failed");
                app.show_toast(&format!("Error: {}", e));
            }
        }
    }
}

/// Fetch a project's environments off the UI thread
pub fn spawn_fetch(ctx: &RuntimeContext, ticket: FetchTicket) {
    let source = ctx.source.clone();
    let tx = ctx.tx.clone();
    debug!(project = %ticket.project, generation = ticket.generation, "fetch started");

    spawn_background(ctx.tx.clone(), "fetch_environments", async move {
        let project = ticket.project.clone();
        let result = match tokio::task::spawn_blocking(move || source.fetch(&project)).await {
            Ok(result) => result.map_err(|e| e.user_message()),
            Err(join_err) => Err(format!("Fetch failed: {}", join_err)),
        };
        let _ = tx.send(BackgroundMessage::EnvironmentsFetched { ticket, result });
    });
}

pub fn spawn_background<F>(tx: mpsc::Sender<BackgroundMessage>, task_name: &'static str, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            let detail = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            };
            let _ = tx.send(BackgroundMessage::Error(format!(
                "Background task '{}' crashed unexpectedly: {}",
                task_name, detail
            )));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::environment::Environment;
    use crate::route::History;
    use crate::source::StaticSource;
    use std::sync::Arc;
    use std::time::Duration;

    fn recv(rx: &mpsc::Receiver<BackgroundMessage>) -> BackgroundMessage {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_spawn_fetch_delivers_result() {
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            source: Arc::new(StaticSource::new().with_project("P", vec![Environment::named("prod")])),
            tx: &tx,
        };
        let mut app = App::new(Config::default(), History::new("/project/P"), "test").unwrap();

        let ticket = app.take_fetch_request().unwrap();
        spawn_fetch(&ctx, ticket);

        match recv(&rx) {
            BackgroundMessage::EnvironmentsFetched { ticket, result } => {
                assert!(app.apply_fetch_result(&ticket, result));
            }
            BackgroundMessage::Error(e) => panic!("unexpected error: {}", e),
        }
        assert!(app.index.contains("prod"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_spawn_fetch_reports_unknown_project() {
        let (tx, rx) = mpsc::channel();
        let ctx = RuntimeContext {
            source: Arc::new(StaticSource::new()),
            tx: &tx,
        };
        let mut app = App::new(Config::default(), History::new("/project/P"), "test").unwrap();

        spawn_fetch(&ctx, app.take_fetch_request().unwrap());

        match recv(&rx) {
            BackgroundMessage::EnvironmentsFetched { result, .. } => {
                assert!(result.unwrap_err().contains("not found"));
            }
            BackgroundMessage::Error(e) => panic!("unexpected error: {}", e),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_panicking_task_becomes_error_message() {
        let (tx, rx) = mpsc::channel();
        spawn_background(tx.clone(), "boom", async {
            panic!("kaboom");
        });

        match recv(&rx) {
            BackgroundMessage::Error(e) => {
                assert!(e.contains("boom"));
                assert!(e.contains("kaboom"));
            }
            BackgroundMessage::EnvironmentsFetched { .. } => panic!("expected an error"),
        }
    }

    #[test]
    fn test_drain_applies_messages() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Config::default(), History::new("/project/P"), "test").unwrap();
        let ticket = app.take_fetch_request().unwrap();

        tx.send(BackgroundMessage::EnvironmentsFetched {
            ticket,
            result: Ok(vec![Environment::named("staging")]),
        })
        .unwrap();
        tx.send(BackgroundMessage::Error("disk on fire".into())).unwrap();

        drain_messages(&mut app, &rx);

        assert_eq!(app.rows().len(), 1);
        assert!(app.toast.as_ref().is_some_and(|t| t.is_error()));
    }
}
