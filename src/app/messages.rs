use crate::environment::Environment;
use crate::source::FetchTicket;

/// Messages from background tasks to the main UI thread
pub enum BackgroundMessage {
    /// A fetch finished; the ticket says which request it answers
    EnvironmentsFetched {
        ticket: FetchTicket,
        result: Result<Vec<Environment>, String>,
    },
    /// Generic error (task crash)
    Error(String),
}
