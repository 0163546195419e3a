pub mod background;
pub mod input;
pub mod messages;
pub mod runtime;

pub use messages::BackgroundMessage;
pub use runtime::run_tui;

use crate::source::EnvironmentSource;
use std::sync::mpsc;
use std::sync::Arc;

pub struct RuntimeContext<'a> {
    pub source: Arc<dyn EnvironmentSource>,
    pub tx: &'a mpsc::Sender<BackgroundMessage>,
}
