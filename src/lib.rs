//! envscope library crate
//!
//! An environment list for one project, with a detail drawer whose open
//! environment is mirrored in a navigable address. The modules are public so
//! integration tests and benchmarks can drive the state machine and renderer
//! without a terminal.

pub mod app;
pub mod config;
pub mod drawer;
pub mod environment;
pub mod logging;
pub mod route;
pub mod selection;
pub mod source;
pub mod sync;
pub mod ui;
pub mod util;
