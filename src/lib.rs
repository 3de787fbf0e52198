// Library surface for headless/integration tests and reuse.
// Terminal setup and argument parsing stay in main.rs.
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod error;
pub mod keys;
pub mod logging;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod ui;
pub mod view;
