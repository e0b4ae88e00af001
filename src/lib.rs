pub mod config;
pub mod logging;
pub mod model;
pub mod template;
pub mod tracker;
pub mod tui;

mod tui_shell;
