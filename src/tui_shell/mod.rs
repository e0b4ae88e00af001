use anyhow::Result;

use crate::tracker::Tracker;

mod app;

mod command_bar;
mod commands;
mod layout;
mod navigator;
mod page;
mod pager;
mod pages;
mod search;

#[cfg(test)]
#[path = "../tests/tui_shell/support.rs"]
mod test_support;

pub fn run_with_options(tracker: Box<dyn Tracker>, opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(tracker, opts)
}
