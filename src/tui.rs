use anyhow::Result;

use crate::tracker::Tracker;

/// Page the interactive session opens on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartPage {
    #[default]
    Query,
    List {
        query: String,
    },
    View {
        id: String,
    },
    Password,
}

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub start: StartPage,
}

pub fn run(tracker: Box<dyn Tracker>) -> Result<()> {
    run_with_options(tracker, TuiRunOptions::default())
}

pub fn run_with_options(tracker: Box<dyn Tracker>, opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(tracker, opts)
}
