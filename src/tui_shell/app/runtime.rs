use std::io::IsTerminal;

use super::*;

pub(in crate::tui_shell) type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub(in crate::tui_shell) fn run(
    tracker: Box<dyn Tracker>,
    opts: crate::tui::TuiRunOptions,
) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = terminal
        .size()
        .context("terminal size")
        .and_then(|size| {
            let boxed = tracker
                .options()
                .get("boxed")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            let start = start_page(&opts.start, boxed);
            let mut app = App::new(tracker, start, size.width, size.height);
            event_loop::run_loop(&mut terminal, &mut app)
        });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// Hand the terminal back to the user while `f` runs (an external editor).
pub(in crate::tui_shell) fn with_terminal_suspended<T>(
    terminal: &mut Term,
    f: impl FnOnce() -> T,
) -> Result<T> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().ok();

    let out = f();

    enable_raw_mode().context("enable raw mode")?;
    execute!(terminal.backend_mut(), EnterAlternateScreen).context("enter alternate screen")?;
    terminal.clear().context("clear terminal")?;
    Ok(out)
}
