use super::runtime::{Term, with_terminal_suspended};
use super::*;

mod key_dispatch;

pub(in crate::tui_shell) use self::key_dispatch::handle_key;

/// Outer loop: enter the current page, serve input until something asks for
/// a restart, run any pending editor action, repeat until quit.
pub(super) fn run_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    while !app.quit {
        app.enter();
        inner_loop(terminal, app)?;

        if let Some(action) = app.take_pending() {
            with_terminal_suspended(terminal, || app.run_external(action))?;
        }
    }
    Ok(())
}

/// Blocks on terminal events; there is no timeout.
fn inner_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit || app.restart {
            return Ok(());
        }

        match event::read().context("read event")? {
            Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }
    }
}
